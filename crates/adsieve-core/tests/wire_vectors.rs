//! Protobuf wire codec vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bytes::Bytes;

use adsieve_core::protocol::{decode_message, encode_message};

use vector_loader::load;

#[test]
fn wire_vectors() {
    let files = [
        "wire_player_request.json",
        "wire_scalars.json",
        "wire_truncated_varint.json",
        "wire_len_overrun.json",
        "wire_field_zero.json",
        "wire_group.json",
    ];

    for f in files {
        let v = load(f);
        let raw = v.payload.decode();
        let res = decode_message(Bytes::from(raw.clone()));

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.client_code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let msg = res.expect("expected ok message");
        let ex = v.expect.expect("missing expect block");

        let numbers: Vec<u64> = msg.fields.iter().map(|f| f.number as u64).collect();
        let want: Vec<u64> = ex["numbers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n.as_u64().unwrap())
            .collect();
        assert_eq!(numbers, want, "vector={}", v.description);
        assert_eq!(msg.encoded_len() as u64, ex["encoded_len"].as_u64().unwrap(), "vector={}", v.description);

        // Canonical input re-encodes byte for byte.
        assert_eq!(encode_message(&msg).to_vec(), raw, "vector={}", v.description);
    }
}

#[test]
fn nested_message_decodes_lazily() {
    let raw = hex::decode("0a090a035745424a02080112087061676561642f78").unwrap();
    let msg = decode_message(Bytes::from(raw)).unwrap();

    let ctx = msg.last(1).unwrap().value.as_len().unwrap().clone();
    let ctx = decode_message(ctx).unwrap();
    let client = ctx.last(1).unwrap().value.as_len().unwrap();
    assert_eq!(&client[..], b"WEB");
    assert!(ctx.last(9).is_some());
}

#[test]
fn varint_overflow_is_rejected() {
    // key for field 1 varint, then 10 continuation-heavy bytes
    let raw = hex::decode("08ffffffffffffffffff7f").unwrap();
    let err = decode_message(Bytes::from(raw)).unwrap_err();
    assert_eq!(err.client_code().as_str(), "MALFORMED");
}
