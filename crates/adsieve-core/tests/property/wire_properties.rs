//! Wire codec properties: canonical round-trips and panic-free parsing.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bytes::Bytes;
use proptest::prelude::*;

use adsieve_core::protocol::wire::MAX_FIELD_NUMBER;
use adsieve_core::protocol::{decode_message, encode_message, Field, Message, WireValue};
use adsieve_core::{transform, AdvertiseInfo, FieldLayout, Limits};

fn wire_value() -> impl Strategy<Value = WireValue> {
    prop_oneof![
        any::<u64>().prop_map(WireValue::Varint),
        any::<u64>().prop_map(WireValue::Fixed64),
        prop::collection::vec(any::<u8>(), 0..48).prop_map(|v| WireValue::Len(Bytes::from(v))),
        any::<u32>().prop_map(WireValue::Fixed32),
    ]
}

fn message() -> impl Strategy<Value = Message> {
    prop::collection::vec((1..=MAX_FIELD_NUMBER, wire_value()), 0..16).prop_map(|fields| Message {
        fields: fields
            .into_iter()
            .map(|(number, value)| Field { number, value })
            .collect(),
    })
}

proptest! {
    #[test]
    fn encode_then_decode_returns_the_message(msg in message()) {
        let encoded = encode_message(&msg);
        prop_assert_eq!(encoded.len(), msg.encoded_len());
        prop_assert_eq!(decode_message(encoded).unwrap(), msg);
    }

    #[test]
    fn canonical_bytes_reencode_identically(msg in message()) {
        let canonical = encode_message(&msg);
        let again = encode_message(&decode_message(canonical.clone()).unwrap());
        prop_assert_eq!(again, canonical);
    }

    #[test]
    fn decode_never_panics(raw in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_message(Bytes::from(raw));
    }

    #[test]
    fn transform_never_panics_and_unstripped_is_untouched(
        raw in prop::collection::vec(any::<u8>(), 0..256),
        deny_all in any::<bool>(),
    ) {
        let raw = Bytes::from(raw);
        let info = if deny_all {
            AdvertiseInfo::new(vec![], vec!["".to_string(), "a".to_string()])
        } else {
            AdvertiseInfo::default()
        };

        if let Ok(out) = transform(raw.clone(), &info, &FieldLayout::default(), &Limits::default()) {
            if !out.stripped {
                prop_assert_eq!(out.payload, raw);
            }
        }
    }
}
