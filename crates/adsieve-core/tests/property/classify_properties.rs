//! Classification and strip properties over arbitrary lists and fields.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bytes::Bytes;
use proptest::prelude::*;

use adsieve_core::protocol::{decode_message, encode_message, Message, WireValue};
use adsieve_core::{transform, AdvertiseInfo, FieldLayout, Limits, Verdict};

fn entries() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9/_]{1,12}", 0..8)
}

/// `{1: {9: <ad signals>, 3: "WEB"}, 2: field}`
fn request(field: &str, signals: &[u8]) -> Bytes {
    let mut context = Message::new();
    context.push(3, WireValue::Len(Bytes::from_static(b"WEB")));
    context.push(9, WireValue::Len(Bytes::copy_from_slice(signals)));

    let mut req = Message::new();
    req.push(1, WireValue::Len(encode_message(&context)));
    req.push(2, WireValue::Len(Bytes::copy_from_slice(field.as_bytes())));
    encode_message(&req)
}

proptest! {
    #[test]
    fn allow_listed_is_never_an_ad(
        field in "[a-z0-9/_]{1,12}",
        mut white in entries(),
        mut black in entries(),
        also_denied in any::<bool>(),
    ) {
        white.push(field.clone());
        if also_denied {
            black.push(field.clone());
        }
        let info = AdvertiseInfo::new(white, black);
        prop_assert_eq!(info.classify(Some(&field)), Verdict::NotAd);
    }

    #[test]
    fn deny_only_is_an_ad(
        field in "[a-z0-9/_]{1,12}",
        white in entries(),
        mut black in entries(),
    ) {
        let white: Vec<String> = white.into_iter().filter(|w| *w != field).collect();
        black.push(field.clone());
        let info = AdvertiseInfo::new(white, black);
        prop_assert_eq!(info.classify(Some(&field)), Verdict::Ad);
    }

    #[test]
    fn unlisted_is_unknown_and_not_an_ad(
        field in "[a-z0-9/_]{1,12}",
        white in entries(),
        black in entries(),
    ) {
        let white: Vec<String> = white.into_iter().filter(|w| *w != field).collect();
        let black: Vec<String> = black.into_iter().filter(|b| *b != field).collect();
        let verdict = AdvertiseInfo::new(white, black).classify(Some(&field));
        prop_assert_eq!(verdict, Verdict::Unknown);
        prop_assert!(!verdict.is_ad());
    }

    #[test]
    fn allow_listed_request_passes_through_unchanged(
        field in "[a-z0-9/_]{1,12}",
        signals in prop::collection::vec(any::<u8>(), 0..32),
        black in entries(),
    ) {
        let raw = request(&field, &signals);
        let mut black = black;
        black.push(field.clone());
        let info = AdvertiseInfo::new(vec![field.clone()], black);

        let out = transform(raw.clone(), &info, &FieldLayout::default(), &Limits::default()).unwrap();
        prop_assert!(!out.stripped);
        prop_assert_eq!(out.payload, raw);
    }

    #[test]
    fn denied_request_has_empty_ad_signals(
        field in "[a-z0-9/_]{1,12}",
        signals in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let raw = request(&field, &signals);
        let info = AdvertiseInfo::new(vec![], vec![field.clone()]);

        let out = transform(raw, &info, &FieldLayout::default(), &Limits::default()).unwrap();
        prop_assert!(out.stripped);
        prop_assert_eq!(out.verdict, Verdict::Ad);

        let msg = decode_message(out.payload).unwrap();
        let context = decode_message(msg.last(1).unwrap().value.as_len().unwrap().clone()).unwrap();
        prop_assert_eq!(&context.last(9).unwrap().value, &WireValue::Len(Bytes::new()));
        prop_assert_eq!(&context.last(3).unwrap().value, &WireValue::Len(Bytes::from_static(b"WEB")));
        prop_assert_eq!(
            &msg.last(2).unwrap().value,
            &WireValue::Len(Bytes::copy_from_slice(field.as_bytes()))
        );
    }
}
