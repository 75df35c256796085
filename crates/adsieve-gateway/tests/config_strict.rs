#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use adsieve_gateway::config::{self, StoreKind};
use adsieve_gateway::store::CorruptPolicy;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
store:
  kind: memory
  keyy: "typo" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.store.kind, StoreKind::File);
    assert_eq!(cfg.store.key, "YouTubeAdvertiseInfo");
    assert_eq!(cfg.store.on_corrupt, CorruptPolicy::Fallback);
    assert!(!cfg.gateway.debug);

    let layout = cfg.transform.layout().unwrap();
    assert_eq!(layout.classify.to_string(), "2");
    assert_eq!(layout.ad_signals.to_string(), "1.9");
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
gateway:
  listen: "0.0.0.0:9000"
  debug: true
store:
  kind: memory
  key: "Custom.Lists"
  on_corrupt: error
transform:
  max_payload_bytes: 4096
  classify_path: "3.1"
  ad_signals_path: "1.9"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert!(cfg.gateway.debug);
    assert_eq!(cfg.gateway.listen_addr().unwrap().port(), 9000);
    assert_eq!(cfg.store.kind, StoreKind::Memory);
    assert_eq!(cfg.store.on_corrupt, CorruptPolicy::Error);
    assert_eq!(cfg.transform.limits().max_payload_bytes, 4096);
}

#[test]
fn rejects_bad_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn rejects_invalid_values() {
    let cases = [
        "version: 1\ngateway:\n  listen: \"nope\"\n",
        "version: 1\nstore:\n  key: \"../etc/passwd\"\n",
        "version: 1\ntransform:\n  max_payload_bytes: 0\n",
        "version: 1\ntransform:\n  classify_path: \"2.x\"\n",
        "version: 1\ntransform:\n  ad_signals_path: \"0\"\n",
        // classified field would be wiped by the strip
        "version: 1\ntransform:\n  classify_path: \"1.9.2\"\n  ad_signals_path: \"1.9\"\n",
    ];
    for yaml in cases {
        let err = config::load_from_str(yaml).expect_err(yaml);
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST", "yaml={yaml}");
    }
}
