use std::net::SocketAddr;

use serde::Deserialize;

use adsieve_core::error::{AdsieveError, Result};
use adsieve_core::protocol::FieldPath;
use adsieve_core::transform::DEFAULT_MAX_PAYLOAD_BYTES;
use adsieve_core::{FieldLayout, Limits};

pub use crate::store::CorruptPolicy;

/// Hard ceiling for `transform.max_payload_bytes` (also the HTTP body limit).
pub const MAX_PAYLOAD_CEILING: usize = 16 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdsieveConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub transform: TransformSection,
}

impl AdsieveConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AdsieveError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.store.validate()?;
        self.transform.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Default log level becomes `debug` (ignored when RUST_LOG is set).
    #[serde(default)]
    pub debug: bool,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            debug: false,
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            AdsieveError::BadRequest(format!(
                "gateway.listen must be a valid SocketAddr: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "127.0.0.1:8787".into()
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default)]
    pub kind: StoreKind,

    /// Directory for the file store (one JSON file per key).
    #[serde(default = "default_store_dir")]
    pub dir: String,

    /// Key holding the allow/deny lists.
    #[serde(default = "default_store_key")]
    pub key: String,

    #[serde(default)]
    pub on_corrupt: CorruptPolicy,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            dir: default_store_dir(),
            key: default_store_key(),
            on_corrupt: CorruptPolicy::default(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        crate::store::validate_key(&self.key)?;
        if self.kind == StoreKind::File && self.dir.trim().is_empty() {
            return Err(AdsieveError::BadRequest(
                "store.dir must not be empty for the file store".into(),
            ));
        }
        Ok(())
    }
}

fn default_store_dir() -> String {
    "./adsieve-data".into()
}
fn default_store_key() -> String {
    "YouTubeAdvertiseInfo".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformSection {
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,

    /// Dotted field-number path of the classified string field.
    #[serde(default = "default_classify_path")]
    pub classify_path: String,

    /// Dotted field-number path of the ad-signals sub-message.
    #[serde(default = "default_ad_signals_path")]
    pub ad_signals_path: String,
}

impl Default for TransformSection {
    fn default() -> Self {
        Self {
            max_payload_bytes: default_max_payload_bytes(),
            classify_path: default_classify_path(),
            ad_signals_path: default_ad_signals_path(),
        }
    }
}

impl TransformSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PAYLOAD_CEILING).contains(&self.max_payload_bytes) {
            return Err(AdsieveError::BadRequest(format!(
                "transform.max_payload_bytes must be between 1 and {MAX_PAYLOAD_CEILING}"
            )));
        }

        let layout = self.layout()?;
        // Clearing the ad-signals message must not erase the classified field.
        if layout.classify.segments().starts_with(layout.ad_signals.segments()) {
            return Err(AdsieveError::BadRequest(
                "transform.classify_path must not lie inside transform.ad_signals_path".into(),
            ));
        }
        Ok(())
    }

    pub fn layout(&self) -> Result<FieldLayout> {
        let classify: FieldPath = self.classify_path.parse().map_err(|e| {
            AdsieveError::BadRequest(format!("transform.classify_path: {e}"))
        })?;
        let ad_signals: FieldPath = self.ad_signals_path.parse().map_err(|e| {
            AdsieveError::BadRequest(format!("transform.ad_signals_path: {e}"))
        })?;
        Ok(FieldLayout { classify, ad_signals })
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_payload_bytes: self.max_payload_bytes,
        }
    }
}

fn default_max_payload_bytes() -> usize {
    DEFAULT_MAX_PAYLOAD_BYTES
}
fn default_classify_path() -> String {
    "2".into()
}
fn default_ad_signals_path() -> String {
    "1.9".into()
}
