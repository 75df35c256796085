//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use adsieve_core::error::{AdsieveError, Result};

pub use schema::{AdsieveConfig, GatewaySection, StoreKind, StoreSection, TransformSection};

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "ADSIEVE_CONFIG";
/// Config file used when `ADSIEVE_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "adsieve.yaml";

pub fn load_from_file(path: &str) -> Result<AdsieveConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| AdsieveError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AdsieveConfig> {
    let cfg: AdsieveConfig = serde_yaml::from_str(s)
        .map_err(|e| AdsieveError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
