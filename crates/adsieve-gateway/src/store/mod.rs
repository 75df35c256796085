//! Key-value config store (the persisted allow/deny lists live here).
//!
//! The store is an injected capability: the gateway picks an implementation
//! from config, tests pass their own. Values are whole JSON blobs; `set`
//! always overwrites.

pub mod file;
pub mod memory;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use adsieve_core::error::{AdsieveError, Result};

use crate::config::schema::{StoreKind, StoreSection};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Synchronous key-value capability.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: String) -> Result<()>;
}

/// What `load_json` does when the stored blob does not parse.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CorruptPolicy {
    /// Warn and return the caller's default.
    #[default]
    Fallback,
    /// Surface a `Storage` error.
    Error,
}

/// Keys double as file names, so keep them boring.
pub fn validate_key(key: &str) -> Result<()> {
    let ok = !key.is_empty()
        && key.len() <= 128
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !key.starts_with('.');
    if !ok {
        return Err(AdsieveError::BadRequest(format!(
            "invalid store key: {key:?} (allowed: A-Z a-z 0-9 _ - .)"
        )));
    }
    Ok(())
}

/// Load a JSON value, or `default` if the key is absent or empty.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
    default: T,
    on_corrupt: CorruptPolicy,
) -> Result<T> {
    let Some(raw) = store.get(key)? else {
        return Ok(default);
    };
    if raw.trim().is_empty() {
        return Ok(default);
    }

    match serde_json::from_str(&raw) {
        Ok(v) => Ok(v),
        Err(e) => match on_corrupt {
            CorruptPolicy::Fallback => {
                warn!(key, error = %e, "stored value is not valid JSON; using default");
                Ok(default)
            }
            CorruptPolicy::Error => Err(AdsieveError::Storage(format!(
                "stored value for {key} is not valid JSON: {e}"
            ))),
        },
    }
}

/// Serialize `value` and overwrite `key`.
pub fn save_json<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) -> Result<()> {
    let s = serde_json::to_string(value)
        .map_err(|e| AdsieveError::Internal(format!("serialize {key} failed: {e}")))?;
    store.set(key, s)
}

/// Build the store selected by config.
pub fn open(section: &StoreSection) -> Result<Arc<dyn KvStore>> {
    match section.kind {
        StoreKind::File => Ok(Arc::new(FileStore::open(&section.dir)?)),
        StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
