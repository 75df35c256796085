//! Persisted allow/deny lists (`AdvertiseInfo`) on top of a `KvStore`.
//!
//! Each request reads a fresh snapshot. Appends are read-modify-write and are
//! serialized within this process; two processes sharing one store can still
//! race. Appends never replace a stored blob that fails to parse, whatever the
//! configured corrupt policy.

use std::sync::{Arc, Mutex};

use tracing::info;

use adsieve_core::error::{AdsieveError, Result};
use adsieve_core::AdvertiseInfo;

use crate::store::{load_json, save_json, CorruptPolicy, KvStore};

/// Which list an append targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Allow,
    Deny,
}

impl ListKind {
    /// JSON member name of the list.
    pub fn as_str(self) -> &'static str {
        match self {
            ListKind::Allow => "whiteList",
            ListKind::Deny => "blackList",
        }
    }
}

pub struct AdvertiseLists {
    store: Arc<dyn KvStore>,
    key: String,
    on_corrupt: CorruptPolicy,
    write_lock: Mutex<()>,
}

impl AdvertiseLists {
    pub fn new(store: Arc<dyn KvStore>, key: impl Into<String>, on_corrupt: CorruptPolicy) -> Self {
        Self {
            store,
            key: key.into(),
            on_corrupt,
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current lists; empty lists when nothing is stored yet.
    pub fn snapshot(&self) -> Result<AdvertiseInfo> {
        load_json(self.store.as_ref(), &self.key, AdvertiseInfo::default(), self.on_corrupt)
    }

    /// Overwrite the stored lists.
    pub fn save(&self, info: &AdvertiseInfo) -> Result<()> {
        save_json(self.store.as_ref(), &self.key, info)
    }

    /// Append `field` to the allow-list. Returns false if it was already there.
    pub fn allow(&self, field: &str) -> Result<bool> {
        self.append(ListKind::Allow, field)
    }

    /// Append `field` to the deny-list. Returns false if it was already there.
    pub fn deny(&self, field: &str) -> Result<bool> {
        self.append(ListKind::Deny, field)
    }

    pub fn append(&self, kind: ListKind, field: &str) -> Result<bool> {
        if field.trim().is_empty() {
            return Err(AdsieveError::BadRequest("list entry must not be empty".into()));
        }

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AdsieveError::Internal("lists write lock poisoned".into()))?;

        let mut info = load_json(
            self.store.as_ref(),
            &self.key,
            AdvertiseInfo::default(),
            CorruptPolicy::Error,
        )?;
        let added = match kind {
            ListKind::Allow => info.allow(field),
            ListKind::Deny => info.deny(field),
        };
        if added {
            self.save(&info)?;
            info!(key = %self.key, list = kind.as_str(), field, "list entry added");
        }
        Ok(added)
    }
}
