//! Allow/deny lists and field classification.
//!
//! Precedence: allow-list first, then deny-list. A field on neither list is
//! `Unknown`, which callers treat as "not an ad".

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Persisted allow/deny list pair.
///
/// JSON shape is fixed: `{"whiteList": [...], "blackList": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertiseInfo {
    #[serde(default)]
    pub white_list: Vec<String>,
    #[serde(default)]
    pub black_list: Vec<String>,
}

/// Classification outcome for a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    NotAd,
    Ad,
    /// On neither list. Not treated as an ad.
    Unknown,
}

impl Verdict {
    pub fn is_ad(self) -> bool {
        matches!(self, Verdict::Ad)
    }

    /// Label used in logs, metrics and the verdict response header.
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::NotAd => "not_ad",
            Verdict::Ad => "ad",
            Verdict::Unknown => "unknown",
        }
    }
}

impl AdvertiseInfo {
    pub fn new(white_list: Vec<String>, black_list: Vec<String>) -> Self {
        Self { white_list, black_list }
    }

    /// Classify a decoded field value. `None` means the field was absent.
    pub fn classify(&self, field: Option<&str>) -> Verdict {
        let Some(field) = field else {
            debug!("classification field absent");
            return Verdict::Unknown;
        };

        if self.white_list.iter().any(|w| w == field) {
            return Verdict::NotAd;
        }
        if self.black_list.iter().any(|b| b == field) {
            return Verdict::Ad;
        }

        debug!(field, "field might be an ad");
        Verdict::Unknown
    }

    /// Append to the allow-list. Returns false if already present.
    pub fn allow(&mut self, field: &str) -> bool {
        push_unique(&mut self.white_list, field)
    }

    /// Append to the deny-list. Returns false if already present.
    pub fn deny(&mut self, field: &str) -> bool {
        push_unique(&mut self.black_list, field)
    }
}

fn push_unique(list: &mut Vec<String>, field: &str) -> bool {
    if list.iter().any(|x| x == field) {
        return false;
    }
    list.push(field.to_string());
    true
}
