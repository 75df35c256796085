//! Pure request transform: decode, classify, strip, encode.
//!
//! No I/O, no logging side channels beyond `tracing` events, no shared state.
//! Callers pass the lists and layout per invocation; fail-open handling lives
//! in the host (see the gateway interceptor).

use bytes::Bytes;

use crate::advertise::{AdvertiseInfo, Verdict};
use crate::error::{AdsieveError, Result};
use crate::protocol::path::{read_string, set_message};
use crate::protocol::{decode_message, encode_message, FieldPath, Message};

/// Default cap on request payload size (1 MiB).
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 1024 * 1024;

/// Where the inspected fields live inside the request message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    /// String field checked against the lists.
    pub classify: FieldPath,
    /// Sub-message cleared when the request is classified as an ad.
    pub ad_signals: FieldPath,
}

impl Default for FieldLayout {
    fn default() -> Self {
        // videoId (2) and context.adSignalsInfo (1.9) of a player request.
        Self {
            classify: FieldPath(vec![2]),
            ad_signals: FieldPath(vec![1, 9]),
        }
    }
}

/// Size limits applied before decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_payload_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

/// Result of one transform.
#[derive(Debug, Clone)]
pub struct Transformed {
    /// Bytes to send on. Identical to the input unless `stripped`.
    pub payload: Bytes,
    pub verdict: Verdict,
    /// Classification field value, if present.
    pub field: Option<String>,
    /// Whether the ad-signals field was cleared.
    pub stripped: bool,
}

/// Decode the raw request payload.
pub fn decode_request(raw: Bytes, limits: &Limits) -> Result<Message> {
    if raw.len() > limits.max_payload_bytes {
        return Err(AdsieveError::PayloadTooLarge {
            len: raw.len(),
            max: limits.max_payload_bytes,
        });
    }
    decode_message(raw)
}

/// Clear the ad-signals sub-message (set it to an empty message).
pub fn strip_ad_signals(msg: &mut Message, layout: &FieldLayout) -> Result<()> {
    set_message(msg, &layout.ad_signals, &Message::new())
}

/// Run the full transform on one payload.
pub fn transform(
    raw: Bytes,
    info: &AdvertiseInfo,
    layout: &FieldLayout,
    limits: &Limits,
) -> Result<Transformed> {
    let mut msg = decode_request(raw.clone(), limits)?;

    let field = read_string(&msg, &layout.classify);
    let verdict = info.classify(field.as_deref());

    if !verdict.is_ad() {
        return Ok(Transformed {
            payload: raw,
            verdict,
            field,
            stripped: false,
        });
    }

    strip_ad_signals(&mut msg, layout)?;
    Ok(Transformed {
        payload: encode_message(&msg),
        verdict,
        field,
        stripped: true,
    })
}
