//! Field-number paths into nested messages.
//!
//! A path is written as dotted field numbers, e.g. `"1.9"` means "field 9 of the
//! message stored in field 1". Repeated occurrences follow protobuf merge
//! semantics: reads prefer the last occurrence, writes touch every occurrence.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;

use crate::error::{AdsieveError, Result};

use super::wire::{decode_message, encode_message, Message, WireValue, MAX_FIELD_NUMBER};

/// Reserved by the protobuf implementation; never valid in a path.
const RESERVED_FIELD_NUMBERS: std::ops::RangeInclusive<u32> = 19_000..=19_999;

/// Parsed, validated field-number path (never empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(pub(crate) Vec<u32>);

impl FieldPath {
    pub fn new(segments: Vec<u32>) -> Result<Self> {
        if segments.is_empty() {
            return Err(AdsieveError::BadRequest("field path must not be empty".into()));
        }
        for &n in &segments {
            if n == 0 || n > MAX_FIELD_NUMBER || RESERVED_FIELD_NUMBERS.contains(&n) {
                return Err(AdsieveError::BadRequest(format!(
                    "invalid field number in path: {n}"
                )));
            }
        }
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[u32] {
        &self.0
    }
}

impl FromStr for FieldPath {
    type Err = AdsieveError;

    fn from_str(s: &str) -> Result<Self> {
        let segments = s
            .split('.')
            .map(|seg| {
                seg.trim().parse::<u32>().map_err(|_| {
                    AdsieveError::BadRequest(format!("invalid field path: {s} (expected e.g. 1.9)"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for n in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{n}")?;
            first = false;
        }
        Ok(())
    }
}

/// Read a UTF-8 string at `path`.
///
/// Returns `None` when any segment is missing, an intermediate value is not a
/// decodable message, or the final value is not a valid UTF-8 string.
pub fn read_string(msg: &Message, path: &FieldPath) -> Option<String> {
    read_at(msg, path.segments())
}

fn read_at(msg: &Message, segs: &[u32]) -> Option<String> {
    match segs {
        [] => None,
        [last] => {
            let bytes = msg.last(*last)?.value.as_len()?;
            std::str::from_utf8(bytes).ok().map(str::to_owned)
        }
        [head, rest @ ..] => msg
            .fields
            .iter()
            .rev()
            .filter(|f| f.number == *head)
            .filter_map(|f| f.value.as_len())
            .filter_map(|b| decode_message(b.clone()).ok())
            .find_map(|child| read_at(&child, rest)),
    }
}

/// Replace the value at `path` with `value` (encoded as a length-delimited field).
///
/// Missing intermediate messages are created. An intermediate occurrence that
/// is not a length-delimited message is a `Malformed` error.
pub fn set_message(msg: &mut Message, path: &FieldPath, value: &Message) -> Result<()> {
    set_at(msg, path.segments(), encode_message(value))
}

fn set_at(msg: &mut Message, segs: &[u32], value: Bytes) -> Result<()> {
    match segs {
        [] => Err(AdsieveError::BadRequest("field path must not be empty".into())),
        [last] => {
            msg.replace_all(*last, WireValue::Len(value));
            Ok(())
        }
        [head, rest @ ..] => {
            let mut touched = false;
            for field in msg.all_mut(*head) {
                let WireValue::Len(raw) = &field.value else {
                    return Err(AdsieveError::malformed(format!(
                        "field {head} is not a message (wire type {})",
                        field.value.wire_type()
                    )));
                };
                let mut child = decode_message(raw.clone())?;
                set_at(&mut child, rest, value.clone())?;
                field.value = WireValue::Len(encode_message(&child));
                touched = true;
            }

            if !touched {
                let mut child = Message::new();
                set_at(&mut child, rest, value)?;
                msg.push(*head, WireValue::Len(encode_message(&child)));
            }
            Ok(())
        }
    }
}
