//! Protobuf wire-format parsing and encoding (panic-free).
//!
//! Parsing rules:
//! - Never index (`buf[0]`); always go through `Buf` with `remaining()` checks.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.
//! - Length-delimited values are kept as zero-copy `Bytes` slices of the input;
//!   nested messages are only decoded when a path walks into them.
//!
//! Group wire types (3/4) are rejected: no request this crate handles uses them.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{AdsieveError, Result};

/// Wire type: varint.
pub const WIRE_VARINT: u8 = 0;
/// Wire type: 64-bit little endian.
pub const WIRE_FIXED64: u8 = 1;
/// Wire type: length-delimited (strings, bytes, embedded messages).
pub const WIRE_LEN: u8 = 2;
/// Wire type: group start (unsupported).
pub const WIRE_START_GROUP: u8 = 3;
/// Wire type: group end (unsupported).
pub const WIRE_END_GROUP: u8 = 4;
/// Wire type: 32-bit little endian.
pub const WIRE_FIXED32: u8 = 5;

/// Largest field number allowed by the protobuf encoding.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

const MAX_VARINT_LEN: usize = 10;

/// A single decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    Varint(u64),
    Fixed64(u64),
    /// Raw bytes of a string, bytes or embedded message field.
    Len(Bytes),
    Fixed32(u32),
}

impl WireValue {
    /// Wire type tag for this value.
    pub fn wire_type(&self) -> u8 {
        match self {
            WireValue::Varint(_) => WIRE_VARINT,
            WireValue::Fixed64(_) => WIRE_FIXED64,
            WireValue::Len(_) => WIRE_LEN,
            WireValue::Fixed32(_) => WIRE_FIXED32,
        }
    }

    /// Borrow the payload of a length-delimited value.
    pub fn as_len(&self) -> Option<&Bytes> {
        match self {
            WireValue::Len(b) => Some(b),
            _ => None,
        }
    }

    fn encoded_len(&self) -> usize {
        match self {
            WireValue::Varint(v) => varint_len(*v),
            WireValue::Fixed64(_) => 8,
            WireValue::Len(b) => varint_len(b.len() as u64) + b.len(),
            WireValue::Fixed32(_) => 4,
        }
    }
}

/// One field occurrence (a message may repeat a field number).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub number: u32,
    pub value: WireValue,
}

/// A decoded message: fields in wire order, unknown fields included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub fields: Vec<Field>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Append a field occurrence.
    pub fn push(&mut self, number: u32, value: WireValue) {
        self.fields.push(Field { number, value });
    }

    /// Last occurrence of `number` (protobuf "last one wins" for scalars).
    pub fn last(&self, number: u32) -> Option<&Field> {
        self.fields.iter().rev().find(|f| f.number == number)
    }

    /// Mutable access to all occurrences of `number`.
    pub fn all_mut(&mut self, number: u32) -> impl Iterator<Item = &mut Field> + '_ {
        self.fields.iter_mut().filter(move |f| f.number == number)
    }

    /// Replace every occurrence of `number` with a single `value`.
    ///
    /// The new occurrence takes the slot of the first removed one, or is
    /// appended when the field was absent.
    pub fn replace_all(&mut self, number: u32, value: WireValue) {
        let first = self.fields.iter().position(|f| f.number == number);
        self.fields.retain(|f| f.number != number);
        let field = Field { number, value };
        match first {
            Some(idx) => self.fields.insert(idx, field),
            None => self.fields.push(field),
        }
    }

    /// Exact size of `encode_message(self)`.
    pub fn encoded_len(&self) -> usize {
        self.fields
            .iter()
            .map(|f| varint_len(tag(f.number, f.value.wire_type())) + f.value.encoded_len())
            .sum()
    }
}

/// Decode a message from bytes.
pub fn decode_message(mut buf: Bytes) -> Result<Message> {
    let mut msg = Message::new();

    while buf.has_remaining() {
        let key = get_varint(&mut buf)?;
        let wire_type = (key & 0x07) as u8;
        let number = key >> 3;

        if number == 0 || number > MAX_FIELD_NUMBER as u64 {
            return Err(AdsieveError::malformed(format!("invalid field number: {number}")));
        }
        let number = number as u32;

        let value = match wire_type {
            WIRE_VARINT => WireValue::Varint(get_varint(&mut buf)?),
            WIRE_FIXED64 => {
                if buf.remaining() < 8 {
                    return Err(AdsieveError::malformed(format!(
                        "field {number}: truncated fixed64"
                    )));
                }
                WireValue::Fixed64(buf.get_u64_le())
            }
            WIRE_LEN => {
                let len = get_varint(&mut buf)?;
                if len > buf.remaining() as u64 {
                    return Err(AdsieveError::malformed(format!(
                        "field {number}: length {len} overruns buffer ({} left)",
                        buf.remaining()
                    )));
                }
                WireValue::Len(buf.split_to(len as usize))
            }
            WIRE_FIXED32 => {
                if buf.remaining() < 4 {
                    return Err(AdsieveError::malformed(format!(
                        "field {number}: truncated fixed32"
                    )));
                }
                WireValue::Fixed32(buf.get_u32_le())
            }
            WIRE_START_GROUP | WIRE_END_GROUP => {
                return Err(AdsieveError::malformed(format!(
                    "field {number}: group wire type unsupported"
                )));
            }
            other => {
                return Err(AdsieveError::malformed(format!(
                    "field {number}: invalid wire type {other}"
                )));
            }
        };

        msg.push(number, value);
    }

    Ok(msg)
}

/// Encode a message to bytes. Infallible: every `Message` is encodable.
pub fn encode_message(msg: &Message) -> Bytes {
    let mut out = BytesMut::with_capacity(msg.encoded_len());
    for f in &msg.fields {
        put_varint(&mut out, tag(f.number, f.value.wire_type()));
        match &f.value {
            WireValue::Varint(v) => put_varint(&mut out, *v),
            WireValue::Fixed64(v) => out.put_u64_le(*v),
            WireValue::Len(b) => {
                put_varint(&mut out, b.len() as u64);
                out.put_slice(b);
            }
            WireValue::Fixed32(v) => out.put_u32_le(*v),
        }
    }
    out.freeze()
}

fn tag(number: u32, wire_type: u8) -> u64 {
    ((number as u64) << 3) | wire_type as u64
}

fn get_varint(buf: &mut Bytes) -> Result<u64> {
    let mut value: u64 = 0;
    for i in 0..MAX_VARINT_LEN {
        if !buf.has_remaining() {
            return Err(AdsieveError::malformed("truncated varint"));
        }
        let byte = buf.get_u8();
        // 10th byte may only carry the final bit of a u64.
        if i == MAX_VARINT_LEN - 1 && byte > 0x01 {
            return Err(AdsieveError::malformed("varint overflows u64"));
        }
        value |= ((byte & 0x7f) as u64) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(AdsieveError::malformed("varint too long"))
}

fn put_varint(out: &mut BytesMut, mut v: u64) {
    while v >= 0x80 {
        out.put_u8((v as u8 & 0x7f) | 0x80);
        v >>= 7;
    }
    out.put_u8(v as u8);
}

fn varint_len(v: u64) -> usize {
    let bits = 64 - (v | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}
