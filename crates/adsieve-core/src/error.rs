//! Shared error type across adsieve crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / bad argument.
    BadRequest,
    /// Payload exceeds the configured limit.
    PayloadTooLarge,
    /// Payload is not valid protobuf wire data.
    Malformed,
    /// Persisted state could not be read or written.
    Storage,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs, metrics labels and JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::Malformed => "MALFORMED",
            ClientCode::Storage => "STORAGE",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, AdsieveError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum AdsieveError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {len} > {max}")]
    PayloadTooLarge { len: usize, max: usize },
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("storage: {0}")]
    Storage(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl AdsieveError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            AdsieveError::BadRequest(_) => ClientCode::BadRequest,
            AdsieveError::PayloadTooLarge { .. } => ClientCode::PayloadTooLarge,
            AdsieveError::Malformed(_) => ClientCode::Malformed,
            AdsieveError::Storage(_) => ClientCode::Storage,
            AdsieveError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            AdsieveError::Internal(_) => ClientCode::Internal,
        }
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        AdsieveError::Malformed(msg.into())
    }
}
