//! adsieve core: protobuf wire primitives, ad classification, and the pure
//! request transform.
//!
//! This crate carries no transport or runtime dependencies so the transform can
//! be embedded in any request-intercept host (HTTP gateway, proxy plugin,
//! test harness).
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every fallible path surfaces as `AdsieveError`/`Result` so a hostile or
//! truncated payload can never take the host process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod advertise;
pub mod error;
pub mod protocol;
pub mod transform;

/// Shared result type.
pub use error::{AdsieveError, Result};
pub use advertise::{AdvertiseInfo, Verdict};
pub use transform::{transform, FieldLayout, Limits, Transformed};
