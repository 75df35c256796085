//! Transport layer (HTTP hook).
//!
//! A browser extension or intercepting proxy posts the raw request body to
//! `/v1/intercept` and forwards whatever comes back.

pub mod http;
