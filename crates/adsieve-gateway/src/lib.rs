//! adsieve gateway library entry.
//!
//! This crate wires the config store, allow/deny lists, the fail-open
//! interceptor, dispatch sinks and the HTTP hook into one service. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod lists;
pub mod obs;
pub mod ops;
pub mod pipeline;
pub mod router;
pub mod store;
pub mod transport;
