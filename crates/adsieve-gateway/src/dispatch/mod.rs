//! Dispatch collaborators: where a transformed payload goes next.
//!
//! Re-exports the sink trait and built-in sinks so downstream consumers can
//! depend on this module directly.

pub mod sink;

pub use sink::{ChannelSink, LogSink, PayloadSink, ReplySink};
