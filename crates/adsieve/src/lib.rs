//! Top-level facade crate for adsieve.
//!
//! Re-exports the core codec/classifier and the gateway library so users can depend on a single crate.

pub mod core {
    pub use adsieve_core::*;
}

pub mod gateway {
    pub use adsieve_gateway::*;
}
