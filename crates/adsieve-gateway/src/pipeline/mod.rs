//! Request pipeline: the fail-open interceptor around the pure core transform,
//! plus the timing decorator.

pub mod interceptor;
pub mod timing;

pub use interceptor::{Interceptor, Outcome};
