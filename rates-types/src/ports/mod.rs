//! Port traits (interfaces for adapters).
//!
//! The rates manager depends on these traits, not on concrete sources or
//! observers.

mod listener;
mod source;

pub use listener::RatesUpdateListener;
pub use source::RateSource;
