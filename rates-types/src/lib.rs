//! # Rates Types
//!
//! Domain types and port traits for the exchange rate watcher.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the workspace:
//! - `domain/` - Currency codes, rate snapshots, manager configuration
//! - `ports/` - Traits that rate sources and listeners implement
//! - `error/` - Lifecycle and fetch error types

pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CurrencyCode, ManagerConfig, RateMap, RateSnapshot, ScheduleId, TimeUnit};
pub use error::{FetchError, ManagerError};
pub use ports::{RateSource, RatesUpdateListener};
