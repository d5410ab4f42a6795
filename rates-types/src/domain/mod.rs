//! Domain models for the exchange rate watcher.

pub mod config;
pub mod currency;
pub mod schedule;
pub mod snapshot;

pub use config::ManagerConfig;
pub use currency::CurrencyCode;
pub use schedule::{ScheduleId, TimeUnit};
pub use snapshot::{RateMap, RateSnapshot};
