//! # Rates Manager
//!
//! Periodically fetches exchange rates from a [`RateSource`] and hands every
//! successful result to the registered listeners.
//!
//! ## Architecture
//!
//! - `manager` - Public lifecycle API (`start` / `stop` / `add_listener`)
//! - `scheduler` - Fixed-rate worker task and the fetch-and-notify cycle
//! - `listeners` - Listener registry with per-listener panic isolation
//! - `error_policy` - Logs fetch failures so they never end a schedule
//!
//! The manager is generic over `S: RateSource`; [`RatesManager::builder`]
//! wires in the freecurrencyapi.com client.
//!
//! [`RateSource`]: rates_types::RateSource

mod builder;
mod error_policy;
mod listeners;
mod manager;
mod scheduler;


pub use builder::RatesManagerBuilder;
pub use manager::RatesManager;

pub use rates_types::{
    CurrencyCode, FetchError, ManagerConfig, ManagerError, RateMap, RateSnapshot, RateSource,
    RatesUpdateListener, ScheduleId, TimeUnit,
};
