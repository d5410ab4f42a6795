//! Immutable rate snapshots delivered to listeners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::CurrencyCode;

/// Raw currency-code to rate mapping as returned by a rate source.
pub type RateMap = HashMap<String, f64>;

/// The rates produced by one successful fetch cycle.
///
/// Rates are relative to `base`; `None` means the source's default base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    base: Option<CurrencyCode>,
    rates: RateMap,
    fetched_at: DateTime<Utc>,
}

impl RateSnapshot {
    /// Creates a snapshot stamped with the current time.
    pub fn new(base: Option<CurrencyCode>, rates: RateMap) -> Self {
        Self {
            base,
            rates,
            fetched_at: Utc::now(),
        }
    }

    pub fn base(&self) -> Option<&CurrencyCode> {
        self.base.as_ref()
    }

    pub fn rates(&self) -> &RateMap {
        &self.rates
    }

    /// Returns the rate for `code`, if the snapshot has one.
    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    /// Consumes the snapshot, returning the rate map.
    pub fn into_rates(self) -> RateMap {
        self.rates
    }
}
