//! Listener port for rate updates.

use crate::domain::RateSnapshot;

/// Receives the rates of every successful fetch cycle.
///
/// Called from the scheduler's task, one listener at a time, so
/// implementations should return promptly.
pub trait RatesUpdateListener: Send + Sync {
    fn on_update(&self, rates: &RateSnapshot);
}

impl<F> RatesUpdateListener for F
where
    F: Fn(&RateSnapshot) + Send + Sync,
{
    fn on_update(&self, rates: &RateSnapshot) {
        self(rates)
    }
}
