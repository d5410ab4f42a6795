//! Rates manager: lifecycle of the recurring fetch and listener registration.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rates_types::{
    ManagerConfig, ManagerError, RateSource, RatesUpdateListener, ScheduleId, TimeUnit,
};
use tokio::runtime::Handle;

use crate::scheduler::{CycleRunner, ScheduleHandle, spawn_schedule};

/// Periodically retrieves the latest exchange rates and notifies listeners.
///
/// Starts out stopped. [`start`](Self::start) and [`stop`](Self::stop) may be
/// called any number of times, alternating; at most one schedule is active
/// per manager. Dropping the manager stops its schedule.
pub struct RatesManager<S: RateSource + 'static> {
    runner: Arc<CycleRunner<S>>,
    schedule: Mutex<Option<ScheduleHandle>>,
}

impl<S: RateSource + 'static> RatesManager<S> {
    /// Creates a stopped manager over `source`.
    pub fn new(source: S, config: ManagerConfig) -> Self {
        Self {
            runner: Arc::new(CycleRunner::new(source, config)),
            schedule: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        self.runner.config()
    }

    /// Adds a listener for updated rates. Registering the same `Arc` again
    /// has no effect and returns `false`.
    pub fn add_listener(&self, listener: Arc<dyn RatesUpdateListener>) -> bool {
        self.runner.listeners.add(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.runner.listeners.len()
    }

    /// Starts retrieving updates every `interval` `unit`s, beginning now.
    pub fn start(&self, interval: u64, unit: TimeUnit) -> Result<ScheduleId, ManagerError> {
        self.start_every(unit.to_duration(interval)?)
    }

    /// Starts retrieving updates every `every`, beginning now.
    ///
    /// # Errors
    /// - [`ManagerError::InvalidArgument`] if `every` is zero
    /// - [`ManagerError::AlreadyRunning`] if a schedule is active
    /// - [`ManagerError::NoRuntime`] if called outside a Tokio runtime
    pub fn start_every(&self, every: Duration) -> Result<ScheduleId, ManagerError> {
        if every.is_zero() {
            return Err(ManagerError::InvalidArgument(
                "Interval must be positive".into(),
            ));
        }

        let mut schedule = self.lock_schedule();
        if schedule.is_some() {
            return Err(ManagerError::AlreadyRunning);
        }

        let runtime = Handle::try_current().map_err(|_| ManagerError::NoRuntime)?;
        let handle = spawn_schedule(&runtime, Arc::clone(&self.runner), every);
        let id = handle.id;
        *schedule = Some(handle);
        Ok(id)
    }

    /// Stops retrieving updates.
    ///
    /// A cycle already in progress finishes and still notifies; no new
    /// cycle begins once this returns.
    pub fn stop(&self) -> Result<(), ManagerError> {
        let handle = self.lock_schedule().take().ok_or(ManagerError::NotRunning)?;
        handle.cancel();
        tracing::debug!(schedule_id = %handle.id, "rates schedule cancelled");
        Ok(())
    }

    /// Like [`stop`](Self::stop), but also waits for an in-flight cycle to
    /// complete.
    pub async fn stop_and_wait(&self) -> Result<(), ManagerError> {
        let handle = self.lock_schedule().take().ok_or(ManagerError::NotRunning)?;
        handle.cancel_and_join().await;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.lock_schedule().is_some()
    }

    /// Identifier of the active schedule, if any.
    pub fn schedule_id(&self) -> Option<ScheduleId> {
        self.lock_schedule().as_ref().map(|handle| handle.id)
    }

    fn lock_schedule(&self) -> MutexGuard<'_, Option<ScheduleHandle>> {
        self.schedule.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: RateSource + 'static> Drop for RatesManager<S> {
    fn drop(&mut self) {
        let schedule = self
            .schedule
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = schedule.take() {
            handle.cancel();
        }
    }
}

impl<S: RateSource + 'static> std::fmt::Debug for RatesManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatesManager")
            .field("config", self.config())
            .field("listeners", &self.runner.listeners)
            .field("schedule_id", &self.schedule_id())
            .finish()
    }
}
