//! Fixed-rate worker task and the fetch-and-notify cycle.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use rates_types::{FetchError, ManagerConfig, RateSnapshot, RateSource, ScheduleId};
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::error_policy::report_fetch_failure;
use crate::listeners::{ListenerRegistry, panic_message};

/// Result of one fetch-and-notify cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CycleOutcome {
    /// Rates were fetched and `listeners` listeners completed normally.
    Delivered { listeners: usize },
    /// The fetch failed; nobody was notified.
    Failed,
}

/// Everything a cycle needs, shared between the manager and its worker.
pub(crate) struct CycleRunner<S> {
    source: S,
    config: ManagerConfig,
    pub(crate) listeners: ListenerRegistry,
    // Held for the whole of a cycle so cycles never overlap, even across a
    // stop/start pair.
    serial: Mutex<()>,
}

impl<S: RateSource> CycleRunner<S> {
    pub(crate) fn new(source: S, config: ManagerConfig) -> Self {
        Self {
            source,
            config,
            listeners: ListenerRegistry::new(),
            serial: Mutex::new(()),
        }
    }

    pub(crate) fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Runs one cycle unless `cancel` fires before the previous cycle
    /// releases the serial lock.
    pub(crate) async fn run_cycle(&self, cancel: &CancellationToken) -> Option<CycleOutcome> {
        let _serial = self.serial.lock().await;
        if cancel.is_cancelled() {
            return None;
        }
        Some(self.fetch_and_notify().await)
    }

    async fn fetch_and_notify(&self) -> CycleOutcome {
        // A panicking source counts as a failed fetch; the worker must outlive it.
        let fetched = AssertUnwindSafe(
            self.source
                .fetch_latest(self.config.base_currency(), self.config.currencies()),
        )
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| {
            Err(FetchError::transport(format!(
                "rate source panicked: {}",
                panic_message(&*payload)
            )))
        });

        match fetched {
            Ok(rates) => {
                let snapshot = RateSnapshot::new(self.config.base_currency().cloned(), rates);
                let listeners = self.listeners.notify_all(&snapshot);
                CycleOutcome::Delivered { listeners }
            }
            Err(err) => {
                report_fetch_failure(&err);
                CycleOutcome::Failed
            }
        }
    }
}

/// The currently active recurring task of a manager.
pub(crate) struct ScheduleHandle {
    pub(crate) id: ScheduleId,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ScheduleHandle {
    /// Prevents further cycles. A cycle already running is left alone.
    pub(crate) fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Cancels and waits for the worker (and any in-flight cycle) to finish.
    pub(crate) async fn cancel_and_join(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!(schedule_id = %self.id, "rates worker ended abnormally: {}", e);
        }
    }
}

/// Spawns the worker for a new schedule on `runtime`.
///
/// The first cycle runs immediately, later ones every `every` measured
/// from the original start (fixed rate). A cycle that overruns makes the
/// missed ticks fire back to back as soon as it completes.
pub(crate) fn spawn_schedule<S>(
    runtime: &Handle,
    runner: Arc<CycleRunner<S>>,
    every: Duration,
) -> ScheduleHandle
where
    S: RateSource + 'static,
{
    let id = ScheduleId::new();
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let task = runtime.spawn(async move {
        tracing::info!(schedule_id = %id, interval = ?every, "rates schedule started");

        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            match runner.run_cycle(&token).await {
                Some(CycleOutcome::Delivered { listeners }) => {
                    tracing::debug!(schedule_id = %id, listeners, "rates delivered");
                }
                // Already reported by the error policy.
                Some(CycleOutcome::Failed) => {}
                None => break,
            }
        }

        tracing::info!(schedule_id = %id, "rates schedule stopped");
    });

    ScheduleHandle { id, cancel, task }
}
