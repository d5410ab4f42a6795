//! Listener registry.
//!
//! Listeners are keyed by the address of their `Arc` allocation, so
//! registering the same `Arc` twice is a no-op while two separately
//! allocated listeners with equal contents are both kept.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rates_types::{RateSnapshot, RatesUpdateListener};

/// Set of update observers.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: DashMap<usize, Arc<dyn RatesUpdateListener>>,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers `listener`. Returns `false` if this exact `Arc` was
    /// already registered.
    pub(crate) fn add(&self, listener: Arc<dyn RatesUpdateListener>) -> bool {
        match self.listeners.entry(identity(&listener)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(listener);
                true
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Delivers `snapshot` to every registered listener, one after another.
    ///
    /// Registrations are copied out first, so a listener may register
    /// further listeners while being notified; those join from the next
    /// pass. A panicking listener is logged and skipped. Returns how many
    /// listeners completed normally.
    pub(crate) fn notify_all(&self, snapshot: &RateSnapshot) -> usize {
        let listeners: Vec<Arc<dyn RatesUpdateListener>> = self
            .listeners
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut delivered = 0;
        for listener in listeners {
            match catch_unwind(AssertUnwindSafe(|| listener.on_update(snapshot))) {
                Ok(()) => delivered += 1,
                Err(payload) => {
                    tracing::warn!(
                        panic = %panic_message(&*payload),
                        "rates listener panicked during update"
                    );
                }
            }
        }
        delivered
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn identity(listener: &Arc<dyn RatesUpdateListener>) -> usize {
    Arc::as_ptr(listener) as *const () as usize
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "non-string panic payload"
    }
}
