//! Observer Registry Module
//!
//! Holds the callbacks notified after every successful cache write.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::warn;

type Observer<V> = Arc<dyn Fn(&V) + Send + Sync>;

// == Subscription Id ==
/// Token returned by [`ObserverRegistry::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

// == Observer Registry ==
/// Append-only list of observers, invoked in registration order.
pub struct ObserverRegistry<V> {
    observers: RwLock<Vec<(SubscriptionId, Observer<V>)>>,
    next_id: AtomicU64,
}

impl<V> ObserverRegistry<V> {
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    // == Subscribe ==
    /// Registers `observer` after all existing ones.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((id, Arc::new(observer)));
        id
    }

    // == Unsubscribe ==
    /// Removes the observer registered under `id`. Returns false if unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(registered, _)| *registered != id);
        observers.len() != before
    }

    // == Notify ==
    /// Calls every observer with `value`, returning how many panicked.
    ///
    /// The list is snapshotted first so observers may subscribe, unsubscribe
    /// or write to the cache themselves. A panicking observer is logged and
    /// skipped; the rest still run.
    pub fn notify(&self, value: &V) -> usize {
        let snapshot: Vec<(SubscriptionId, Observer<V>)> = self.observers.read().clone();

        let mut failures = 0;
        for (id, observer) in snapshot {
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| observer(value))) {
                failures += 1;
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                warn!(subscription = ?id, "Observer panicked: {}", message);
            }
        }
        failures
    }

    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.read().is_empty()
    }
}

impl<V> Default for ObserverRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}
