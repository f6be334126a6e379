//! Cache Engine Module
//!
//! Thread-safe handle over a [`CacheStore`], shared by the HTTP handlers and
//! the expiry task.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::futures::Notified;
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;

struct Shared {
    store: Mutex<CacheStore>,
    /// Signalled whenever the earliest pending deadline changes
    deadline_changed: Notify,
}

// == Cache ==
/// Bounded expiring LRU cache.
///
/// Cloning is cheap and yields another handle to the same cache. Every
/// operation takes one exclusive lock for its whole duration, so calls are
/// linearizable with respect to each other and to expiration sweeps. The lock
/// is never held across an `.await`.
#[derive(Clone)]
pub struct Cache {
    shared: Arc<Shared>,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                store: Mutex::new(CacheStore::new(capacity)),
                deadline_changed: Notify::new(),
            }),
        }
    }

    /// Creates a cache sized from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_entries)
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&self, key: &str) -> Option<String> {
        self.shared.store.lock().get(key, Instant::now())
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// Any previous deadline for the key is cancelled before this returns.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        let changed = {
            let mut store = self.shared.store.lock();
            let before = store.next_deadline();
            store.set(key.into(), value.into(), ttl, Instant::now());
            store.next_deadline() != before
        };

        if changed {
            self.shared.deadline_changed.notify_one();
        }
    }

    // == Delete ==
    /// Removes `key` and cancels its deadline. Absent keys are a no-op.
    pub fn delete(&self, key: &str) -> bool {
        self.shared.store.lock().delete(key)
    }

    // == Expiration Hooks ==
    /// Removes every entry whose deadline has passed.
    pub fn expire_due(&self) -> usize {
        self.shared.store.lock().expire_due(Instant::now())
    }

    /// Returns the earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.shared.store.lock().next_deadline()
    }

    /// Resolves once the earliest deadline may have changed.
    ///
    /// Create the future before reading [`Cache::next_deadline`] so a change in
    /// between is not missed.
    pub fn deadline_changed(&self) -> Notified<'_> {
        self.shared.deadline_changed.notified()
    }

    // == Introspection ==
    pub fn stats(&self) -> CacheStats {
        self.shared.store.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.shared.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.store.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.shared.store.lock().capacity()
    }

    /// Verifies index, recency list and deadlines agree.
    pub fn is_consistent(&self) -> bool {
        self.shared.store.lock().is_consistent()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.shared.store.lock();
        f.debug_struct("Cache")
            .field("len", &store.len())
            .field("capacity", &store.capacity())
            .finish()
    }
}
