//! Cache Store Module
//!
//! Single-threaded cache core: key index, recency list and expiry queue kept
//! in lock-step. Thread safety is layered on top by [`crate::cache::Cache`].

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, ExpiryQueue, LruList, NodeHandle};

// == Cache Store ==
/// Bounded key/value storage with LRU eviction and per-key expiration.
///
/// After every public method returns:
/// - the index and the recency list hold exactly the same entries,
/// - the number of entries never exceeds `capacity`,
/// - every entry has exactly one pending deadline in the expiry queue.
#[derive(Debug)]
pub struct CacheStore {
    /// Key to list node
    index: HashMap<String, NodeHandle>,
    /// Entries ordered from most to least recently used
    lru: LruList<CacheEntry>,
    /// Pending expiration deadlines
    expiry: ExpiryQueue,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Source of deadline identities
    next_generation: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            index: HashMap::with_capacity(capacity),
            lru: LruList::with_capacity(capacity),
            expiry: ExpiryQueue::new(),
            stats: CacheStats::new(),
            capacity,
            next_generation: 0,
        }
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// Does not extend the entry's TTL. An entry whose deadline has passed but
    /// has not yet been reaped is removed here and reported as absent.
    pub fn get(&mut self, key: &str, now: Instant) -> Option<String> {
        let Some(&handle) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let expired = self
            .lru
            .get(handle)
            .map_or(true, |entry| entry.is_expired_at(now));
        if expired {
            self.remove_handle(key, handle);
            self.stats.record_expiration();
            self.stats.record_miss();
            return None;
        }

        self.lru.move_to_front(handle);
        self.stats.record_hit();
        self.lru.get(handle).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores a key-value pair expiring `ttl` from `now`.
    ///
    /// Overwriting an existing key replaces its value, moves it to the front
    /// and restarts its expiration clock. Inserting a new key into a full
    /// cache evicts the least recently used entry first.
    ///
    /// A zero `ttl` is never admitted: the key is removed if present and
    /// nothing is inserted.
    pub fn set(&mut self, key: String, value: String, ttl: Duration, now: Instant) {
        if ttl.is_zero() {
            if self.delete(&key) {
                debug!(key = %key, "zero ttl removed existing entry");
            }
            return;
        }

        let generation = self.bump_generation();

        if let Some(&handle) = self.index.get(&key) {
            if let Some(entry) = self.lru.get_mut(handle) {
                let (old_expires_at, old_generation) = entry.refresh(value, generation, ttl, now);
                let expires_at = entry.expires_at;
                self.expiry.cancel(old_expires_at, old_generation);
                self.expiry.schedule(expires_at, generation, key);
                self.lru.move_to_front(handle);
                return;
            }
        }

        if self.index.len() >= self.capacity {
            self.evict();
        }

        let entry = CacheEntry::new(key.clone(), value, generation, ttl, now);
        self.expiry.schedule(entry.expires_at, generation, key.clone());
        let handle = self.lru.push_front(entry);
        self.index.insert(key, handle);
        self.stats.set_total_entries(self.index.len());
    }

    // == Delete ==
    /// Removes an entry and cancels its deadline.
    ///
    /// Returns false if the key was absent.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.index.get(key) {
            Some(&handle) => {
                self.remove_handle(key, handle);
                true
            }
            None => false,
        }
    }

    // == Evict ==
    /// Removes the least recently used entry. Returns its key.
    fn evict(&mut self) -> Option<String> {
        let entry = self.lru.pop_back()?;
        self.index.remove(&entry.key);
        self.expiry.cancel(entry.expires_at, entry.generation);
        self.stats.record_eviction();
        self.stats.set_total_entries(self.index.len());
        debug!(key = %entry.key, "evicted least recently used entry");
        Some(entry.key)
    }

    // == Expire Due ==
    /// Removes every entry whose deadline is at or before `now`.
    ///
    /// A fired deadline only removes the entry it was armed for: if the key
    /// has since been overwritten, evicted or re-inserted, the generation no
    /// longer matches and the deadline is dropped.
    ///
    /// Returns the number of entries removed.
    pub fn expire_due(&mut self, now: Instant) -> usize {
        let mut removed = 0;

        for (generation, key) in self.expiry.pop_due(now) {
            let Some(&handle) = self.index.get(&key) else {
                trace!(key = %key, "stale deadline for absent key");
                continue;
            };
            let current = self.lru.get(handle).map(|entry| entry.generation);
            if current != Some(generation) {
                trace!(key = %key, generation, "stale deadline for replaced entry");
                continue;
            }

            self.index.remove(&key);
            self.lru.remove(handle);
            self.stats.record_expiration();
            removed += 1;
        }

        if removed > 0 {
            self.stats.set_total_entries(self.index.len());
        }
        removed
    }

    // == Next Deadline ==
    /// Returns the earliest pending expiration.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.expiry.next_deadline()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if the key is indexed, without touching recency.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.lru.iter().map(|entry| entry.key.clone()).collect()
    }

    // == Consistency Check ==
    /// Verifies that index, recency list and expiry queue agree.
    pub fn is_consistent(&self) -> bool {
        if self.index.len() != self.lru.len() || self.index.len() > self.capacity {
            return false;
        }
        if self.expiry.len() != self.index.len() {
            return false;
        }

        let mut walked = 0;
        for entry in self.lru.iter() {
            walked += 1;
            let indexed = self
                .index
                .get(&entry.key)
                .and_then(|&handle| self.lru.get(handle))
                .map_or(false, |found| found.generation == entry.generation);
            if !indexed || !self.expiry.contains(entry.expires_at, entry.generation) {
                return false;
            }
        }
        walked == self.index.len()
    }

    // == Internal Helpers ==
    fn remove_handle(&mut self, key: &str, handle: NodeHandle) {
        self.index.remove(key);
        if let Some(entry) = self.lru.remove(handle) {
            self.expiry.cancel(entry.expires_at, entry.generation);
        }
        self.stats.set_total_entries(self.index.len());
    }

    fn bump_generation(&mut self) -> u64 {
        self.next_generation = self.next_generation.wrapping_add(1);
        self.next_generation
    }
}
