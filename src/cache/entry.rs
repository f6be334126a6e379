//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single live key with its value and expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The key this entry is indexed under
    pub key: String,
    /// The stored value
    pub value: String,
    /// Identity of the entry's current expiration deadline
    pub generation: u64,
    /// When the entry was first inserted
    pub created_at: Instant,
    /// When the entry expires
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` after `now`.
    pub fn new(key: String, value: String, generation: u64, ttl: Duration, now: Instant) -> Self {
        Self {
            key,
            value,
            generation,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    // == Refresh ==
    /// Replaces the value and restarts the expiration clock.
    ///
    /// Returns the previous `(expires_at, generation)` pair so the caller can
    /// cancel the deadline it identified.
    pub fn refresh(
        &mut self,
        value: String,
        generation: u64,
        ttl: Duration,
        now: Instant,
    ) -> (Instant, u64) {
        let previous = (self.expires_at, self.generation);
        self.value = value;
        self.generation = generation;
        self.expires_at = now + ttl;
        previous
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now` reaches the
    /// expiration instant, so a fully elapsed TTL never reads as live.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Checks if the entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the remaining TTL at `now`, or zero once expired.
    pub fn ttl_remaining_at(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}
