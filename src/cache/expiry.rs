//! Expiry Queue Module
//!
//! Deadline-ordered queue of pending expirations, serviced by the expiry task.

use std::collections::BTreeMap;

use tokio::time::Instant;

// == Expiry Queue ==
/// Pending expiration deadlines ordered by time.
///
/// Each deadline is identified by `(expires_at, generation)`, so two entries
/// expiring at the same instant never collide and a cancelled deadline can be
/// removed exactly.
#[derive(Debug, Default)]
pub struct ExpiryQueue {
    deadlines: BTreeMap<(Instant, u64), String>,
}

impl ExpiryQueue {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Schedule ==
    /// Arms a deadline for `key`.
    pub fn schedule(&mut self, expires_at: Instant, generation: u64, key: String) {
        self.deadlines.insert((expires_at, generation), key);
    }

    // == Cancel ==
    /// Disarms a deadline. Returns false if it was not pending.
    pub fn cancel(&mut self, expires_at: Instant, generation: u64) -> bool {
        self.deadlines.remove(&(expires_at, generation)).is_some()
    }

    /// Returns true if the given deadline is pending.
    pub fn contains(&self, expires_at: Instant, generation: u64) -> bool {
        self.deadlines.contains_key(&(expires_at, generation))
    }

    // == Next Deadline ==
    /// Returns the earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.keys().next().map(|(at, _)| *at)
    }

    // == Pop Due ==
    /// Removes every deadline at or before `now`, earliest first.
    ///
    /// Returns `(generation, key)` pairs; the caller decides whether each one
    /// still refers to a live entry.
    pub fn pop_due(&mut self, now: Instant) -> Vec<(u64, String)> {
        let mut due = Vec::new();
        while let Some(entry) = self.deadlines.first_entry() {
            if entry.key().0 > now {
                break;
            }
            let ((_, generation), key) = entry.remove_entry();
            due.push((generation, key));
        }
        due
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
