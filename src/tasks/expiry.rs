//! Expiry Task
//!
//! Background task that removes entries as their deadlines elapse.

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::Cache;

/// Spawns the task that services the cache's expiration deadlines.
///
/// A single loop sleeps until the earliest pending deadline, then takes the
/// cache lock once and removes every entry that is due. When a `Set` installs
/// a new earliest deadline the loop is woken and re-arms its sleep. The lock
/// is not held while waiting.
///
/// Returns a JoinHandle that can be aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Cache::new(1024);
/// let expiry_handle = spawn_expiry_task(cache.clone());
/// // Later, during shutdown:
/// expiry_handle.abort();
/// ```
pub fn spawn_expiry_task(cache: Cache) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting expiry task");

        loop {
            let changed = cache.deadline_changed();

            match cache.next_deadline() {
                Some(deadline) => {
                    tokio::select! {
                        _ = tokio::time::sleep_until(deadline) => {}
                        _ = changed => continue,
                    }
                }
                None => {
                    changed.await;
                    continue;
                }
            }

            let removed = cache.expire_due();
            if removed > 0 {
                debug!(removed, remaining = cache.len(), "expired entries removed");
            }
        }
    })
}
