//! Cache Module
//!
//! Bounded in-memory caching with LRU eviction and per-key TTL expiration.

mod engine;
mod entry;
mod expiry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use engine::Cache;
pub use entry::CacheEntry;
pub use expiry::ExpiryQueue;
pub use lru::{LruList, NodeHandle};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default number of entries a cache holds
pub const DEFAULT_CAPACITY: usize = 1024;
