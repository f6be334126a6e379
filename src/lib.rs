//! LRU TTL Cache - A bounded in-memory key/value cache server
//!
//! Entries are evicted least-recently-used first when the cache is full and
//! removed automatically once their time-to-live elapses.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::Cache;
pub use config::Config;
pub use tasks::spawn_expiry_task;
