//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the server.
//!
//! # Tasks
//! - Expiry: Removes cache entries as their TTL deadlines elapse

mod expiry;

pub use expiry::spawn_expiry_task;
