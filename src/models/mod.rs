//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! query-string extraction and JSON response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{GetParams, SetCommand, SetParams};
pub use responses::{HealthResponse, MessageResponse, StatsResponse};
