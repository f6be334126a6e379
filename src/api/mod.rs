//! API Module
//!
//! HTTP handlers and routing for the cache server.
//!
//! # Endpoints
//! - `/get?key=K` - Retrieve a value by key
//! - `/set?key=K&value=V&exp=MS` - Store a value with a TTL in milliseconds
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
