//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{GetParams, HealthResponse, MessageResponse, SetParams, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Thread-safe cache handle
    pub cache: Cache,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Cache::from_config(config))
    }
}

/// Handler for `/get?key=K`
///
/// Returns the stored value as the response message.
pub async fn get_handler(
    State(state): State<AppState>,
    Query(params): Query<GetParams>,
) -> Result<Json<MessageResponse>> {
    let key = params.key()?;

    match state.cache.get(key) {
        Some(value) => Ok(Json(MessageResponse::new(value))),
        None => Err(CacheError::NotFound(key.to_string())),
    }
}

/// Handler for `/set?key=K&value=V&exp=MS`
///
/// Stores a value expiring `exp` milliseconds from now.
pub async fn set_handler(
    State(state): State<AppState>,
    Query(params): Query<SetParams>,
) -> Result<Json<MessageResponse>> {
    let cmd = params.into_command()?;
    debug!(key = %cmd.key, ttl_ms = cmd.ttl.as_millis() as u64, "set");

    state.cache.set(cmd.key, cmd.value, cmd.ttl);

    Ok(Json(MessageResponse::new("key set")))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats();
    Json(StatsResponse::new(&stats, state.cache.capacity()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
