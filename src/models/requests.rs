//! Request DTOs for the cache server API
//!
//! Both operations take their arguments from the query string.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Query parameters for `/get?key=K`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetParams {
    #[serde(default)]
    pub key: Option<String>,
}

impl GetParams {
    /// Returns the key, rejecting a missing or empty one.
    pub fn key(&self) -> Result<&str> {
        match self.key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(CacheError::InvalidArgument("key is required".to_string())),
        }
    }
}

/// Query parameters for `/set?key=K&value=V&exp=MS`
///
/// `exp` stays a raw string so a non-numeric value can be reported with our
/// own message instead of a generic extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetParams {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    /// TTL in milliseconds
    #[serde(default)]
    pub exp: Option<String>,
}

/// A validated set request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCommand {
    pub key: String,
    pub value: String,
    pub ttl: Duration,
}

impl SetParams {
    /// Validates the parameters.
    ///
    /// `exp` is checked first, then key and value. Negative `exp` values are
    /// clamped to zero, which the cache treats as "do not admit".
    pub fn into_command(self) -> Result<SetCommand> {
        let ttl_ms: i64 = self
            .exp
            .as_deref()
            .unwrap_or_default()
            .trim()
            .parse()
            .map_err(|_| CacheError::InvalidArgument("exp must be a number".to_string()))?;

        let key = self.key.unwrap_or_default();
        let value = self.value.unwrap_or_default();
        if key.is_empty() || value.is_empty() {
            return Err(CacheError::InvalidArgument(
                "key and value are required".to_string(),
            ));
        }

        Ok(SetCommand {
            key,
            value,
            ttl: ttl_from_millis(ttl_ms),
        })
    }
}

fn ttl_from_millis(ms: i64) -> Duration {
    Duration::from_millis(u64::try_from(ms).unwrap_or(0))
}
