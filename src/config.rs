//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::DEFAULT_CAPACITY;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8080;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1024)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            max_entries: env_or("MAX_ENTRIES", DEFAULT_CAPACITY),
            server_port: env_or("SERVER_PORT", DEFAULT_PORT),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CAPACITY,
            server_port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 1024);
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("MAX_ENTRIES");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.max_entries, 1024);
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn test_env_or_parses_and_falls_back() {
        env::set_var("LRU_TTL_CACHE_TEST_NUMBER", " 42 ");
        env::set_var("LRU_TTL_CACHE_TEST_GARBAGE", "forty-two");

        assert_eq!(env_or("LRU_TTL_CACHE_TEST_NUMBER", 7usize), 42);
        assert_eq!(env_or("LRU_TTL_CACHE_TEST_GARBAGE", 7usize), 7);
        assert_eq!(env_or("LRU_TTL_CACHE_TEST_UNSET", 7u16), 7);

        env::remove_var("LRU_TTL_CACHE_TEST_NUMBER");
        env::remove_var("LRU_TTL_CACHE_TEST_GARBAGE");
    }
}
