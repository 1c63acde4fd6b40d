//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::MAX_RECENT_KEYS;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in milliseconds
    pub cleanup_interval_ms: u64,
    /// Number of recently written keys the store remembers
    pub recent_keys_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL_MS` - Cleanup period in milliseconds (default: 1000, minimum: 1)
    /// - `RECENT_KEYS_CAPACITY` - Remembered recent keys (default: 30, minimum: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval_ms: env_or("CLEANUP_INTERVAL_MS", defaults.cleanup_interval_ms)
                .max(1),
            recent_keys_capacity: env_or("RECENT_KEYS_CAPACITY", defaults.recent_keys_capacity)
                .max(1),
        }
    }

    /// Returns the cleanup interval as a Duration.
    pub fn cleanup_period(&self) -> Duration {
        Duration::from_millis(self.cleanup_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cleanup_interval_ms: 1000,
            recent_keys_capacity: MAX_RECENT_KEYS,
        }
    }
}

/// Parses `name` from the environment, falling back to `default`.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
