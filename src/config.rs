//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of accounts the cache can hold
    pub cache_capacity: usize,
    /// Number of accounts tracked by the balance ranking
    pub top_capacity: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Interval in seconds between stats log lines
    pub stats_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cached accounts (default: 1000)
    /// - `TOP_CAPACITY` - Ranked accounts (default: 3)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATS_INTERVAL` - Stats reporting frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            top_capacity: parse_var("TOP_CAPACITY").unwrap_or(defaults.top_capacity),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            stats_interval: parse_var("STATS_INTERVAL").unwrap_or(defaults.stats_interval),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            top_capacity: 3,
            server_port: 3000,
            stats_interval: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_capacity, 1000);
        assert_eq!(config.top_capacity, 3);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.stats_interval, 60);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_CAPACITY");
        env::remove_var("TOP_CAPACITY");
        env::remove_var("SERVER_PORT");
        env::remove_var("STATS_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.cache_capacity, 1000);
        assert_eq!(config.top_capacity, 3);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.stats_interval, 60);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("RANK_CACHE_TEST_GARBAGE", "not-a-number");
        assert_eq!(parse_var::<usize>("RANK_CACHE_TEST_GARBAGE"), None);
        env::remove_var("RANK_CACHE_TEST_GARBAGE");
    }
}
