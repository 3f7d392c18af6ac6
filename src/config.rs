//! Configuration Module
//!
//! Handles loading and validating environment configuration from environment variables.

use std::env;

use crate::error::{EnvError, Result};

/// Environment configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of slots in the simulated cache
    pub cache_size: usize,
    /// Number of rows in the mock data store
    pub store_size: usize,
    /// Largest TTL an entry may be admitted with
    pub max_ttl: u32,
    /// Construction seed, None = seed from OS entropy
    pub seed: Option<u64>,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config with the given sizes and no seed.
    pub fn new(cache_size: usize, store_size: usize, max_ttl: u32) -> Self {
        Self {
            cache_size,
            store_size,
            max_ttl,
            ..Self::default()
        }
    }

    /// Returns a copy of this config with a fixed construction seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SIZE` - Cache slots (default: 32)
    /// - `STORE_SIZE` - Store rows (default: 128)
    /// - `MAX_TTL` - Maximum TTL in steps (default: 50)
    /// - `SEED` - Construction seed (default: unset)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_size: parse_var("CACHE_SIZE").unwrap_or(defaults.cache_size),
            store_size: parse_var("STORE_SIZE").unwrap_or(defaults.store_size),
            max_ttl: parse_var("MAX_TTL").unwrap_or(defaults.max_ttl),
            seed: parse_var("SEED"),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Checks the sizing constraints an environment needs to be constructed.
    pub fn validate(&self) -> Result<()> {
        if self.max_ttl == 0 {
            return Err(EnvError::Configuration(
                "TTL must be greater than 0".to_string(),
            ));
        }
        if self.store_size == 0 {
            return Err(EnvError::Configuration(
                "Size of simulated data store must be greater than 0".to_string(),
            ));
        }
        if self.cache_size == 0 {
            return Err(EnvError::Configuration(
                "Size of simulated cache must be greater than 0".to_string(),
            ));
        }
        if self.cache_size > self.store_size {
            return Err(EnvError::Configuration(format!(
                "Cache size {} cannot be greater than store size {}",
                self.cache_size, self.store_size
            )));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_size: 32,
            store_size: 128,
            max_ttl: 50,
            seed: None,
            server_port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_size, 32);
        assert_eq!(config.store_size, 128);
        assert_eq!(config.max_ttl, 50);
        assert_eq!(config.seed, None);
        assert_eq!(config.server_port, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_SIZE");
        env::remove_var("STORE_SIZE");
        env::remove_var("MAX_TTL");
        env::remove_var("SEED");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let result = Config::new(4, 10, 0).validate();
        assert!(matches!(result, Err(EnvError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_empty_sizes() {
        assert!(Config::new(0, 10, 5).validate().is_err());
        assert!(Config::new(0, 0, 5).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_cache_larger_than_store() {
        let result = Config::new(11, 10, 5).validate();
        assert!(matches!(result, Err(EnvError::Configuration(_))));
    }

    #[test]
    fn test_validate_accepts_cache_equal_to_store() {
        assert!(Config::new(10, 10, 1).validate().is_ok());
    }

    #[test]
    fn test_with_seed() {
        let config = Config::new(4, 10, 5).with_seed(9);
        assert_eq!(config.seed, Some(9));
    }
}
