//! Cache configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Construction-time settings for a [`WriteBackCache`](crate::WriteBackCache)
///
/// ```
/// use wbcache::CacheConfig;
///
/// let config = CacheConfig::new(1024).flush_on_drop(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of resident entries
    pub capacity: usize,

    /// Write dirty entries back when the cache is dropped
    #[serde(default)]
    pub flush_on_drop: bool,
}

impl CacheConfig {
    /// Config with the given capacity and no flush on drop
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            flush_on_drop: false,
        }
    }

    /// Set whether dropping the cache flushes dirty entries
    pub fn flush_on_drop(mut self, enabled: bool) -> Self {
        self.flush_on_drop = enabled;
        self
    }

    /// Check the settings before building a cache
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(CacheConfig::new(0).validate(), Err(ConfigError::ZeroCapacity));
        assert!(CacheConfig::new(1).validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = CacheConfig::new(8).flush_on_drop(true);
        assert_eq!(config.capacity, 8);
        assert!(config.flush_on_drop);
    }

    #[test]
    fn test_from_json() {
        let config: CacheConfig = serde_json::from_str(r#"{"capacity": 64}"#).unwrap();
        assert_eq!(config, CacheConfig::new(64));

        let config: CacheConfig =
            serde_json::from_str(r#"{"capacity": 2, "flush_on_drop": true}"#).unwrap();
        assert!(config.flush_on_drop);
    }
}
