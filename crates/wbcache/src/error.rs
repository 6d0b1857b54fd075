//! Error types for wbcache

/// Rejected cache configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Capacity must be at least one entry
    #[error("cache capacity must be greater than 0")]
    ZeroCapacity,
}

/// Failure of a cache operation
///
/// The cache never retries and never swallows a store failure. `E` is the
/// backing store's own error, carried unchanged.
#[derive(Debug, thiserror::Error)]
pub enum CacheError<E>
where
    E: std::error::Error + 'static,
{
    /// Backing store failed a read on a cache miss
    #[error("backing store read failed: {0}")]
    StoreRead(#[source] E),

    /// Backing store failed to persist a dirty value
    #[error("backing store write failed: {0}")]
    StoreWrite(#[source] E),
}

impl<E> CacheError<E>
where
    E: std::error::Error + 'static,
{
    /// The store error that caused this failure
    pub fn into_store_error(self) -> E {
        match self {
            CacheError::StoreRead(e) | CacheError::StoreWrite(e) => e,
        }
    }

    /// Check if a read failed
    pub fn is_read(&self) -> bool {
        matches!(self, CacheError::StoreRead(_))
    }

    /// Check if a write-back failed
    pub fn is_write(&self) -> bool {
        matches!(self, CacheError::StoreWrite(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wbstore::StoreError;

    #[test]
    fn test_error_display() {
        let err: CacheError<StoreError> = CacheError::StoreWrite(StoreError::ReadOnly);
        assert_eq!(err.to_string(), "backing store write failed: store is read-only");
        assert_eq!(
            ConfigError::ZeroCapacity.to_string(),
            "cache capacity must be greater than 0"
        );
    }

    #[test]
    fn test_error_source_is_store_error() {
        use std::error::Error as _;

        let err: CacheError<StoreError> = CacheError::StoreRead(StoreError::Offline);
        assert!(err.is_read());
        assert!(!err.is_write());
        assert_eq!(err.source().map(|s| s.to_string()), Some("store is offline".to_string()));
        assert_eq!(err.into_store_error(), StoreError::Offline);
    }
}
