//! Error types for wbstore

/// Result type alias for `MemoryStore` operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures reported by [`MemoryStore`](crate::MemoryStore)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Store is offline; reads and writes are refused
    #[error("store is offline")]
    Offline,

    /// Store rejects writes
    #[error("store is read-only")]
    ReadOnly,

    /// Write budget used up
    #[error("store is full")]
    Full,
}
