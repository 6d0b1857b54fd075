//! # wbcache
//!
//! Fixed-capacity write-back cache with LRU eviction, sitting in front of a
//! slower [`Storage`](wbstore::Storage) backend.
//!
//! ## Architecture
//! - **Table**: AHash map from key to value, dirty flag and list handle (O(1))
//! - **Recency list**: arena-backed doubly-linked list, head is MRU (O(1))
//! - **Write-back**: `put` marks entries dirty; a dirty entry is written to the
//!   store only when evicted, flushed or drained
//!
//! Store failures reach the caller unchanged. An entry whose write-back fails
//! stays resident and dirty.
//!
//! The cache is single-threaded. Callers sharing it across threads must wrap
//! the whole cache in one lock.

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
pub mod lru;
mod stats;

pub use cache::WriteBackCache;
pub use config::CacheConfig;
pub use error::{CacheError, ConfigError};
pub use stats::CacheStats;
