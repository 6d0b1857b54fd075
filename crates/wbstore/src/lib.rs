//! # wbstore
//!
//! The slow tier behind `wbcache`.
//!
//! ## Contents
//! - **Storage**: the read/write contract a write-back cache consumes
//! - **MemoryStore**: shared in-memory store with call counters and failure injection
//!
//! The cache never constructs or closes a store. Implementations decide their
//! own latency, durability and failure behavior; the only requirement is that a
//! successful `write` is durable.

#![warn(missing_docs)]

mod error;
mod memory;
mod storage;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use storage::Storage;
