//! In-memory backing store
//!
//! Every clone of a `MemoryStore` is a handle onto the same table, so a test
//! can hand one handle to a cache and inspect the slow tier through another.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use ahash::RandomState;
use parking_lot::RwLock;

use crate::error::{Result, StoreError};
use crate::storage::Storage;

struct Inner<K, V> {
    data: HashMap<K, V, RandomState>,
    reads: u64,
    writes: u64,
    offline: bool,
    read_only: bool,
    write_budget: Option<u64>,
}

/// Shared in-memory key/value store
pub struct MemoryStore<K, V> {
    inner: Arc<RwLock<Inner<K, V>>>,
}

impl<K, V> MemoryStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create an empty, online store
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                data: HashMap::with_hasher(RandomState::new()),
                reads: 0,
                writes: 0,
                offline: false,
                read_only: false,
                write_budget: None,
            })),
        }
    }

    /// Seed a value directly (not counted as a write)
    pub fn insert(&self, key: K, value: V) {
        self.inner.write().data.insert(key, value);
    }

    /// Current value for `key` (not counted as a read)
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.read().data.get(key).cloned()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.inner.read().data.len()
    }

    /// Check if the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.inner.read().data.is_empty()
    }

    /// Number of `Storage::read` calls, failed ones included
    pub fn reads(&self) -> u64 {
        self.inner.read().reads
    }

    /// Number of `Storage::write` calls, failed ones included
    pub fn writes(&self) -> u64 {
        self.inner.read().writes
    }

    /// Fail every read and write while set
    pub fn set_offline(&self, offline: bool) {
        self.inner.write().offline = offline;
    }

    /// Fail every write while set
    pub fn set_read_only(&self, read_only: bool) {
        self.inner.write().read_only = read_only;
    }

    /// Allow only `budget` more successful writes; `None` removes the limit
    pub fn set_write_budget(&self, budget: Option<u64>) {
        self.inner.write().write_budget = budget;
    }
}

impl<K, V> Clone for MemoryStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for MemoryStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for MemoryStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("MemoryStore")
            .field("len", &inner.data.len())
            .field("reads", &inner.reads)
            .field("writes", &inner.writes)
            .field("offline", &inner.offline)
            .field("read_only", &inner.read_only)
            .field("write_budget", &inner.write_budget)
            .finish()
    }
}

impl<K, V> Storage<K, V> for MemoryStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    type Error = StoreError;

    fn read(&self, key: &K) -> Result<Option<V>> {
        let mut inner = self.inner.write();
        inner.reads += 1;

        if inner.offline {
            return Err(StoreError::Offline);
        }

        Ok(inner.data.get(key).cloned())
    }

    fn write(&mut self, key: &K, value: &V) -> Result<()> {
        let mut inner = self.inner.write();
        inner.writes += 1;

        if inner.offline {
            return Err(StoreError::Offline);
        }
        if inner.read_only {
            return Err(StoreError::ReadOnly);
        }
        match inner.write_budget {
            Some(0) => return Err(StoreError::Full),
            Some(budget) => inner.write_budget = Some(budget - 1),
            None => {}
        }

        inner.data.insert(key.clone(), value.clone());
        Ok(())
    }
}
