//! WriteBackCache: LRU write-back cache in front of a backing store

use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;
use tracing::{debug, trace, warn};
use wbstore::Storage;

use crate::config::CacheConfig;
use crate::error::{CacheError, ConfigError};
use crate::lru::{Handle, Iter, RecencyList};
use crate::stats::CacheStats;

/// Resident value with its write-back state
struct Entry<V> {
    value: V,
    /// Value may differ from the store's copy
    dirty: bool,
    /// Position in the recency list
    handle: Handle,
}

/// Fixed-capacity LRU cache that defers writes to a backing store
///
/// `put` only touches memory and marks the entry dirty. A dirty entry reaches
/// the store when it is evicted, or when [`flush`](Self::flush) or
/// [`drain`](Self::drain) runs. Values read in on a miss are clean and are
/// dropped silently on eviction.
///
/// Nothing is written back on drop unless the config enables
/// `flush_on_drop`.
///
/// ```
/// use wbcache::WriteBackCache;
/// use wbstore::MemoryStore;
///
/// let store: MemoryStore<&str, i32> = MemoryStore::new();
/// let mut cache = WriteBackCache::new(2, store.clone()).unwrap();
///
/// cache.put("a", 1).unwrap();
/// cache.put("b", 2).unwrap();
/// cache.put("c", 3).unwrap(); // evicts "a" and writes it back
///
/// assert_eq!(store.get(&"a"), Some(1));
/// assert_eq!(cache.get(&"a").unwrap(), Some(&1)); // read back in, clean
/// ```
pub struct WriteBackCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: Storage<K, V>,
{
    table: HashMap<K, Entry<V>, RandomState>,
    order: RecencyList<K>,
    store: S,
    config: CacheConfig,
    stats: CacheStats,
}

impl<K, V, S> WriteBackCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: Storage<K, V>,
{
    /// Create a cache holding at most `capacity` entries
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of resident entries, at least 1
    /// * `store` - Backing store; pass `&mut store` to keep ownership
    ///
    /// # Returns
    /// * `Result<WriteBackCache>` - Empty cache, or `ConfigError::ZeroCapacity`
    pub fn new(capacity: usize, store: S) -> Result<Self, ConfigError> {
        Self::with_config(CacheConfig::new(capacity), store)
    }

    /// Create a cache from a full [`CacheConfig`]
    pub fn with_config(config: CacheConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            table: HashMap::with_capacity_and_hasher(config.capacity, RandomState::new()),
            order: RecencyList::with_capacity(config.capacity),
            store,
            config,
            stats: CacheStats::new(),
        })
    }

    /// Get a value, reading it from the store on a miss
    ///
    /// A hit promotes the key and never touches the store. A miss that finds
    /// the key in the store installs it clean, evicting the LRU entry first if
    /// the cache is full.
    ///
    /// # Returns
    /// * `Ok(None)` - Key is neither cached nor stored
    /// * `Err(StoreRead)` - Store read failed; cache unchanged
    /// * `Err(StoreWrite)` - Making room failed; cache unchanged, value discarded
    pub fn get(&mut self, key: &K) -> Result<Option<&V>, CacheError<S::Error>> {
        if let Some(handle) = self.table.get(key).map(|entry| entry.handle) {
            self.order.move_to_front(handle);
            self.stats.record_hit();
            trace!("cache hit");
            return Ok(self.table.get(key).map(|entry| &entry.value));
        }

        self.stats.record_miss();
        trace!("cache miss");

        let value = match self.store.read(key).map_err(CacheError::StoreRead)? {
            Some(value) => value,
            None => return Ok(None),
        };

        self.install(key.clone(), value, false)?;
        self.stats.record_fill();

        Ok(self.table.get(key).map(|entry| &entry.value))
    }

    /// Write a value into the cache
    ///
    /// The entry is marked dirty even if the value is unchanged. Only eviction
    /// of the LRU entry can reach the store here.
    ///
    /// # Returns
    /// * `Err(StoreWrite)` - Evicting a dirty entry failed; cache unchanged
    pub fn put(&mut self, key: K, value: V) -> Result<(), CacheError<S::Error>> {
        if let Some(entry) = self.table.get_mut(&key) {
            entry.value = value;
            entry.dirty = true;
            let handle = entry.handle;
            self.order.move_to_front(handle);
            self.stats.record_update();
            return Ok(());
        }

        self.install(key, value, true)?;
        self.stats.record_insert();
        Ok(())
    }

    /// Get a resident value without promoting it or reading the store
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.table.get(key).map(|entry| &entry.value)
    }

    /// Check if `key` is resident
    pub fn contains(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }

    /// Dirty flag of a resident key, `None` if not resident
    pub fn is_dirty(&self, key: &K) -> Option<bool> {
        self.table.get(key).map(|entry| entry.dirty)
    }

    /// Number of resident entries
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if nothing is resident
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Maximum number of resident entries
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Number of resident entries not yet written back
    pub fn dirty_len(&self) -> usize {
        self.table.values().filter(|entry| entry.dirty).count()
    }

    /// Resident keys, most recently used first
    pub fn keys(&self) -> Iter<'_, K> {
        self.order.iter()
    }

    /// Write every dirty entry back, least recently used first
    ///
    /// Entries stay resident and keep their position; each one is marked clean
    /// as soon as its write succeeds. Stops at the first failed write, leaving
    /// that entry and the ones after it dirty.
    ///
    /// # Returns
    /// * `Result<usize>` - Number of entries written
    pub fn flush(&mut self) -> Result<usize, CacheError<S::Error>> {
        let mut written = 0;

        for key in self.order.iter().rev() {
            let entry = match self.table.get_mut(key) {
                Some(entry) if entry.dirty => entry,
                _ => continue,
            };

            if let Err(e) = self.store.write(key, &entry.value) {
                warn!(error = %e, written, "flush stopped by failed write");
                return Err(CacheError::StoreWrite(e));
            }

            entry.dirty = false;
            self.stats.record_write_back();
            written += 1;
        }

        debug!(written, "flushed dirty entries");
        Ok(written)
    }

    /// Evict every entry, least recently used first
    ///
    /// Dirty entries are written back on the way out. Stops at the first failed
    /// write with that entry and all more recent ones still resident.
    ///
    /// # Returns
    /// * `Result<usize>` - Number of entries evicted
    pub fn drain(&mut self) -> Result<usize, CacheError<S::Error>> {
        let mut evicted = 0;
        while !self.order.is_empty() {
            self.evict_lru()?;
            evicted += 1;
        }

        debug!(evicted, "drained cache");
        Ok(evicted)
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset cache statistics
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Settings the cache was built with
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Insert a key known to be absent, making room first
    fn install(&mut self, key: K, value: V, dirty: bool) -> Result<(), CacheError<S::Error>> {
        if self.table.len() >= self.config.capacity {
            self.evict_lru()?;
        }

        let handle = self.order.push_front(key.clone());
        self.table.insert(key, Entry { value, dirty, handle });

        self.debug_assert_consistent();
        Ok(())
    }

    /// Remove the tail entry, writing it back first if dirty
    ///
    /// The entry is only removed after the write succeeds.
    fn evict_lru(&mut self) -> Result<(), CacheError<S::Error>> {
        let (handle, key) = match self.order.back() {
            Some(tail) => tail,
            None => return Ok(()),
        };

        let dirty = match self.table.get(key) {
            Some(entry) if entry.dirty => {
                if let Err(e) = self.store.write(key, &entry.value) {
                    warn!(error = %e, "write-back failed; keeping LRU entry resident");
                    return Err(CacheError::StoreWrite(e));
                }
                self.stats.record_write_back();
                true
            }
            _ => false,
        };

        if let Some(key) = self.order.remove(handle) {
            self.table.remove(&key);
        }
        self.stats.record_eviction();
        debug!(dirty, resident = self.table.len(), "evicted LRU entry");

        self.debug_assert_consistent();
        Ok(())
    }

    fn debug_assert_consistent(&self) {
        debug_assert_eq!(self.table.len(), self.order.len(), "table and recency list diverged");
        debug_assert!(self.table.len() <= self.config.capacity, "cache over capacity");
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        assert!(self.table.len() <= self.config.capacity);
        assert_eq!(self.table.len(), self.order.len());
        assert_eq!(self.order.iter().count(), self.order.len());

        for (key, entry) in &self.table {
            assert!(self.order.get(entry.handle) == Some(key), "dangling handle");
        }
        for key in self.order.iter() {
            assert!(self.table.contains_key(key));
        }
    }
}

impl<K, V, S> Drop for WriteBackCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: Storage<K, V>,
{
    fn drop(&mut self) {
        if !self.config.flush_on_drop {
            return;
        }

        if let Err(e) = self.flush() {
            warn!(error = %e, dirty = self.dirty_len(), "flush on drop failed; dirty entries lost");
        }
    }
}
