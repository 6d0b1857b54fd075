//! Cache statistics tracking

/// Counters for cache traffic and write-back activity
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    fills: u64,
    inserts: u64,
    updates: u64,
    evictions: u64,
    write_backs: u64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_fill(&mut self) {
        self.fills += 1;
    }

    pub(crate) fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub(crate) fn record_update(&mut self) {
        self.updates += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_write_back(&mut self) {
        self.write_backs += 1;
    }

    /// Lookups answered from the cache
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that went to the backing store
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Misses that installed a clean entry
    pub fn fills(&self) -> u64 {
        self.fills
    }

    /// `put` calls that created a new entry
    pub fn inserts(&self) -> u64 {
        self.inserts
    }

    /// `put` calls that overwrote a resident entry
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Entries removed to make room, or by `drain`
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Successful store writes of dirty values
    pub fn write_backs(&self) -> u64 {
        self.write_backs
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
