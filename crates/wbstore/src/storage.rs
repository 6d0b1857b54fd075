//! Backing-store contract

/// A synchronous key/value store sitting behind a cache.
///
/// `read` must not have effects the cache can observe. `write` must be durable
/// once it returns `Ok`: a write-back cache drops its own copy of a dirty value
/// right after a successful write.
pub trait Storage<K, V> {
    /// Error reported by the store, handed to the cache's caller unchanged
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up `key`. An absent key is `Ok(None)`, not an error.
    fn read(&self, key: &K) -> Result<Option<V>, Self::Error>;

    /// Persist `value` under `key`.
    fn write(&mut self, key: &K, value: &V) -> Result<(), Self::Error>;
}

impl<K, V, S> Storage<K, V> for &mut S
where
    S: Storage<K, V> + ?Sized,
{
    type Error = S::Error;

    fn read(&self, key: &K) -> Result<Option<V>, Self::Error> {
        (**self).read(key)
    }

    fn write(&mut self, key: &K, value: &V) -> Result<(), Self::Error> {
        (**self).write(key, value)
    }
}

impl<K, V, S> Storage<K, V> for Box<S>
where
    S: Storage<K, V> + ?Sized,
{
    type Error = S::Error;

    fn read(&self, key: &K) -> Result<Option<V>, Self::Error> {
        (**self).read(key)
    }

    fn write(&mut self, key: &K, value: &V) -> Result<(), Self::Error> {
        (**self).write(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn write_through<S: Storage<u32, String>>(mut store: S) {
        store.write(&1, &"one".to_string()).unwrap();
        assert_eq!(store.read(&1).unwrap(), Some("one".to_string()));
    }

    #[test]
    fn test_borrowed_store() {
        let mut store: MemoryStore<u32, String> = MemoryStore::new();
        write_through(&mut store);

        // The lender still owns the data
        assert_eq!(store.get(&1), Some("one".to_string()));
    }

    #[test]
    fn test_boxed_store() {
        let store: MemoryStore<u32, String> = MemoryStore::new();
        write_through(Box::new(store.clone()));

        assert_eq!(store.writes(), 1);
        assert_eq!(store.reads(), 1);
    }
}
