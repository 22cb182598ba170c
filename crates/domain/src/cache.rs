use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Small read-through cache with explicit point invalidation.
///
/// Values are cloned out on every hit. Nothing is evicted implicitly, a key is only dropped by
/// `invalidate` or `clear`.
pub struct Cache<K, V> {
    entries: Mutex<HashMap<K, V>>,
}

impl<K: Eq + Hash + Clone, V: Clone> Cache<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: K, value: V) {
        self.lock().insert(key, value);
    }

    /// Returns true if a value was cached for the key.
    pub fn invalidate(&self, key: &K) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Return the cached value or load, cache and return it.
    ///
    /// A failed load leaves the cache untouched.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, load: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = load().await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, V>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K: Eq + Hash + Clone, V: Clone> Default for Cache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_insert_get_invalidate() {
        let cache = Cache::new();

        assert_eq!(cache.get(&"alice"), None);

        cache.insert("alice", 1);
        cache.insert("bob", 2);

        assert_eq!(cache.get(&"alice"), Some(1));
        assert_eq!(cache.len(), 2);

        assert!(cache.invalidate(&"alice"));
        assert!(!cache.invalidate(&"alice"));
        assert_eq!(cache.get(&"alice"), None);
        assert_eq!(cache.get(&"bob"), Some(2));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_get_or_try_insert_with() {
        let cache = Cache::new();
        let loads = Cell::new(0);
        let counter = &loads;
        let load = move || async move {
            counter.set(counter.get() + 1);
            Ok::<_, String>(vec![1, 2])
        };

        assert_eq!(cache.get_or_try_insert_with("alice", load).await, Ok(vec![1, 2]));
        assert_eq!(cache.get_or_try_insert_with("alice", load).await, Ok(vec![1, 2]));
        assert_eq!(loads.get(), 1);

        cache.invalidate(&"alice");

        assert_eq!(cache.get_or_try_insert_with("alice", load).await, Ok(vec![1, 2]));
        assert_eq!(loads.get(), 2);
    }

    #[tokio::test]
    async fn test_get_or_try_insert_with_error() {
        let cache: Cache<&str, u32> = Cache::new();

        assert_eq!(
            cache
                .get_or_try_insert_with("alice", || async { Err("no connection") })
                .await,
            Err("no connection")
        );
        assert!(cache.is_empty());
    }
}
