//! Capacity-bounded least-recently-used cache.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ordered_index::OrderedKeyIndex;

/// Outcome of [`LruCache::put`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PutResult<K, V> {
    /// The key was new and nothing had to be evicted.
    Success,
    /// The key was already cached; carries the value it replaced.
    Overwrite(V),
    /// The key was new and pushed the cache over capacity; carries the
    /// least-recently-used entry that was evicted to make room.
    EvictedLast {
        /// Key of the evicted entry.
        key: K,
        /// Value of the evicted entry.
        value: V,
    },
}

/// Key-value store that evicts the least-recently-used entry once `capacity`
/// is exceeded.
///
/// Recency lives in an [`OrderedKeyIndex`] (front = most recent); values live
/// in a hash map keyed the same way. Both always hold the same key set.
#[derive(Debug)]
pub struct LruCache<K, V> {
    order: OrderedKeyIndex<K>,
    values: FxHashMap<K, V>,
    capacity: usize,
}

impl<K: Eq + Hash + Clone, V> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "LRU capacity must be positive");
        Self {
            order: OrderedKeyIndex::with_capacity(capacity),
            values: FxHashMap::default(),
            capacity,
        }
    }

    /// Maximum number of entries held before eviction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raise the capacity to `capacity`. Never shrinks.
    pub fn reserve(&mut self, capacity: usize) {
        if capacity > self.capacity {
            self.values.reserve(capacity - self.values.len());
            self.capacity = capacity;
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if `key` is cached. Does not affect recency.
    pub fn has(&self, key: &K) -> bool {
        self.order.contains(key)
    }

    /// Look up `key`, marking it most-recently-used on a hit.
    pub fn fetch(&mut self, key: &K) -> Option<&V> {
        if !self.values.contains_key(key) {
            return None;
        }
        self.order.push_front(key.clone());
        self.values.get(key)
    }

    /// Insert or overwrite `key`, marking it most-recently-used.
    pub fn put(&mut self, key: K, value: V) -> PutResult<K, V> {
        self.order.push_front(key.clone());

        let result = if let Some(old) = self.values.insert(key, value) {
            PutResult::Overwrite(old)
        } else if self.order.len() > self.capacity {
            // The new key sits at the front, so the back is a different entry.
            let key = self
                .order
                .pop_back()
                .expect("over-capacity cache has a least-recent key");
            let value = self
                .values
                .remove(&key)
                .expect("evicted key must have a cached value");
            PutResult::EvictedLast { key, value }
        } else {
            PutResult::Success
        };

        debug_assert_eq!(self.order.len(), self.values.len());
        result
    }

    /// The `n` most-recently-used entries, most recent first. Does not affect
    /// recency.
    pub fn iterate(&self, n: usize) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.iter().take(n)
    }

    /// Every entry, most recent first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + '_ {
        self.order.iter().map(|key| (key, &self.values[key]))
    }

    /// Drop every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.order.clear();
        self.values.clear();
    }
}

impl<K, V> Drop for LruCache<K, V> {
    fn drop(&mut self) {
        debug_assert_eq!(
            self.order.len(),
            self.values.len(),
            "LRU order index and value map disagree on entry count"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, keys: &[u32]) -> LruCache<u32, String> {
        let mut cache = LruCache::new(capacity);
        for &k in keys {
            cache.put(k, format!("v{k}"));
        }
        cache
    }

    fn recency(cache: &LruCache<u32, String>) -> Vec<u32> {
        cache.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_fifth_insert_evicts_first() {
        let mut cache = filled(4, &[1, 2, 3, 4]);
        let result = cache.put(5, "v5".to_string());
        assert_eq!(
            result,
            PutResult::EvictedLast {
                key: 1,
                value: "v1".to_string()
            }
        );
        assert!(!cache.has(&1));
        assert_eq!(cache.len(), 4);
        assert_eq!(recency(&cache), vec![5, 4, 3, 2]);
    }

    #[test]
    fn test_reput_reports_overwrite_and_promotes() {
        let mut cache = filled(4, &[1, 2, 3, 4]);
        let result = cache.put(1, "one".to_string());
        assert_eq!(result, PutResult::Overwrite("v1".to_string()));
        assert_eq!(recency(&cache), vec![1, 4, 3, 2]);

        // 2 is now the least recent.
        match cache.put(5, "v5".to_string()) {
            PutResult::EvictedLast { key, value } => {
                assert_eq!(key, 2);
                assert_eq!(value, "v2");
            }
            other => panic!("expected eviction, got {other:?}"),
        }
        assert_eq!(cache.fetch(&1).map(String::as_str), Some("one"));
    }

    #[test]
    fn test_put_under_capacity_succeeds() {
        let mut cache = LruCache::new(2);
        assert_eq!(cache.put(1, 10), PutResult::Success);
        assert_eq!(cache.put(2, 20), PutResult::Success);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_fetch_promotes() {
        let mut cache = filled(3, &[1, 2, 3]);
        assert_eq!(cache.fetch(&1).map(String::as_str), Some("v1"));
        assert_eq!(recency(&cache), vec![1, 3, 2]);
        cache.put(4, "v4".to_string());
        assert!(!cache.has(&2));
        assert!(cache.has(&1));
    }

    #[test]
    fn test_fetch_miss_changes_nothing() {
        let mut cache = filled(3, &[1, 2, 3]);
        assert!(cache.fetch(&9).is_none());
        assert_eq!(recency(&cache), vec![3, 2, 1]);
    }

    #[test]
    fn test_has_does_not_promote() {
        let mut cache = filled(3, &[1, 2, 3]);
        assert!(cache.has(&1));
        cache.put(4, "v4".to_string());
        assert!(!cache.has(&1));
    }

    #[test]
    fn test_reserve_only_grows() {
        let mut cache: LruCache<u32, u32> = LruCache::new(8);
        cache.reserve(4);
        assert_eq!(cache.capacity(), 8);
        cache.reserve(8);
        assert_eq!(cache.capacity(), 8);
        cache.reserve(32);
        assert_eq!(cache.capacity(), 32);
    }

    #[test]
    fn test_reserve_prevents_eviction() {
        let mut cache = filled(2, &[1, 2]);
        cache.reserve(3);
        assert_eq!(cache.put(3, "v3".to_string()), PutResult::Success);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_iterate_is_bounded_and_read_only() {
        let cache = filled(8, &[1, 2, 3, 4, 5, 6]);
        let first: Vec<u32> = cache.iterate(3).map(|(k, _)| *k).collect();
        assert_eq!(first, vec![6, 5, 4]);
        let values: Vec<&str> = cache.iterate(2).map(|(_, v)| v.as_str()).collect();
        assert_eq!(values, vec!["v6", "v5"]);
        // Asking for more than is cached yields everything.
        assert_eq!(cache.iterate(100).count(), 6);
        assert_eq!(recency(&cache), vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut cache = filled(4, &[1, 2, 3]);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 4);
        assert_eq!(cache.put(1, "again".to_string()), PutResult::Success);
    }

    #[test]
    fn test_capacity_one_keeps_latest() {
        let mut cache = LruCache::new(1);
        cache.put('a', 1);
        assert_eq!(
            cache.put('b', 2),
            PutResult::EvictedLast { key: 'a', value: 1 }
        );
        assert_eq!(cache.fetch(&'b'), Some(&2));
    }

    #[test]
    #[should_panic(expected = "LRU capacity must be positive")]
    fn test_zero_capacity_panics() {
        let _cache: LruCache<u32, u32> = LruCache::new(0);
    }

    #[test]
    fn test_long_churn_keeps_index_and_map_in_step() {
        let mut cache = LruCache::new(16);
        for i in 0..1_000u32 {
            cache.put(i % 37, i);
            if i % 5 == 0 {
                cache.fetch(&(i % 11));
            }
            assert_eq!(cache.order.len(), cache.values.len());
            assert!(cache.len() <= 16);
        }
    }
}
