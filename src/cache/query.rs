use std::collections::{HashMap, VecDeque};

/// Size-bounded memo map with FIFO eviction and no TTL.
///
/// When full, inserting a new key evicts the oldest inserted key,
/// regardless of how recently it was read.
#[derive(Debug)]
pub struct QueryCache<V> {
    entries: HashMap<String, V>,
    order: VecDeque<String>,
    capacity: usize,
}

impl<V> QueryCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if self.entries.insert(key.clone(), value).is_some() {
            // Refreshed an existing key; insertion order is unchanged.
            return;
        }
        if self.order.len() >= self.capacity
            && let Some(oldest) = self.order.pop_front()
        {
            self.entries.remove(&oldest);
        }
        self.order.push_back(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut cache = QueryCache::new(10);
        cache.insert("q1", vec!["a", "b"]);
        assert_eq!(cache.get("q1"), Some(&vec!["a", "b"]));
        assert_eq!(cache.get("q2"), None);
    }

    #[test]
    fn test_fifo_eviction_at_capacity() {
        let mut cache = QueryCache::new(2);
        cache.insert("first", 1);
        cache.insert("second", 2);
        cache.insert("third", 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("first"), None);
        assert_eq!(cache.get("second"), Some(&2));
        assert_eq!(cache.get("third"), Some(&3));
    }

    #[test]
    fn test_reinsert_does_not_grow_order() {
        let mut cache = QueryCache::new(2);
        cache.insert("a", 1);
        cache.insert("a", 2);
        cache.insert("b", 3);

        // "a" was refreshed, not duplicated, so "b" does not evict it.
        assert_eq!(cache.get("a"), Some(&2));
        assert_eq!(cache.get("b"), Some(&3));
    }

    #[test]
    fn test_clear() {
        let mut cache = QueryCache::new(4);
        cache.insert("a", 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }
}
