//! Weight-bounded LRU map.
//!
//! Entries live in a slot arena; a hash map indexes keys to slots and a
//! doubly linked list threaded through slot indices tracks recency. Freed
//! slots are reused through a free list.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    weight: usize,
    prev: Option<usize>,
    next: Option<usize>,
}

/// LRU map bounded by the total weight of its entries.
#[derive(Debug)]
pub struct WeightedLru<K, V> {
    index: HashMap<K, usize>,
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    /// Most recently used.
    head: Option<usize>,
    /// Least recently used.
    tail: Option<usize>,
    weight: usize,
    capacity: usize,
}

impl<K: Hash + Eq + Clone, V> WeightedLru<K, V> {
    /// Creates an empty map holding at most `capacity` total weight.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            weight: 0,
            capacity,
        }
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.promote(idx);
        self.node(idx).map(|n| &n.value)
    }

    /// Returns the value for `key` without touching recency.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.node(idx).map(|n| &n.value)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts or replaces `key` and evicts least recently used entries
    /// until the total weight fits. Returns the evicted entries.
    ///
    /// An entry heavier than the whole capacity is not retained and is
    /// returned as evicted.
    pub fn put(&mut self, key: K, value: V, weight: usize) -> Vec<(K, V)> {
        if weight > self.capacity {
            self.remove(&key);
            return vec![(key, value)];
        }

        if let Some(&idx) = self.index.get(&key) {
            let old_weight = self.node(idx).map_or(0, |n| n.weight);
            if let Some(node) = self.node_mut(idx) {
                node.value = value;
                node.weight = weight;
            }
            self.weight = self.weight - old_weight + weight;
            self.promote(idx);
        } else {
            let node = Node {
                key: key.clone(),
                value,
                weight,
                prev: None,
                next: None,
            };
            let idx = if let Some(idx) = self.free.pop() {
                self.slots[idx] = Some(node);
                idx
            } else {
                self.slots.push(Some(node));
                self.slots.len() - 1
            };
            self.index.insert(key, idx);
            self.weight += weight;
            self.push_front(idx);
        }

        let mut evicted = Vec::new();
        while self.weight > self.capacity {
            match self.pop_lru() {
                Some(entry) => evicted.push(entry),
                None => break,
            }
        }
        evicted
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;
        self.take(idx)
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = *self.index.get(key)?;
        self.take(idx).map(|(_, v)| v)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.weight = 0;
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Total weight of all entries.
    #[must_use]
    pub const fn weight(&self) -> usize {
        self.weight
    }

    /// Maximum total weight.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys from most to least recently used.
    #[must_use]
    pub fn keys_by_recency(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let Some(node) = self.node(idx) else { break };
            keys.push(node.key.clone());
            cursor = node.next;
        }
        keys
    }

    fn node(&self, idx: usize) -> Option<&Node<K, V>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn take(&mut self, idx: usize) -> Option<(K, V)> {
        self.detach(idx);
        let node = self.slots.get_mut(idx)?.take()?;
        self.free.push(idx);
        self.index.remove(&node.key);
        self.weight -= node.weight;
        Some((node.key, node.value))
    }

    fn promote(&mut self, idx: usize) {
        if self.head != Some(idx) {
            self.detach(idx);
            self.push_front(idx);
        }
    }

    fn detach(&mut self, idx: usize) {
        let Some((prev, next)) = self.node(idx).map(|n| (n.prev, n.next)) else {
            return;
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(h) = old_head
            && let Some(node) = self.node_mut(h)
        {
            node.prev = Some(idx);
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut lru = WeightedLru::new(10);
        assert!(lru.put("a", 1, 1).is_empty());
        assert_eq!(lru.get(&"a"), Some(&1));
        assert_eq!(lru.len(), 1);
        assert_eq!(lru.weight(), 1);
    }

    #[test]
    fn test_evicts_least_recent_first() {
        let mut lru = WeightedLru::new(3);
        lru.put("a", 1, 1);
        lru.put("b", 2, 1);
        lru.put("c", 3, 1);

        let evicted = lru.put("d", 4, 1);
        assert_eq!(evicted, vec![("a", 1)]);
        assert_eq!(lru.keys_by_recency(), vec!["d", "c", "b"]);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut lru = WeightedLru::new(3);
        lru.put("a", 1, 1);
        lru.put("b", 2, 1);
        lru.put("c", 3, 1);
        lru.get(&"a");

        let evicted = lru.put("d", 4, 1);
        assert_eq!(evicted, vec![("b", 2)]);
        assert!(lru.contains(&"a"));
    }

    #[test]
    fn test_peek_does_not_refresh() {
        let mut lru = WeightedLru::new(2);
        lru.put("a", 1, 1);
        lru.put("b", 2, 1);
        assert_eq!(lru.peek(&"a"), Some(&1));

        lru.put("c", 3, 1);
        assert!(!lru.contains(&"a"));
    }

    #[test]
    fn test_heavy_entry_evicts_several() {
        let mut lru = WeightedLru::new(10);
        lru.put("a", 1, 4);
        lru.put("b", 2, 4);
        lru.put("c", 3, 2);

        let evicted = lru.put("d", 4, 8);
        assert_eq!(evicted, vec![("a", 1), ("b", 2)]);
        assert_eq!(lru.weight(), 10);
        assert_eq!(lru.keys_by_recency(), vec!["d", "c"]);
    }

    #[test]
    fn test_entry_heavier_than_capacity_is_not_retained() {
        let mut lru = WeightedLru::new(5);
        lru.put("a", 1, 1);

        let evicted = lru.put("huge", 9, 6);
        assert_eq!(evicted, vec![("huge", 9)]);
        assert!(!lru.contains(&"huge"));
        assert!(lru.contains(&"a"));
    }

    #[test]
    fn test_replace_updates_weight_and_recency() {
        let mut lru = WeightedLru::new(10);
        lru.put("a", 1, 2);
        lru.put("b", 2, 2);
        lru.put("a", 10, 5);

        assert_eq!(lru.weight(), 7);
        assert_eq!(lru.len(), 2);
        assert_eq!(lru.peek(&"a"), Some(&10));
        assert_eq!(lru.keys_by_recency(), vec!["a", "b"]);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut lru = WeightedLru::new(2);
        for i in 0..100 {
            lru.put(i, i, 1);
        }
        assert_eq!(lru.len(), 2);
        assert!(lru.slots.len() <= 3);
        assert_eq!(lru.keys_by_recency(), vec![99, 98]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut lru = WeightedLru::new(10);
        lru.put("a", 1, 3);
        lru.put("b", 2, 3);

        assert_eq!(lru.remove(&"a"), Some(1));
        assert_eq!(lru.weight(), 3);
        assert_eq!(lru.keys_by_recency(), vec!["b"]);

        lru.clear();
        assert!(lru.is_empty());
        assert_eq!(lru.weight(), 0);
        assert_eq!(lru.pop_lru(), None);
    }

    #[test]
    fn test_pop_lru_order() {
        let mut lru = WeightedLru::new(10);
        lru.put(1, "one", 1);
        lru.put(2, "two", 1);
        lru.put(3, "three", 1);
        lru.get(&1);

        assert_eq!(lru.pop_lru(), Some((2, "two")));
        assert_eq!(lru.pop_lru(), Some((3, "three")));
        assert_eq!(lru.pop_lru(), Some((1, "one")));
        assert_eq!(lru.pop_lru(), None);
    }
}
