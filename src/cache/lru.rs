//! LRU Index Module
//!
//! The authoritative, capacity-bounded key-value store ordered by access recency.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Logical access time. Larger means more recently used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Stamp(u64);

// == LRU Index ==
/// Capacity-bounded key-value store with least-recently-used eviction.
///
/// Every entry carries the stamp of its last access; `order` maps stamps back
/// to keys so the oldest entry is always `order`'s first element.
/// Touching an entry is `O(log n)`.
#[derive(Debug)]
pub struct LruIndex<K, V> {
    /// Key -> (last access, value)
    entries: HashMap<K, (Stamp, V)>,
    /// Last access -> key, oldest first
    order: BTreeMap<Stamp, K>,
    /// Next stamp to hand out
    clock: u64,
    /// Maximum number of entries
    capacity: usize,
}

impl<K, V> LruIndex<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty index holding at most `capacity` entries.
    ///
    /// A zero capacity is rounded up to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            order: BTreeMap::new(),
            clock: 0,
            capacity,
        }
    }

    fn tick(&mut self) -> Stamp {
        self.clock += 1;
        Stamp(self.clock)
    }

    /// Moves `key` to the most-recently-used position.
    fn touch(&mut self, key: &K) -> bool {
        let now = self.tick();
        match self.entries.get_mut(key) {
            Some((stamp, _)) => {
                let previous = std::mem::replace(stamp, now);
                self.order.remove(&previous);
                self.order.insert(now, key.clone());
                true
            }
            None => false,
        }
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if !self.touch(key) {
            return None;
        }
        self.entries.get(key).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value and marks it most recently used.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        if !self.touch(key) {
            return None;
        }
        self.entries.get_mut(key).map(|(_, value)| value)
    }

    // == Peek ==
    /// Returns the value for `key` without changing its recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|(_, value)| value)
    }

    // == Insert ==
    /// Stores `value` under `key` as the most recently used entry.
    ///
    /// Replacing an existing key never evicts. Adding a new key to a full
    /// index evicts exactly one entry, the least recently used, and returns it.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        let now = self.tick();
        if let Some((previous, _)) = self.entries.insert(key.clone(), (now, value)) {
            self.order.remove(&previous);
            self.order.insert(now, key);
            return None;
        }
        self.order.insert(now, key);

        if self.entries.len() > self.capacity {
            return self.pop_lru();
        }
        None
    }

    // == Pop LRU ==
    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (_, key) = self.order.pop_first()?;
        let (_, value) = self.entries.remove(&key)?;
        Some((key, value))
    }

    /// Checks whether `key` is stored, without touching it.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys from least to most recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &K> {
        self.order.values()
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
