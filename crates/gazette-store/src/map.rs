use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Numeric namespace tag distinguishing independent store instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryId(pub u8);

/// Ordered key-value map, one per namespace.
///
/// The map is the sole source of truth between invocations: readers get a
/// cloned value, mutate the copy, and reinsert it under the same key. The
/// whole map serializes with serde so the host can snapshot and restore it
/// across calls; durability itself is the host's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StableMap<K: Ord, V> {
    memory_id: MemoryId,
    entries: BTreeMap<K, V>,
}

impl<K: Ord + Clone, V: Clone> StableMap<K, V> {
    pub fn new(memory_id: MemoryId) -> Self {
        debug!(namespace = memory_id.0, "opened store namespace");
        Self {
            memory_id,
            entries: BTreeMap::new(),
        }
    }

    pub fn memory_id(&self) -> MemoryId {
        self.memory_id
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).cloned()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Upsert: inserting an existing key overwrites it and returns the
    /// previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    /// All values, in key order.
    pub fn values(&self) -> Vec<V> {
        self.entries.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
