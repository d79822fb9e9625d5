//! Thread-safe memoization keyed by literal text
//!
//! Holds rendered artifacts of static text. There is no eviction: entries
//! live until [`LayoutCache::clear`] is called when their font is torn down.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared map from text to an immutable cached value
pub struct LayoutCache<V> {
    entries: RwLock<HashMap<String, Arc<V>>>,
}

impl<V> LayoutCache<V> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached value for `key`
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).map(Arc::clone)
    }

    /// Store `value` under `key` unless another value got there first
    ///
    /// Returns whichever value ends up cached, so concurrent callers
    /// populating the same key all observe one entry.
    pub fn insert(&self, key: &str, value: V) -> Arc<V> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.entry(key.to_owned()) {
            Entry::Occupied(existing) => Arc::clone(existing.get()),
            Entry::Vacant(slot) => Arc::clone(slot.insert(Arc::new(value))),
        }
    }

    /// Cached value for `key`, computing and storing it on a miss
    ///
    /// `compute` runs outside the lock; if two callers race, the first
    /// insertion wins and the other result is dropped.
    pub fn get_or_insert_with(&self, key: &str, compute: impl FnOnce() -> V) -> Arc<V> {
        if let Some(value) = self.get(key) {
            return value;
        }
        self.insert(key, compute())
    }

    /// Whether `key` has a cached value
    pub fn contains(&self, key: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(key)
    }

    /// Drop every cached value
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    /// Number of cached values
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for LayoutCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for LayoutCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutCache")
            .field("len", &self.len())
            .finish()
    }
}
