use std::{collections::HashMap, hash::Hash};

use parking_lot::RwLock;

use crate::Cache;

/// In-memory [`Cache`] backed by a `HashMap`.
///
/// The default session store, and the test double for anything that takes a
/// `Cache`. Values are cloned out on `get`, so cache heavy values behind an
/// `Arc`.
#[derive(Debug, Default)]
pub struct MemoryCache<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K: Eq + Hash, V> MemoryCache<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl<K, V> Cache<K, V> for MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        self.inner.read().get(key).cloned()
    }

    fn set(&self, key: K, value: V) {
        self.inner.write().insert(key, value);
    }
}
