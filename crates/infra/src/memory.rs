use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

/// In-memory keyed table used by every repository implementation.
///
/// Locking is coarse; contention is irrelevant at this scale and a poisoned
/// lock degrades to empty reads rather than a panic.
#[derive(Debug)]
pub struct Table<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> Table<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner
            .read()
            .map(|map| map.contains_key(key))
            .unwrap_or(false)
    }

    pub fn upsert(&self, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, value);
        }
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().ok()?.remove(key)
    }

    pub fn values(&self) -> Vec<V> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn find<F>(&self, predicate: F) -> Option<V>
    where
        F: Fn(&V) -> bool,
    {
        match self.inner.read() {
            Ok(map) => map.values().find(|v| predicate(v)).cloned(),
            Err(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Default for Table<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_get_remove_roundtrip() {
        let table: Table<u32, String> = Table::new();
        table.upsert(1, "uno".to_string());
        table.upsert(2, "dos".to_string());

        assert_eq!(table.get(&1).as_deref(), Some("uno"));
        assert_eq!(table.len(), 2);
        assert_eq!(table.remove(&1).as_deref(), Some("uno"));
        assert!(table.get(&1).is_none());
    }

    #[test]
    fn find_scans_values() {
        let table: Table<u32, String> = Table::new();
        table.upsert(7, "siete".to_string());
        assert!(table.find(|v| v.starts_with("si")).is_some());
        assert!(table.find(|v| v.starts_with("no")).is_none());
    }
}
