//! Insertion-ordered string map of object handles.

use std::fmt;

use rustc_hash::FxHashMap;

use super::ObjectRef;

/// String-keyed map that iterates in insertion order.
///
/// Backs dict objects, scope bindings, struct fields and module
/// namespaces. Replacing a key keeps its original position.
#[derive(Clone, Default)]
pub struct ObjectDict {
    entries: Vec<(String, ObjectRef)>,
    index: FxHashMap<String, usize>,
}

impl ObjectDict {
    pub fn new() -> Self {
        ObjectDict::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ObjectRef> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Insert or replace. Returns the previous value of `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: ObjectRef) -> Option<ObjectRef> {
        let key = key.into();
        if let Some(&i) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn remove(&mut self, key: &str) -> Option<ObjectRef> {
        let i = self.index.remove(key)?;
        let (_, value) = self.entries.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectRef)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &ObjectRef> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

impl fmt::Debug for ObjectDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>> FromIterator<(K, ObjectRef)> for ObjectDict {
    fn from_iter<I: IntoIterator<Item = (K, ObjectRef)>>(iter: I) -> Self {
        let mut dict = ObjectDict::new();
        for (key, value) in iter {
            dict.insert(key, value);
        }
        dict
    }
}
