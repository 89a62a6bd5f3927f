//! The accumulator of named step results.

use std::collections::BTreeMap;
use std::ops::Index;

/// Values produced by completed steps, keyed by operation name.
///
/// Later steps read earlier results through this map; a successful run
/// returns the final accumulator to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Results<V> {
    inner: BTreeMap<String, V>,
}

impl<V> Results<V> {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }

    /// Get the value bound under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.inner.get(name)
    }

    /// Whether a value is bound under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Bind `value` under `name`, returning any previous binding.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        self.inner.insert(name.into(), value)
    }

    /// Number of bound results.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no results are bound.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.inner.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterate over bound names in name order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Consume the accumulator, yielding the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, V> {
        self.inner
    }
}

impl<V> Default for Results<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Index<&str> for Results<V> {
    type Output = V;

    /// Panics if no value is bound under `name`.
    fn index(&self, name: &str) -> &V {
        match self.inner.get(name) {
            Some(value) => value,
            None => panic!("no result bound under name: {name}"),
        }
    }
}

impl<V> IntoIterator for Results<V> {
    type Item = (String, V);
    type IntoIter = std::collections::btree_map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Results<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = std::collections::btree_map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
