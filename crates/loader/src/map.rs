//! The accumulating property map.
//!
//! Responsibilities:
//! - Hold string key/value entries merged across one or more resource loads.
//! - Provide last-write-wins insertion and ordered iteration.
//!
//! Does NOT handle:
//! - Typed access to entries; consumers bind values themselves.
//! - Synchronization; a map shared between threads is the caller's problem.
//!
//! Invariants:
//! - Iteration order is key order, so rendered output is deterministic.
//! - Loads merge into the map; nothing in this crate ever clears it.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

/// String-to-string mapping progressively populated across resource loads.
///
/// The map is created by the caller and passed by mutable reference into
/// each dispatch call; later loads overwrite earlier keys. A loader that
/// fails mid-parse may leave a partial merge behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyMap {
    entries: BTreeMap<String, String>,
}

impl PropertyMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the value it displaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove an entry, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge another map into this one, overwriting existing keys.
    pub fn merge(&mut self, other: PropertyMap) {
        self.entries.extend(other.entries);
    }
}

impl Extend<(String, String)> for PropertyMap {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl FromIterator<(String, String)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: BTreeMap::from_iter(iter),
        }
    }
}

impl IntoIterator for PropertyMap {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertyMap {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
