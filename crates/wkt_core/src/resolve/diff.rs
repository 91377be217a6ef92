//! Identify entities created by a host call that does not return them.
//!
//! Capture a [`RegistrySnapshot`] of every key immediately before the
//! mutation, read the registry again afterwards, and pick the entries whose
//! key is not in the snapshot. Nothing may run between the snapshot and the
//! mutation that could let the user change the registry.

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::ResolveError;

/// Keys present in a registry at one point in time, in registry order.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot<K> {
    what: String,
    keys: Vec<K>,
    index: HashSet<K>,
}

impl<K> RegistrySnapshot<K>
where
    K: Eq + Hash + Clone,
{
    /// Snapshot the keys of `entities`.
    ///
    /// `what` names the kind of entity for error messages.
    pub fn capture<'a, E, I, F>(what: impl Into<String>, entities: I, key_fn: F) -> Self
    where
        E: 'a,
        I: IntoIterator<Item = &'a E>,
        F: Fn(&E) -> K,
    {
        let mut keys = Vec::new();
        let mut index = HashSet::new();
        for entity in entities {
            let key = key_fn(entity);
            if index.insert(key.clone()) {
                keys.push(key);
            }
        }
        Self {
            what: what.into(),
            keys,
            index,
        }
    }

    /// Snapshot an explicit set of keys.
    pub fn from_keys(what: impl Into<String>, keys: impl IntoIterator<Item = K>) -> Self {
        let mut snapshot = Self {
            what: what.into(),
            keys: Vec::new(),
            index: HashSet::new(),
        };
        for key in keys {
            if snapshot.index.insert(key.clone()) {
                snapshot.keys.push(key);
            }
        }
        snapshot
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    /// Keys in capture order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// First entity of `after` whose key was not captured.
    ///
    /// When a mutation created several entities only the first one in
    /// registry order is returned.
    pub fn identify_new<'a, E, F>(&self, after: &'a [E], key_fn: F) -> Result<&'a E, ResolveError>
    where
        F: Fn(&E) -> K,
    {
        after
            .iter()
            .find(|entity| !self.contains(&key_fn(*entity)))
            .ok_or_else(|| ResolveError::ambiguous_or_missing(&self.what))
    }

    /// Every entity of `after` whose key was not captured, in registry order.
    pub fn identify_all_new<'a, E, F>(
        &self,
        after: &'a [E],
        key_fn: F,
    ) -> Result<Vec<&'a E>, ResolveError>
    where
        F: Fn(&E) -> K,
    {
        let fresh: Vec<&E> = after
            .iter()
            .filter(|entity| !self.contains(&key_fn(*entity)))
            .collect();
        if fresh.is_empty() {
            Err(ResolveError::ambiguous_or_missing(&self.what))
        } else {
            Ok(fresh)
        }
    }
}
