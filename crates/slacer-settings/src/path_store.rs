//! Path Store
//!
//! A nested map of settings addressed by dot-separated keys
//! (`"buildVolume.size.x"`).
//!
//! Writing a mapping onto an existing mapping merges key by key and recurses
//! into keys present on both sides, so partial updates never erase sibling
//! fields. Writing a scalar replaces whatever was at the path.
//!
//! The store is case-sensitive and performs no key normalization.

use serde_json::{Map, Value};
use slacer_core::StoreError;

/// Dot-addressed nested settings tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathStore {
    root: Map<String, Value>,
}

impl PathStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store populated from a defaults tree
    pub fn with_defaults(defaults: Map<String, Value>) -> Self {
        let mut store = Self::new();
        store.merge(defaults);
        store
    }

    /// Split a path into its segments, rejecting empty ones
    fn segments(path: &str) -> Result<Vec<&str>, StoreError> {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(StoreError::InvalidPath {
                path: path.to_string(),
            });
        }
        Ok(segments)
    }

    /// Get the subtree or leaf at `path`
    pub fn get(&self, path: &str) -> Result<&Value, StoreError> {
        let not_found = || StoreError::NotFound {
            path: path.to_string(),
        };

        let segments = Self::segments(path)?;
        let (first, rest) = segments.split_first().ok_or_else(not_found)?;

        let mut value = self.root.get(*first).ok_or_else(not_found)?;
        for segment in rest {
            value = value
                .as_object()
                .and_then(|map| map.get(*segment))
                .ok_or_else(not_found)?;
        }
        Ok(value)
    }

    /// Check whether `path` resolves to a value
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_ok()
    }

    /// Write `value` at `path`
    ///
    /// Missing intermediate mappings are created. An intermediate segment
    /// that currently holds a scalar fails with [`StoreError::TypeConflict`].
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), StoreError> {
        let segments = Self::segments(path)?;
        let (last, parents) = segments.split_last().ok_or_else(|| StoreError::InvalidPath {
            path: path.to_string(),
        })?;

        let mut node = &mut self.root;
        for segment in parents {
            let entry = node
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            node = match entry {
                Value::Object(map) => map,
                _ => {
                    return Err(StoreError::TypeConflict {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    })
                }
            };
        }

        match node.get_mut(*last) {
            Some(existing) => merge_values(existing, value),
            None => {
                node.insert(last.to_string(), value);
            }
        }
        Ok(())
    }

    /// Remove and return the value at `path`
    pub fn remove(&mut self, path: &str) -> Result<Value, StoreError> {
        let not_found = || StoreError::NotFound {
            path: path.to_string(),
        };

        let segments = Self::segments(path)?;
        let (last, parents) = segments.split_last().ok_or_else(not_found)?;

        let mut node = &mut self.root;
        for segment in parents {
            node = node
                .get_mut(*segment)
                .and_then(Value::as_object_mut)
                .ok_or_else(not_found)?;
        }
        node.remove(*last).ok_or_else(not_found)
    }

    /// Overlay a tree onto the store
    ///
    /// Keys the overlay omits keep their current values, so overlaying a
    /// persisted snapshot onto defaults never loses a default key.
    pub fn merge(&mut self, overlay: Map<String, Value>) {
        for (key, value) in overlay {
            match self.root.get_mut(&key) {
                Some(existing) => merge_values(existing, value),
                None => {
                    self.root.insert(key, value);
                }
            }
        }
    }

    /// Top-level namespaces and their subtrees
    pub fn namespaces(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.root.iter()
    }

    /// Borrow the root mapping
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Copy the whole tree into a single value
    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }
}

/// Merge `incoming` into `target`
///
/// Mapping onto mapping recurses per key; anything else replaces `target`.
pub fn merge_values(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
