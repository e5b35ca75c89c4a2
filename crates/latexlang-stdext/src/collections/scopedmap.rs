//! A hash map whose mutations are rolled back when a scope ends.
//!
//! The map has a stack of scopes.
//! A scope is entered using [ScopedMap::enter] and left using [ScopedMap::leave].
//! All local insertions performed while a scope is active are undone when it is left.
//! Global insertions bypass the scopes: they overwrite the value in every enclosing
//!     scope and survive when the scopes are left.
//!
//! ```
//! # use latexlang_stdext::collections::scopedmap::{ScopedMap, Scope};
//! let mut widths = ScopedMap::default();
//! widths.insert("parindent", 15, Scope::Local);
//! widths.enter();
//! widths.insert("parindent", 0, Scope::Local);
//! widths.insert("unitlength", 2, Scope::Local);
//! assert_eq!(widths.get(&"parindent"), Some(&0));
//! assert_eq!(widths.leave(), Ok(()));
//! assert_eq!(widths.get(&"parindent"), Some(&15));
//! assert_eq!(widths.get(&"unitlength"), None);
//! ```
//!
//! Each scope records at most one undo action per key, so the cost of leaving a scope
//!     is proportional to the number of distinct keys written in it.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// Where an insertion takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scope {
    /// Rolled back when the current scope is left.
    Local,
    /// Persists beyond the end of every current scope.
    Global,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Undo<V> {
    Restore(V),
    Remove,
}

/// Error returned by [ScopedMap::leave] when no scope is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoScopeToLeaveError;

impl std::fmt::Display for NoScopeToLeaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "there is no scope to leave")
    }
}

impl std::error::Error for NoScopeToLeaveError {}

/// See the module documentation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "K: Eq + Hash + serde::Serialize, V: serde::Serialize",
        deserialize = "K: Eq + Hash + serde::Deserialize<'de>, V: serde::Deserialize<'de>"
    ))
)]
pub struct ScopedMap<K, V> {
    values: HashMap<K, V>,
    // The outermost scope is implicit and never rolled back, so it has no entry here.
    undo: Vec<HashMap<K, Undo<V>>>,
}

impl<K, V> Default for ScopedMap<K, V> {
    fn default() -> Self {
        ScopedMap {
            values: HashMap::new(),
            undo: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> ScopedMap<K, V> {
    /// Inserts a value and returns whether a value already existed at the key.
    pub fn insert(&mut self, key: K, mut value: V, scope: Scope) -> bool {
        let undo = match scope {
            Scope::Local => self.undo.last_mut(),
            Scope::Global => {
                for undo in &mut self.undo {
                    undo.remove(&key);
                }
                None
            }
        };
        match (self.values.get_mut(&key), undo) {
            (Some(current), None) => {
                *current = value;
                true
            }
            (Some(current), Some(undo)) => {
                std::mem::swap(current, &mut value);
                if let Entry::Vacant(entry) = undo.entry(key) {
                    entry.insert(Undo::Restore(value));
                }
                true
            }
            (None, undo) => {
                if let Some(undo) = undo {
                    undo.entry(key.clone()).or_insert(Undo::Remove);
                }
                self.values.insert(key, value);
                false
            }
        }
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.values.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Enters a new scope.
    pub fn enter(&mut self) {
        self.undo.push(HashMap::new());
    }

    /// Leaves the current scope, rolling back its local insertions.
    pub fn leave(&mut self) -> Result<(), NoScopeToLeaveError> {
        let undo = self.undo.pop().ok_or(NoScopeToLeaveError)?;
        for (key, action) in undo {
            match action {
                Undo::Remove => {
                    self.values.remove(&key);
                }
                Undo::Restore(value) => {
                    self.values.insert(key, value);
                }
            }
        }
        Ok(())
    }

    /// Returns the number of active scopes, not counting the outermost one.
    pub fn depth(&self) -> usize {
        self.undo.len()
    }

    /// Iterates over the currently visible key-value pairs.
    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, K, V> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut map = ScopedMap::default();
        assert!(!map.insert("a", 1, Scope::Local));
        assert!(map.insert("a", 2, Scope::Local));
        assert_eq!(map.get(&"a"), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn local_insert_is_rolled_back() {
        let mut map = ScopedMap::default();
        map.insert("a", 1, Scope::Local);
        map.enter();
        map.insert("a", 2, Scope::Local);
        map.insert("a", 3, Scope::Local);
        map.insert("b", 4, Scope::Local);
        assert_eq!(map.leave(), Ok(()));
        assert_eq!(map.get(&"a"), Some(&1));
        assert_eq!(map.get(&"b"), None);
    }

    #[test]
    fn nested_scopes() {
        let mut map = ScopedMap::default();
        map.insert("a", 1, Scope::Local);
        map.enter();
        map.insert("a", 2, Scope::Local);
        map.enter();
        map.insert("a", 3, Scope::Local);
        assert_eq!(map.depth(), 2);
        assert_eq!(map.leave(), Ok(()));
        assert_eq!(map.get(&"a"), Some(&2));
        assert_eq!(map.leave(), Ok(()));
        assert_eq!(map.get(&"a"), Some(&1));
    }

    #[test]
    fn global_insert_survives() {
        let mut map = ScopedMap::default();
        map.insert("a", 1, Scope::Local);
        map.enter();
        map.insert("a", 2, Scope::Local);
        map.enter();
        map.insert("a", 3, Scope::Global);
        map.insert("b", 4, Scope::Global);
        assert_eq!(map.leave(), Ok(()));
        assert_eq!(map.leave(), Ok(()));
        assert_eq!(map.get(&"a"), Some(&3));
        assert_eq!(map.get(&"b"), Some(&4));
    }

    #[test]
    fn global_then_local_in_same_scope() {
        let mut map = ScopedMap::default();
        map.enter();
        map.insert("a", 1, Scope::Global);
        map.insert("a", 2, Scope::Local);
        assert_eq!(map.leave(), Ok(()));
        assert_eq!(map.get(&"a"), Some(&1));
    }

    #[test]
    fn leave_without_scope() {
        let mut map = ScopedMap::<String, i32>::default();
        assert_eq!(map.leave(), Err(NoScopeToLeaveError));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde() {
        let mut map = ScopedMap::default();
        map.insert("a".to_string(), 1, Scope::Local);
        map.enter();
        map.insert("a".to_string(), 2, Scope::Local);
        let serialized = serde_json::to_string(&map).unwrap();
        let mut got: ScopedMap<String, i32> = serde_json::from_str(&serialized).unwrap();
        assert_eq!(got.get(&"a".to_string()), Some(&2));
        assert_eq!(got.leave(), Ok(()));
        assert_eq!(got.get(&"a".to_string()), Some(&1));
    }
}
