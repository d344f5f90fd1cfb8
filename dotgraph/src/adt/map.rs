//! This module implements the scoped map.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A stack of maps. Lookups walk the scopes from the innermost to the
/// outermost. This is the identity table that the graph builder uses to
/// resolve node and subgraph names while it walks nested subgraphs.
#[derive(Debug)]
pub struct ScopedMap<K, V> {
    stack: Vec<HashMap<K, V>>,
}

impl<K: Hash + Eq, V> Default for ScopedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> ScopedMap<K, V> {
    pub fn new() -> Self {
        ScopedMap { stack: Vec::new() }
    }

    pub fn push(&mut self) {
        self.stack.push(HashMap::new());
    }

    /// Drops the innermost scope and everything that was declared in it.
    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// Closes the innermost scope, but moves its entries into the enclosing
    /// scope. Names that were declared in a closed scope stay visible to the
    /// scopes that are opened after it. When there is no enclosing scope this
    /// is the same as `pop`.
    pub fn hoist(&mut self) {
        if let Some(top) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                for (k, v) in top {
                    parent.entry(k).or_insert(v);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Inserts \p key into the innermost scope. Returns the value that was
    /// previously bound to the key in that scope.
    pub fn insert(&mut self, key: K, val: V) -> Option<V> {
        if self.stack.is_empty() {
            self.push();
        }
        let scope = self.stack.last_mut()?;
        scope.insert(key, val)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        // For each scope, in reverse:
        self.stack.iter().rev().find_map(|scope| scope.get(key))
    }

    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// \returns True if the key is bound in the innermost scope.
    pub fn has_local<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.stack
            .last()
            .map_or(false, |scope| scope.contains_key(key))
    }
}

#[test]
fn test_scoped_map() {
    let mut map: ScopedMap<usize, usize> = ScopedMap::new();

    assert!(map.is_empty());
    map.push();
    assert_eq!(map.len(), 1);

    map.insert(1, 1);
    map.insert(2, 2);
    map.insert(3, 3);

    assert_eq!(map.get(&1), Some(&1));
    assert_eq!(map.get(&2), Some(&2));
    assert_eq!(map.get(&3), Some(&3));

    map.push();

    assert!(map.has(&1));
    assert!(!map.has_local(&1));

    map.insert(1, 4);
    map.insert(2, 5);
    assert_eq!(map.get(&1), Some(&4));
    assert_eq!(map.get(&2), Some(&5));
    assert_eq!(map.get(&3), Some(&3));

    map.pop();
    assert_eq!(map.get(&1), Some(&1));
    assert_eq!(map.get(&2), Some(&2));
    map.pop();
    assert!(!map.has(&1));
    assert!(map.is_empty());
}

#[test]
fn test_scoped_map_hoist() {
    let mut map: ScopedMap<String, usize> = ScopedMap::new();
    map.push();
    map.insert("a".to_string(), 1);

    // First sibling scope declares "b".
    map.push();
    map.insert("b".to_string(), 2);
    map.hoist();

    // The second sibling scope can see "b", and the outer binding of "a" was
    // not replaced by the hoisting.
    map.push();
    assert_eq!(map.get("b"), Some(&2));
    assert_eq!(map.get("a"), Some(&1));
    map.insert("a".to_string(), 3);
    map.hoist();
    assert_eq!(map.get("a"), Some(&1));
    assert_eq!(map.len(), 1);
}
