//! The attribute dictionary that graphs, nodes and edges own.

use crate::dot::parser::ast::DotId;
use std::iter::FromIterator;

/// An attribute dictionary that keeps the insertion order of the keys, so
/// that exporting a graph is deterministic. Values are kept in their raw
/// textual form; see the `attrs` module for the typed accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    list: Vec<(String, DotId)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&DotId> {
        self.list.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// \returns the raw text of the attribute \p name.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).map(|v| v.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets \p name to \p value. An existing key keeps its position.
    pub fn insert(&mut self, name: &str, value: DotId) {
        if let Some(slot) = self.list.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value;
            return;
        }
        self.list.push((name.to_string(), value));
    }

    /// Sets \p name to the text \p value, picking the lexical form that can
    /// represent it.
    pub fn set_str(&mut self, name: &str, value: &str) {
        self.insert(name, DotId::from_text(value));
    }

    pub fn remove(&mut self, name: &str) -> Option<DotId> {
        let idx = self.list.iter().position(|(k, _)| k == name)?;
        Some(self.list.remove(idx).1)
    }

    /// Copies all of the entries of \p other into this dictionary. Entries
    /// of \p other win.
    pub fn merge(&mut self, other: &Attributes) {
        for (k, v) in other.iter() {
            self.insert(k, v.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DotId)> {
        self.list.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|(k, _)| k.as_str())
    }
}

impl<'a> FromIterator<(&'a str, DotId)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (&'a str, DotId)>>(iter: T) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}
