//! Mapping tuples: immutable attribute → binding maps.
//!
//! Attribute order is the sorted order of names so that display, hashing and
//! serialization are reproducible. Tuple order inside a relation is what
//! operators preserve; attribute order inside a tuple carries no meaning.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::{Binding, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTuple {
    bindings: BTreeMap<String, Binding>,
}

impl MappingTuple {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; replaces any previous binding under `name`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, binding: impl Into<Binding>) -> Self {
        self.bindings.insert(name.into(), binding.into());
        self
    }

    /// The binding for `name`, or `None` when the attribute is absent.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// The bound value for `name`; `None` when absent or epsilon.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(Binding::value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Union of two tuples. On a shared name the binding from `other` wins;
    /// callers that need disjointness check it before merging.
    #[must_use]
    pub fn merged(&self, other: &MappingTuple) -> MappingTuple {
        let mut bindings = self.bindings.clone();
        bindings.extend(other.bindings.iter().map(|(k, v)| (k.clone(), v.clone())));
        MappingTuple { bindings }
    }
}

impl<K: Into<String>> FromIterator<(K, Binding)> for MappingTuple {
    fn from_iter<I: IntoIterator<Item = (K, Binding)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl fmt::Display for MappingTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, binding)) in self.bindings.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {binding}")?;
        }
        write!(f, "}}")
    }
}
