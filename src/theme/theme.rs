use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// A theme entry is either a class list or a reference to another entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeEntry {
    Classes(String),
    Inherit { inherit: String },
}

/// Component name -> CSS classes, with inheritance between entries.
///
/// ```yaml
/// string: "input input-bordered"
/// email: { inherit: string }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    entries: BTreeMap<String, ThemeEntry>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes(mut self, property: impl Into<String>, classes: impl Into<String>) -> Self {
        self.entries
            .insert(property.into(), ThemeEntry::Classes(classes.into()));
        self
    }

    pub fn with_inherit(mut self, property: impl Into<String>, target: impl Into<String>) -> Self {
        self.entries.insert(
            property.into(),
            ThemeEntry::Inherit {
                inherit: target.into(),
            },
        );
        self
    }

    pub fn get(&self, property: &str) -> Option<&ThemeEntry> {
        self.entries.get(property)
    }

    /// Classes for `property`, following `inherit` references. Unknown
    /// properties and reference cycles resolve to `None`.
    pub fn resolve(&self, property: &str) -> Option<&str> {
        let mut visited = HashSet::new();
        let mut current = property;

        loop {
            if current.is_empty() || !visited.insert(current) {
                return None;
            }
            match self.entries.get(current)? {
                ThemeEntry::Classes(classes) => return Some(classes),
                ThemeEntry::Inherit { inherit } => current = inherit,
            }
        }
    }
}
