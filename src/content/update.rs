//! Partial-update semantics for a property set.
//!
//! An update carries up to three independent operations. They always apply
//! in the fixed order replace → add → delete, against the single snapshot
//! decoded from storage; iteration order of the incoming maps never matters
//! across categories.

use crate::content::PropertySet;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// The three operations of an update request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateRequest {
    /// Unconditionally overwrite these properties.
    #[serde(default)]
    pub replace: IndexMap<String, Vec<Value>>,

    /// Set new properties, or append to existing ones (union by
    /// concatenation — duplicates are kept).
    #[serde(default)]
    pub add: IndexMap<String, Vec<Value>>,

    /// Remove whole properties or individual values.
    #[serde(default)]
    pub delete: DeleteSpec,
}

/// The wire shape of `delete` is either a list of property names or a map
/// of property name to the values to remove from it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DeleteSpec {
    Names(Vec<String>),
    Values(IndexMap<String, Vec<Value>>),
}

impl Default for DeleteSpec {
    fn default() -> Self {
        Self::Names(Vec::new())
    }
}

impl UpdateRequest {
    /// An update that replaces a single property, as the delete/undelete
    /// operations do for `published`.
    pub fn replace_one(name: impl Into<String>, values: Vec<Value>) -> Self {
        let mut replace = IndexMap::new();
        replace.insert(name.into(), values);
        Self {
            replace,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.replace.is_empty()
            && self.add.is_empty()
            && match &self.delete {
                DeleteSpec::Names(names) => names.is_empty(),
                DeleteSpec::Values(map) => map.is_empty(),
            }
    }
}

/// Apply an update to a property set: replace, then add, then delete.
///
/// Deleting an absent property, by name or by value, is a no-op.
pub fn apply(properties: &mut PropertySet, update: &UpdateRequest) {
    for (name, values) in &update.replace {
        properties.set(name.clone(), values.clone());
    }

    for (name, values) in &update.add {
        properties.append(name.clone(), values.clone());
    }

    match &update.delete {
        DeleteSpec::Names(names) => {
            for name in names {
                properties.remove(name);
            }
        }
        DeleteSpec::Values(map) => {
            for (name, values) in map {
                properties.remove_values(name, values);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
