use std::fmt;

use crate::structure::node::NodeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// A namespace collection was built without a per-item callback
    MissingItemCallback { key: String },

    /// A key already holds a child of another kind in the same namespace
    KindConflict {
        key: String,
        existing: NodeKind,
        requested: NodeKind,
    },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::MissingItemCallback { key } => {
                write!(f, "Collection '{}' requires a per-item callback", key)
            }
            StructureError::KindConflict {
                key,
                existing,
                requested,
            } => {
                write!(
                    f,
                    "Key '{}' already holds a {}, cannot build a {}",
                    key, existing, requested
                )
            }
        }
    }
}

impl std::error::Error for StructureError {}
