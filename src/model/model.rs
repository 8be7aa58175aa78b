use std::fmt;

use serde::{Deserialize, Serialize};

use crate::infer::field_type::FieldType;
use crate::value::value_model::Value;

// ============================================================================
// Schema capabilities a source object may expose
// ============================================================================

/// A source object that can be bound to a namespace.
///
/// Only [`Model::read`] is mandatory. Every other method is an optional
/// capability check; the default implementation reports "not supported",
/// and callers skip the corresponding step instead of failing.
pub trait Model: fmt::Debug {
    /// Reads an attribute. `None` when the object does not expose `key`.
    fn read(&self, key: &str) -> Option<Value>;

    /// Declared enumerated values for `key`.
    fn enum_values(&self, _key: &str) -> Option<Vec<String>> {
        None
    }

    /// Declared column/attribute type for `key`.
    fn declared_type(&self, _key: &str) -> Option<FieldType> {
        None
    }

    /// File attachment declared under `key`.
    fn attachment(&self, _key: &str) -> Option<Attachment> {
        None
    }

    /// Relationship declared under `key`.
    fn association(&self, _key: &str) -> Option<Association> {
        None
    }

    /// Validators declared for `key`. Used for inference only, never run.
    fn validators(&self, _key: &str) -> Vec<ValidatorKind> {
        Vec::new()
    }

    /// Primary identifier of the object.
    fn identity(&self) -> Identity {
        Identity::Unsupported
    }
}

/// Outcome of probing an object for its primary identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// The object has no primary-key accessor.
    Unsupported,
    /// The accessor exists but the object has not been assigned an id yet.
    New,
    Persisted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    BelongsTo,
    HasOne,
    HasMany,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub name: String,
    pub kind: AssociationKind,
}

impl Association {
    pub fn is_collection(&self) -> bool {
        self.kind == AssociationKind::HasMany
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorKind {
    Presence,
    Numericality,
    EmailFormat,
    Length,
}
