use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::infer::field_type::FieldType;
use crate::model::model::{AssociationKind, ValidatorKind};

/// A form described in YAML (or JSON): the root key, the object it is
/// bound to, and which fields to build.
///
/// ```yaml
/// key: user
/// object:
///   model: User
///   id: 42
///   columns: { age: integer }
///   attributes:
///     name: Alice
///     age: 36
/// fields:
///   - name
///   - field: age
///     label: Age
///   - nest_one: profile
///     fields: [bio]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDocument {
    pub key: String,

    #[serde(default)]
    pub dom_id: Option<String>,

    #[serde(default)]
    pub object: Option<SourceSpec>,

    #[serde(default)]
    pub fields: Vec<LayoutSpec>,
}

/// A source value. Maps carrying a `model` key become records; every
/// sequence stays a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceSpec {
    // Structs also deserialize from sequences, so lists must be tried first.
    List(Vec<SourceSpec>),
    Record(RecordSpec),
    Map(IndexMap<String, SourceSpec>),
    Scalar(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSpec {
    pub model: String,

    /// Missing or null means a new, unsaved record.
    #[serde(default)]
    pub id: Option<serde_json::Value>,

    /// `false` for objects with no primary key accessor at all.
    #[serde(default = "default_true")]
    pub primary_key: bool,

    #[serde(default)]
    pub columns: BTreeMap<String, FieldType>,

    #[serde(default)]
    pub enums: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub associations: BTreeMap<String, AssociationKind>,

    /// Attachment name -> whether it holds many files.
    #[serde(default)]
    pub attachments: BTreeMap<String, bool>,

    #[serde(default)]
    pub validators: BTreeMap<String, Vec<ValidatorKind>>,

    #[serde(default)]
    pub attributes: IndexMap<String, SourceSpec>,
}

/// One entry of a field layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutSpec {
    /// A plain field by key
    Name(String),

    NestOne {
        nest_one: String,
        #[serde(default, rename = "as")]
        as_key: Option<String>,
        #[serde(default)]
        fields: Vec<LayoutSpec>,
    },

    NestMany {
        nest_many: String,
        #[serde(default, rename = "as")]
        as_key: Option<String>,
        #[serde(default)]
        fields: Vec<LayoutSpec>,
    },

    Field {
        field: String,
        #[serde(default)]
        value: Option<serde_json::Value>,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        hint: Option<String>,
        #[serde(default)]
        placeholder: Option<String>,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        required: Option<bool>,
    },
}

fn default_true() -> bool {
    true
}
