use std::collections::BTreeMap;
use std::path::PathBuf;

use form_tree::infer::field_type::FieldType;
use form_tree::model::model::{AssociationKind, Model, ValidatorKind};
use form_tree::model::record::Record;
use form_tree::value::value_model::Value;

/// Builds a `Value::Map` from literal pairs.
pub fn map(entries: Vec<(&str, Value)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}

pub fn list(items: Vec<Value>) -> Value {
    Value::List(items)
}

/// A persisted user with a typical schema.
pub fn user_record() -> Record {
    Record::new("User")
        .with_id(42)
        .column("name", FieldType::String)
        .column("bio", FieldType::Text)
        .column("age", FieldType::Integer)
        .column("admin", FieldType::Boolean)
        .column("email", FieldType::String)
        .column("password_digest", FieldType::String)
        .enumeration("role", ["member", "owner"])
        .with_association("team", AssociationKind::BelongsTo)
        .with_attachment("avatar", false)
        .validates("name", ValidatorKind::Presence)
        .attr("name", "Alice")
        .attr("bio", "Rustacean")
        .attr("age", 36)
        .attr("admin", false)
        .attr("email", "alice@example.com")
        .attr("role", "owner")
}

pub fn user() -> Value {
    user_record().into_value()
}

/// A source object exposing attributes and nothing else.
#[derive(Debug, Default)]
pub struct PlainObject {
    pub fields: BTreeMap<String, Value>,
}

impl PlainObject {
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn into_value(self) -> Value {
        Value::object(self)
    }
}

impl Model for PlainObject {
    fn read(&self, key: &str) -> Option<Value> {
        self.fields.get(key).cloned()
    }
}

/// A fresh path in the system temp dir; any previous file is removed.
pub fn temp_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("form_tree_tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}
