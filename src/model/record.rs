use std::collections::BTreeMap;

use crate::infer::field_type::FieldType;
use crate::model::model::{
    Association, AssociationKind, Attachment, Identity, Model, ValidatorKind,
};
use crate::value::value_model::Value;

/// A schema-backed source object.
///
/// Attributes are plain values; the schema side (columns, enums,
/// relationships, attachments, validators) is declared explicitly so type
/// inference can consult it.
#[derive(Debug, Clone)]
pub struct Record {
    pub model_name: String,
    pub identity: Identity,
    attributes: BTreeMap<String, Value>,
    columns: BTreeMap<String, FieldType>,
    enums: BTreeMap<String, Vec<String>>,
    associations: BTreeMap<String, AssociationKind>,
    attachments: BTreeMap<String, bool>,
    validators: BTreeMap<String, Vec<ValidatorKind>>,
}

impl Record {
    /// A record that has a primary key accessor but no id yet.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            identity: Identity::New,
            attributes: BTreeMap::new(),
            columns: BTreeMap::new(),
            enums: BTreeMap::new(),
            associations: BTreeMap::new(),
            attachments: BTreeMap::new(),
            validators: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl ToString) -> Self {
        self.identity = Identity::Persisted(id.to_string());
        self
    }

    /// Drop the primary key accessor entirely.
    pub fn without_identity(mut self) -> Self {
        self.identity = Identity::Unsupported;
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn column(mut self, key: impl Into<String>, field_type: FieldType) -> Self {
        self.columns.insert(key.into(), field_type);
        self
    }

    pub fn enumeration<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enums
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_association(mut self, key: impl Into<String>, kind: AssociationKind) -> Self {
        self.associations.insert(key.into(), kind);
        self
    }

    pub fn with_attachment(mut self, key: impl Into<String>, multiple: bool) -> Self {
        self.attachments.insert(key.into(), multiple);
        self
    }

    pub fn validates(mut self, key: impl Into<String>, kind: ValidatorKind) -> Self {
        self.validators.entry(key.into()).or_default().push(kind);
        self
    }

    pub fn into_value(self) -> Value {
        Value::object(self)
    }
}

impl Model for Record {
    fn read(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.attributes.get(key) {
            return Some(value.clone());
        }

        // Declared but unset attributes still respond, with nil.
        let declared = self.columns.contains_key(key)
            || self.enums.contains_key(key)
            || self.associations.contains_key(key)
            || self.attachments.contains_key(key);
        declared.then_some(Value::Null)
    }

    fn enum_values(&self, key: &str) -> Option<Vec<String>> {
        self.enums.get(key).cloned()
    }

    fn declared_type(&self, key: &str) -> Option<FieldType> {
        self.columns.get(key).cloned()
    }

    fn attachment(&self, key: &str) -> Option<Attachment> {
        self.attachments.get(key).map(|multiple| Attachment {
            name: key.to_string(),
            multiple: *multiple,
        })
    }

    fn association(&self, key: &str) -> Option<Association> {
        self.associations.get(key).map(|kind| Association {
            name: key.to_string(),
            kind: *kind,
        })
    }

    fn validators(&self, key: &str) -> Vec<ValidatorKind> {
        self.validators.get(key).cloned().unwrap_or_default()
    }

    fn identity(&self) -> Identity {
        self.identity.clone()
    }
}
