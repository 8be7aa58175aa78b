use serde::{Deserialize, Serialize};

use crate::infer::component::{Component, component_from_key, component_from_validators};
use crate::infer::field_type::FieldType;
use crate::value::resolve::resolve;
use crate::value::value_model::Value;

/// Precedence knobs for type inference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferencePolicy {
    /// Attachments are usually implemented as associations, so they are
    /// checked first unless this is turned off.
    #[serde(default = "default_true")]
    pub attachments_before_associations: bool,
}

impl Default for InferencePolicy {
    fn default() -> Self {
        Self {
            attachments_before_associations: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Infers the semantic type of `key` on `source`.
///
/// Resolution order: enum declaration, declared column type, attachment,
/// association (or association before attachment, per policy), runtime
/// value kind, then `string`.
pub fn infer_type(source: Option<&Value>, key: &str, policy: &InferencePolicy) -> FieldType {
    if let Some(model) = source.and_then(Value::as_model) {
        if model.enum_values(key).is_some() {
            return FieldType::Enum;
        }

        if let Some(declared) = model.declared_type(key) {
            return declared;
        }

        let attachment = model.attachment(key).map(|_| FieldType::Attachment);
        let association = model.association(key).map(|_| FieldType::Association);
        let reflected = if policy.attachments_before_associations {
            attachment.or(association)
        } else {
            association.or(attachment)
        };
        if let Some(field_type) = reflected {
            return field_type;
        }
    }

    match resolve(source, key) {
        Some(value) => infer_type_from_value(&value),
        None => FieldType::String,
    }
}

pub fn infer_type_from_value(value: &Value) -> FieldType {
    match value {
        Value::Integer(_) => FieldType::Integer,
        Value::Float(_) => FieldType::Float,
        Value::Decimal(_) => FieldType::Decimal,
        Value::Bool(_) => FieldType::Boolean,
        Value::Date(_) => FieldType::Date,
        Value::DateTime(_) => FieldType::DateTime,
        Value::Time(_) => FieldType::Time,
        Value::Map(_) => FieldType::Json,
        _ => FieldType::String,
    }
}

pub fn infer_component(source: Option<&Value>, key: &str, policy: &InferencePolicy) -> Component {
    component_for(&infer_type(source, key, policy), source, key)
}

/// Maps an already inferred type to a widget hint. Textual types are
/// refined by key name, then by declared validators.
pub fn component_for(field_type: &FieldType, source: Option<&Value>, key: &str) -> Component {
    match field_type {
        FieldType::String | FieldType::Citext => {
            refine_textual(source, key).unwrap_or(Component::String)
        }
        FieldType::Text => refine_textual(source, key).unwrap_or(Component::Text),
        FieldType::Integer | FieldType::Float | FieldType::Decimal => Component::Number,
        FieldType::Date | FieldType::DateTime | FieldType::Time => Component::DateTime,
        FieldType::Boolean => Component::Boolean,
        FieldType::Json | FieldType::Jsonb | FieldType::Hstore => Component::Code,
        FieldType::Enum => Component::Enum,
        FieldType::Attachment => Component::Attachment,
        FieldType::Association => Component::Association,
        FieldType::Other(name) => Component::Other(name.clone()),
    }
}

fn refine_textual(source: Option<&Value>, key: &str) -> Option<Component> {
    component_from_key(key).or_else(|| {
        let validators = source.and_then(Value::as_model)?.validators(key);
        component_from_validators(&validators)
    })
}
