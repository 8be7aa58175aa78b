use std::rc::Rc;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::document::document_model::{FormDocument, LayoutSpec, RecordSpec, SourceSpec};
use crate::document::error::DocumentError;
use crate::infer::field_type::FieldType;
use crate::model::record::Record;
use crate::structure::context::FormContext;
use crate::structure::error::StructureError;
use crate::structure::field::FieldOptions;
use crate::structure::namespace::{Namespace, NestOne, RootOptions};
use crate::structure::namespace_collection::NestMany;
use crate::value::value_model::Value;

// ============================================================================
// Loading
// ============================================================================

/// Read and parse a form document. YAML and JSON are both accepted.
pub fn load_document(path: &str) -> Result<FormDocument, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_string(),
        source,
    })?;
    parse_document(&content).map_err(|e| match e {
        DocumentError::Parse { source, .. } => DocumentError::Parse {
            context: path.to_string(),
            source,
        },
        other => other,
    })
}

pub fn parse_document(content: &str) -> Result<FormDocument, DocumentError> {
    serde_yaml::from_str(content).map_err(|source| DocumentError::Parse {
        context: "form document".to_string(),
        source,
    })
}

// ============================================================================
// Source objects
// ============================================================================

pub fn source_value(spec: &SourceSpec) -> Value {
    match spec {
        SourceSpec::Record(record) => record_value(record),
        SourceSpec::List(items) => Value::List(items.iter().map(source_value).collect()),
        SourceSpec::Map(map) => Value::Map(
            map.iter()
                .map(|(key, item)| (key.clone(), source_value(item)))
                .collect(),
        ),
        SourceSpec::Scalar(json) => Value::from(json.clone()),
    }
}

fn record_value(spec: &RecordSpec) -> Value {
    let mut record = Record::new(&spec.model);

    match &spec.id {
        _ if !spec.primary_key => record = record.without_identity(),
        None | Some(serde_json::Value::Null) => {}
        Some(serde_json::Value::String(id)) => record = record.with_id(id),
        Some(other) => record = record.with_id(other),
    }

    for (key, field_type) in &spec.columns {
        record = record.column(key, field_type.clone());
    }
    for (key, values) in &spec.enums {
        record = record.enumeration(key, values.iter().cloned());
    }
    for (key, kind) in &spec.associations {
        record = record.with_association(key, *kind);
    }
    for (key, multiple) in &spec.attachments {
        record = record.with_attachment(key, *multiple);
    }
    for (key, kinds) in &spec.validators {
        for kind in kinds {
            record = record.validates(key, kind.clone());
        }
    }
    for (key, item) in &spec.attributes {
        let value = source_value(item);
        let value = match spec.columns.get(key) {
            Some(declared) => coerce_declared(value, declared),
            None => value,
        };
        record = record.attr(key, value);
    }

    record.into_value()
}

/// Parses string attributes into the declared column type when possible.
pub fn coerce_declared(value: Value, declared: &FieldType) -> Value {
    let Value::String(raw) = &value else {
        return value;
    };

    let parsed = match declared {
        FieldType::Date => NaiveDate::from_str(raw).ok().map(Value::Date),
        FieldType::DateTime => NaiveDateTime::from_str(raw).ok().map(Value::DateTime),
        FieldType::Time => NaiveTime::from_str(raw).ok().map(Value::Time),
        FieldType::Decimal => Decimal::from_str(raw).ok().map(Value::Decimal),
        FieldType::Integer => raw.parse::<i64>().ok().map(Value::Integer),
        FieldType::Float => raw.parse::<f64>().ok().map(Value::Float),
        _ => None,
    };

    parsed.unwrap_or(value)
}

// ============================================================================
// Tree building
// ============================================================================

/// Builds the namespace tree a document describes.
pub fn build_form(
    document: &FormDocument,
    context: Rc<FormContext>,
) -> Result<Rc<Namespace>, DocumentError> {
    let object = document.object.as_ref().map(source_value).unwrap_or_default();
    let root = Namespace::root_with(
        document.key.as_str(),
        object,
        RootOptions {
            context: Some(context),
            dom_id: document.dom_id.clone(),
            ..RootOptions::default()
        },
    );

    apply_layout(&root, &document.fields)?;
    Ok(root)
}

pub fn apply_layout(namespace: &Namespace, layout: &[LayoutSpec]) -> Result<(), StructureError> {
    for entry in layout {
        match entry {
            LayoutSpec::Name(key) => {
                namespace.field(key)?;
            }
            LayoutSpec::Field {
                field,
                value,
                label,
                hint,
                placeholder,
                description,
                required,
            } => {
                let mut options = FieldOptions::new();
                if let Some(value) = value {
                    options = options.value(Value::from(value.clone()));
                }
                if let Some(label) = label {
                    options = options.label(label.as_str());
                }
                if let Some(hint) = hint {
                    options = options.hint(hint.as_str());
                }
                if let Some(placeholder) = placeholder {
                    options = options.placeholder(placeholder.as_str());
                }
                if let Some(description) = description {
                    options = options.description(description.as_str());
                }
                if let Some(required) = required {
                    options = options.required(*required);
                }
                namespace.field_with(field, options)?;
            }
            LayoutSpec::NestOne {
                nest_one,
                as_key,
                fields,
            } => {
                let mut options = NestOne::new();
                if let Some(as_key) = as_key {
                    options = options.as_key(as_key);
                }
                let nested = namespace.nest_one_with(nest_one, options)?;
                apply_layout(&nested, fields)?;
            }
            LayoutSpec::NestMany {
                nest_many,
                as_key,
                fields,
            } => {
                // The item callback cannot return errors; keep the first.
                let mut failure = None;
                let mut options = NestMany::each_item(|item| {
                    if failure.is_none() {
                        failure = apply_layout(item, fields).err();
                    }
                });
                if let Some(as_key) = as_key {
                    options = options.as_key(as_key);
                }
                namespace.nest_many(nest_many, options)?;
                if let Some(e) = failure {
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
