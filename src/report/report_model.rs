use std::rc::Rc;

use serde::Serialize;

use crate::structure::field::Field;
use crate::structure::namespace::{Child, Namespace};

/// Output sink for a built tree.
pub trait Render {
    fn render(&self, root: &Namespace) -> String;
}

/// Flat, serializable snapshot of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRow {
    pub dom_id: String,
    pub dom_name: String,
    pub value: String,
    pub field_type: String,
    pub component: String,
    pub has_value: bool,
    pub required: bool,
    pub label: Option<String>,
}

impl FieldRow {
    pub fn from_field(field: &Field) -> Self {
        Self {
            dom_id: field.dom_id().to_string(),
            dom_name: field.dom_name().to_string(),
            value: field.dom_value().to_string(),
            field_type: field.inferred_type().to_string(),
            component: field.inferred_component().to_string(),
            has_value: field.has_value(),
            required: field.is_required(),
            label: field.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormReport {
    pub root: String,
    pub dom_id: String,
    pub fields: Vec<FieldRow>,
}

impl FormReport {
    pub fn from_root(root: &Namespace) -> Self {
        Self {
            root: root.key().to_string(),
            dom_id: root.dom_id().to_string(),
            fields: collect_fields(root)
                .iter()
                .map(|field| FieldRow::from_field(field))
                .collect(),
        }
    }
}

/// Every field under `namespace`, depth first, in insertion order.
pub fn collect_fields(namespace: &Namespace) -> Vec<Rc<Field>> {
    let mut fields = Vec::new();
    walk(namespace, &mut fields);
    fields
}

fn walk(namespace: &Namespace, fields: &mut Vec<Rc<Field>>) {
    namespace.each(|child| match child {
        Child::Field(field) => fields.push(Rc::clone(field)),
        Child::Namespace(nested) => walk(nested, fields),
        Child::Collection(collection) => {
            for item in collection.iter() {
                walk(item, fields);
            }
        }
    });
}
