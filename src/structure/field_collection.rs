use std::rc::Rc;

use crate::structure::builder::FieldInit;
use crate::structure::field::{Field, FieldOptions};
use crate::structure::node::Key;
use crate::value::value_model::Value;

/// Repeats a field over a collection, e.g. for dynamically numbered rows.
///
/// Fields produced here are parented to the repeated field but never
/// stored in the tree.
pub struct FieldRepeater<'a> {
    field: &'a Field,
    items: Vec<Value>,
}

impl<'a> FieldRepeater<'a> {
    pub(crate) fn new(field: &'a Field, collection: Value) -> Self {
        let items = match collection {
            Value::Null => Vec::new(),
            Value::List(items) => items,
            Value::Map(map) => map.into_keys().map(Value::String).collect(),
            other => vec![other],
        };
        Self { field, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = RepeatedItem<'a>> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| RepeatedItem {
                key: Key::from(item.to_display()),
                index,
                field: self.field,
            })
    }

    pub fn each(&self, mut callback: impl FnMut(&RepeatedItem<'a>)) {
        for item in self.items() {
            callback(&item);
        }
    }
}

/// One element of a [`FieldRepeater`].
pub struct RepeatedItem<'a> {
    key: Key,
    index: usize,
    field: &'a Field,
}

impl RepeatedItem<'_> {
    /// The element, stringified.
    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Builds a new field keyed by this element under the repeated field.
    /// Every call returns a new instance.
    pub fn field(&self, options: FieldOptions) -> Field {
        let builder = options
            .builder
            .unwrap_or_else(|| Rc::clone(self.field.builder()));

        builder.build(FieldInit {
            key: self.key.clone(),
            parent: Rc::clone(self.field.node()),
            object: None,
            value: options.value,
            options: options.attributes,
            context: Rc::clone(self.field.context()),
            builder: Rc::clone(&builder),
        })
    }
}
