use std::collections::BTreeMap;
use std::rc::Rc;

use crate::structure::context::FormContext;
use crate::structure::field::Field;
use crate::structure::node::{Key, Node};
use crate::value::value_model::Value;

/// Everything a [`FieldBuilder`] needs to produce a field.
pub struct FieldInit {
    pub key: Key,
    pub parent: Rc<Node>,
    pub object: Option<Value>,
    /// Explicit value; `None` means "read it from `object`".
    pub value: Option<Value>,
    pub options: BTreeMap<String, Value>,
    pub context: Rc<FormContext>,
    /// Builder the new field hands to fields it spawns itself.
    pub builder: Rc<dyn FieldBuilder>,
}

/// Field construction strategy of a namespace branch.
///
/// Any `Fn(FieldInit) -> Field` closure is a builder, which lets one branch
/// of a tree preconfigure its fields differently from another.
pub trait FieldBuilder {
    fn build(&self, init: FieldInit) -> Field;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFieldBuilder;

impl FieldBuilder for DefaultFieldBuilder {
    fn build(&self, init: FieldInit) -> Field {
        Field::new(init)
    }
}

impl<F> FieldBuilder for F
where
    F: Fn(FieldInit) -> Field,
{
    fn build(&self, init: FieldInit) -> Field {
        self(init)
    }
}

pub fn default_builder() -> Rc<dyn FieldBuilder> {
    Rc::new(DefaultFieldBuilder)
}
