use std::cell::{OnceCell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::infer::component::Component;
use crate::infer::engine::{component_for, infer_type};
use crate::infer::field_type::FieldType;
use crate::model::model::{Association, Attachment, ValidatorKind};
use crate::structure::builder::{FieldBuilder, FieldInit};
use crate::structure::context::FormContext;
use crate::structure::dom::DomPath;
use crate::structure::field_collection::FieldRepeater;
use crate::structure::node::{Key, Node, NodeKind};
use crate::value::resolve::resolve_or_null;
use crate::value::value_model::Value;

// ============================================================================
// Field options
// ============================================================================

/// Options accepted when building a field.
#[derive(Clone, Default)]
pub struct FieldOptions {
    pub(crate) value: Option<Value>,
    pub(crate) builder: Option<Rc<dyn FieldBuilder>>,
    pub(crate) template: bool,
    pub(crate) attributes: BTreeMap<String, Value>,
}

impl FieldOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit value; overrides whatever the source object holds, even
    /// when it is null, `false` or empty.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn builder(mut self, builder: Rc<dyn FieldBuilder>) -> Self {
        self.builder = Some(builder);
        self
    }

    /// Build a fresh field on every call instead of the memoized one.
    pub fn template(mut self) -> Self {
        self.template = true;
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn label(self, label: impl Into<Value>) -> Self {
        self.option("label", label)
    }

    pub fn hint(self, hint: impl Into<Value>) -> Self {
        self.option("hint", hint)
    }

    pub fn placeholder(self, placeholder: impl Into<Value>) -> Self {
        self.option("placeholder", placeholder)
    }

    pub fn description(self, description: impl Into<Value>) -> Self {
        self.option("description", description)
    }

    pub fn required(self, required: bool) -> Self {
        self.option("required", required)
    }
}

// ============================================================================
// Field
// ============================================================================

/// A leaf of the tree: one renderable input.
///
/// The value is resolved once at construction; later changes to the source
/// object are not reflected.
pub struct Field {
    node: Rc<Node>,
    object: Option<Value>,
    value: Value,
    options: RefCell<BTreeMap<String, Value>>,
    dom: DomPath,
    context: Rc<FormContext>,
    builder: Rc<dyn FieldBuilder>,
    inferred_type: OnceCell<FieldType>,
    inferred_component: OnceCell<Component>,
}

impl Field {
    pub fn new(init: FieldInit) -> Self {
        let FieldInit {
            key,
            parent,
            object,
            value,
            options,
            context,
            builder,
        } = init;

        let value = match value {
            Some(explicit) => explicit,
            None => resolve_or_null(object.as_ref(), key.as_str()),
        };
        let node = Node::new(key, Some(parent), NodeKind::Field);
        let dom = DomPath::new(
            Rc::clone(&node),
            value.to_display(),
            context.naming.leaf_children,
        );

        Self {
            node,
            object,
            value,
            options: RefCell::new(options),
            dom,
            context,
            builder,
            inferred_type: OnceCell::new(),
            inferred_component: OnceCell::new(),
        }
    }

    pub fn key(&self) -> &Key {
        self.node.key()
    }

    pub fn node(&self) -> &Rc<Node> {
        &self.node
    }

    pub fn parent(&self) -> Option<&Rc<Node>> {
        self.node.parent()
    }

    pub fn object(&self) -> Option<&Value> {
        self.object.as_ref()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn context(&self) -> &Rc<FormContext> {
        &self.context
    }

    pub(crate) fn builder(&self) -> &Rc<dyn FieldBuilder> {
        &self.builder
    }

    pub fn dom(&self) -> &DomPath {
        &self.dom
    }

    pub fn dom_id(&self) -> &str {
        self.dom.id()
    }

    pub fn dom_name(&self) -> &str {
        self.dom.name()
    }

    pub fn dom_value(&self) -> &str {
        self.dom.value()
    }

    // ---- type inference ----

    pub fn inferred_type(&self) -> &FieldType {
        self.inferred_type.get_or_init(|| {
            infer_type(self.object.as_ref(), self.key().as_str(), &self.context.inference)
        })
    }

    pub fn inferred_component(&self) -> &Component {
        self.inferred_component.get_or_init(|| {
            component_for(self.inferred_type(), self.object.as_ref(), self.key().as_str())
        })
    }

    pub fn association(&self) -> Option<Association> {
        self.object
            .as_ref()
            .and_then(Value::as_model)
            .and_then(|model| model.association(self.key().as_str()))
    }

    pub fn attachment(&self) -> Option<Attachment> {
        self.object
            .as_ref()
            .and_then(Value::as_model)
            .and_then(|model| model.attachment(self.key().as_str()))
    }

    pub fn enum_values(&self) -> Option<Vec<String>> {
        self.object
            .as_ref()
            .and_then(Value::as_model)
            .and_then(|model| model.enum_values(self.key().as_str()))
    }

    /// `false` counts as a value since it is what an unchecked box submits.
    /// Attachment fields count only when something is attached.
    pub fn has_value(&self) -> bool {
        if self.attachment().is_some() {
            return self.value.is_present();
        }
        self.value.is_present() || self.value == Value::Bool(false)
    }

    // ---- options ----

    pub fn options(&self) -> BTreeMap<String, Value> {
        self.options.borrow().clone()
    }

    pub fn option(&self, name: &str) -> Option<Value> {
        self.options
            .borrow()
            .get(name)
            .filter(|value| !value.is_null())
            .cloned()
    }

    pub fn set_option(&self, name: impl Into<String>, value: impl Into<Value>) -> &Self {
        self.options.borrow_mut().insert(name.into(), value.into());
        self
    }

    fn text_option(&self, name: &str) -> Option<String> {
        self.option(name).map(|value| value.to_display())
    }

    fn has_option(&self, name: &str) -> bool {
        self.option(name).is_some_and(|value| value.is_present())
    }

    pub fn label(&self) -> Option<String> {
        self.text_option("label")
    }

    pub fn with_label(&self, label: impl Into<Value>) -> &Self {
        self.set_option("label", label)
    }

    pub fn has_label(&self) -> bool {
        self.has_option("label")
    }

    pub fn hint(&self) -> Option<String> {
        self.text_option("hint")
    }

    pub fn with_hint(&self, hint: impl Into<Value>) -> &Self {
        self.set_option("hint", hint)
    }

    pub fn has_hint(&self) -> bool {
        self.has_option("hint")
    }

    pub fn placeholder(&self) -> Option<String> {
        self.text_option("placeholder")
    }

    pub fn with_placeholder(&self, placeholder: impl Into<Value>) -> &Self {
        self.set_option("placeholder", placeholder)
    }

    pub fn has_placeholder(&self) -> bool {
        self.has_option("placeholder")
    }

    pub fn description(&self) -> Option<String> {
        self.text_option("description")
    }

    pub fn with_description(&self, description: impl Into<Value>) -> &Self {
        self.set_option("description", description)
    }

    pub fn has_description(&self) -> bool {
        self.has_option("description")
    }

    /// Explicit `required` option, else whether a presence validator is
    /// declared for this key.
    pub fn is_required(&self) -> bool {
        match self.option("required") {
            Some(value) => value.is_present(),
            None => self
                .object
                .as_ref()
                .and_then(Value::as_model)
                .is_some_and(|model| {
                    model
                        .validators(self.key().as_str())
                        .contains(&ValidatorKind::Presence)
                }),
        }
    }

    // ---- repetition ----

    /// Repeats this field over `collection`, yielding one unmemoized
    /// sub-field factory per element.
    pub fn repeated(&self, collection: impl Into<Value>) -> FieldRepeater<'_> {
        FieldRepeater::new(self, collection.into())
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("key", self.key())
            .field("value", &self.value)
            .field("dom", &self.dom)
            .finish()
    }
}
