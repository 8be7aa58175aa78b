use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::model::model::Identity;
use crate::structure::builder::{FieldBuilder, FieldInit, default_builder};
use crate::structure::context::FormContext;
use crate::structure::dom::DomPath;
use crate::structure::error::StructureError;
use crate::structure::field::{Field, FieldOptions};
use crate::structure::namespace_collection::{Collection, NamespaceCollection, NestMany};
use crate::structure::node::{Key, Node, NodeKind, underscore};
use crate::trace::trace::{TraceEvent, TraceKind};
use crate::value::resolve::resolve;
use crate::value::value_model::Value;

/// A child stored in a namespace.
#[derive(Clone, Debug)]
pub enum Child {
    Field(Rc<Field>),
    Namespace(Rc<Namespace>),
    Collection(Rc<NamespaceCollection>),
}

impl Child {
    pub fn key(&self) -> &Key {
        match self {
            Child::Field(field) => field.key(),
            Child::Namespace(namespace) => namespace.key(),
            Child::Collection(collection) => collection.key(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Child::Field(_) => NodeKind::Field,
            Child::Namespace(_) => NodeKind::Namespace,
            Child::Collection(_) => NodeKind::Collection,
        }
    }

    pub fn as_field(&self) -> Option<&Rc<Field>> {
        match self {
            Child::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_namespace(&self) -> Option<&Rc<Namespace>> {
        match self {
            Child::Namespace(namespace) => Some(namespace),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Rc<NamespaceCollection>> {
        match self {
            Child::Collection(collection) => Some(collection),
            _ => None,
        }
    }
}

/// Options for building a root namespace.
#[derive(Default)]
pub struct RootOptions {
    pub builder: Option<Rc<dyn FieldBuilder>>,
    pub context: Option<Rc<FormContext>>,
    /// Replaces the computed DOM id fragment of the root.
    pub dom_id: Option<String>,
}

/// Options for [`Namespace::nest_one_with`].
#[derive(Default)]
pub struct NestOne {
    pub(crate) as_key: Option<Key>,
    pub(crate) object: Option<Value>,
    pub(crate) default: Option<Value>,
}

impl NestOne {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store and name the child under `key` instead of the data key.
    pub fn as_key(mut self, key: impl Into<Key>) -> Self {
        self.as_key = Some(key.into());
        self
    }

    pub fn object(mut self, object: impl Into<Value>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Used when neither an explicit object nor a source value exists.
    pub fn default_to(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

// ============================================================================
// Namespace
// ============================================================================

/// Maps one source object to named child fields and nested namespaces.
///
/// Children are created lazily and memoized by key: asking twice for the
/// same key returns the same instance, so a label and an input rendered
/// from the same field always agree on id, name and value.
pub struct Namespace {
    node: Rc<Node>,
    object: Option<Value>,
    builder: Rc<dyn FieldBuilder>,
    context: Rc<FormContext>,
    children: RefCell<Vec<Child>>,
    index: RefCell<HashMap<Key, usize>>,
}

impl Namespace {
    /// Root namespace with the default field builder and context.
    pub fn root(key: impl Into<Key>, object: impl Into<Value>) -> Rc<Self> {
        Self::root_with(key, object, RootOptions::default())
    }

    pub fn root_with(key: impl Into<Key>, object: impl Into<Value>, options: RootOptions) -> Rc<Self> {
        let RootOptions {
            builder,
            context,
            dom_id,
        } = options;

        Rc::new(Self::new(
            key.into(),
            None,
            object.into(),
            builder.unwrap_or_else(default_builder),
            context.unwrap_or_default(),
            dom_id,
        ))
    }

    pub(crate) fn new(
        key: Key,
        parent: Option<Rc<Node>>,
        object: Value,
        builder: Rc<dyn FieldBuilder>,
        context: Rc<FormContext>,
        dom_id: Option<String>,
    ) -> Self {
        let object = (!object.is_null()).then_some(object);
        let dom_id = dom_id.unwrap_or_else(|| compute_dom_id(&key, object.as_ref()));
        let node = Node::with_dom_id(key, parent, NodeKind::Namespace, Some(dom_id));

        Self {
            node,
            object,
            builder,
            context,
            children: RefCell::new(Vec::new()),
            index: RefCell::new(HashMap::new()),
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

    pub fn builder(&self) -> &Rc<dyn FieldBuilder> {
        &self.builder
    }

    pub fn context(&self) -> &Rc<FormContext> {
        &self.context
    }

    /// Key joined with the object's identifier (`user_42`), `new` for
    /// objects that have not been assigned one, or the bare key.
    pub fn dom_id(&self) -> &str {
        self.node.id_fragment()
    }

    /// DOM path of the namespace itself, e.g. for fieldset ids.
    pub fn dom(&self) -> DomPath {
        DomPath::new(
            Rc::clone(&self.node),
            String::new(),
            self.context.naming.leaf_children,
        )
    }

    // ---- children ----

    pub fn get(&self, key: &str) -> Option<Child> {
        let index = *self.index.borrow().get(key)?;
        self.children.borrow().get(index).cloned()
    }

    pub fn children(&self) -> Vec<Child> {
        self.children.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.borrow().is_empty()
    }

    /// Visits children in insertion order.
    pub fn each(&self, mut visit: impl FnMut(&Child)) {
        for child in self.children() {
            visit(&child);
        }
    }

    fn insert(&self, child: Child) {
        let mut children = self.children.borrow_mut();
        self.index
            .borrow_mut()
            .insert(child.key().clone(), children.len());
        children.push(child);
    }

    /// Memoized child at `key`, or a conflict if it is of another kind.
    fn existing(&self, key: &Key, requested: NodeKind) -> Result<Option<Child>, StructureError> {
        match self.get(key.as_str()) {
            Some(child) if child.kind() == requested => {
                self.context
                    .trace(|| TraceEvent::now(TraceKind::NodeReused, key, requested));
                Ok(Some(child))
            }
            Some(child) => Err(StructureError::KindConflict {
                key: key.to_string(),
                existing: child.kind(),
                requested,
            }),
            None => Ok(None),
        }
    }

    fn trace_built(&self, kind: TraceKind, key: &Key, node: NodeKind, path: &str) {
        self.context
            .trace(|| TraceEvent::now(kind, key, node).with_path(path));
    }

    // ---- fields ----

    pub fn field(&self, key: impl Into<Key>) -> Result<Rc<Field>, StructureError> {
        self.field_with(key, FieldOptions::default())
    }

    /// Memoized field at `key`. Options only apply on first construction,
    /// unless `template` is set, which always builds an unstored field.
    pub fn field_with(
        &self,
        key: impl Into<Key>,
        options: FieldOptions,
    ) -> Result<Rc<Field>, StructureError> {
        let key = key.into();

        if options.template {
            let field = Rc::new(self.build_field(key, options));
            self.trace_built(
                TraceKind::TemplateBuilt,
                field.key(),
                NodeKind::Field,
                field.dom_name(),
            );
            return Ok(field);
        }

        if let Some(Child::Field(field)) = self.existing(&key, NodeKind::Field)? {
            return Ok(field);
        }

        let field = Rc::new(self.build_field(key, options));
        self.trace_built(
            TraceKind::NodeBuilt,
            field.key(),
            NodeKind::Field,
            field.dom_name(),
        );
        self.insert(Child::Field(Rc::clone(&field)));
        Ok(field)
    }

    fn build_field(&self, key: Key, options: FieldOptions) -> Field {
        let FieldOptions {
            value,
            builder,
            attributes,
            ..
        } = options;
        let builder = builder.unwrap_or_else(|| Rc::clone(&self.builder));

        builder.build(FieldInit {
            key,
            parent: Rc::clone(&self.node),
            object: self.object.clone(),
            value,
            options: attributes,
            context: Rc::clone(&self.context),
            builder: Rc::clone(&builder),
        })
    }

    // ---- nesting ----

    pub fn nest_one(&self, key: impl Into<Key>) -> Result<Rc<Namespace>, StructureError> {
        self.nest_one_with(key, NestOne::default())
    }

    /// Nested namespace for a single related object, e.g. a profile.
    pub fn nest_one_with(
        &self,
        key: impl Into<Key>,
        options: NestOne,
    ) -> Result<Rc<Namespace>, StructureError> {
        let key = key.into();
        let tree_key = options.as_key.unwrap_or_else(|| key.clone());

        if let Some(Child::Namespace(namespace)) =
            self.existing(&tree_key, NodeKind::Namespace)?
        {
            return Ok(namespace);
        }

        let object = options
            .object
            .filter(|object| !object.is_null())
            .or_else(|| {
                resolve(self.object.as_ref(), key.as_str()).filter(|value| !value.is_null())
            })
            .or(options.default)
            .unwrap_or_default();

        let namespace = Rc::new(self.child_namespace(tree_key, Rc::clone(&self.node), object));
        self.trace_built(
            TraceKind::NodeBuilt,
            namespace.key(),
            NodeKind::Namespace,
            namespace.dom().name(),
        );
        self.insert(Child::Namespace(Rc::clone(&namespace)));
        Ok(namespace)
    }

    /// Fans a collection out into one namespace per element. The item
    /// callback in `options` is mandatory.
    pub fn nest_many(
        &self,
        key: impl Into<Key>,
        options: NestMany<'_>,
    ) -> Result<Rc<NamespaceCollection>, StructureError> {
        let key = key.into();
        let NestMany {
            as_key,
            collection,
            default,
            on_item,
        } = options;
        let tree_key = as_key.unwrap_or_else(|| key.clone());

        if let Some(Child::Collection(collection)) =
            self.existing(&tree_key, NodeKind::Collection)?
        {
            return Ok(collection);
        }

        let collection = collection.unwrap_or_else(|| {
            let resolved = Collection::coerce(
                resolve(self.object.as_ref(), key.as_str()).unwrap_or_default(),
            );
            match default {
                Some(default) if resolved.is_empty() => default,
                _ => resolved,
            }
        });

        let collection = Rc::new(NamespaceCollection::new(tree_key, self, collection, on_item)?);
        self.insert(Child::Collection(Rc::clone(&collection)));
        Ok(collection)
    }

    /// Namespace of the same configuration as `self`, placed under `parent`.
    pub(crate) fn child_namespace(&self, key: Key, parent: Rc<Node>, object: Value) -> Namespace {
        Namespace::new(
            key,
            Some(parent),
            object,
            Rc::clone(&self.builder),
            Rc::clone(&self.context),
            None,
        )
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("key", self.key())
            .field("dom_id", &self.dom_id())
            .field("object", &self.object)
            .field("children", &self.children.borrow().len())
            .finish()
    }
}

fn compute_dom_id(key: &Key, object: Option<&Value>) -> String {
    let suffix = match object.and_then(Value::as_model).map(|model| model.identity()) {
        Some(Identity::Persisted(id)) => Some(id),
        Some(Identity::New) => Some("new".to_string()),
        Some(Identity::Unsupported) | None => None,
    };

    match suffix {
        Some(suffix) => underscore(&format!("{}_{}", key, suffix)),
        None => underscore(key.as_str()),
    }
}
