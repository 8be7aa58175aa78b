use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::structure::error::StructureError;
use crate::structure::namespace::Namespace;
use crate::structure::node::{Key, Node, NodeKind};
use crate::trace::trace::{TraceEvent, TraceKind};
use crate::value::value_model::Value;

/// Source of a [`NamespaceCollection`]: positional or keyed. Keyed
/// collections yield their items in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    List(Vec<Value>),
    Keyed(IndexMap<String, Value>),
}

impl Collection {
    /// Array coercion: null is empty, maps stay keyed, any other single
    /// value becomes a one-element list.
    pub fn coerce(value: Value) -> Self {
        match value {
            Value::Null => Collection::List(Vec::new()),
            Value::List(items) => Collection::List(items),
            Value::Map(map) => Collection::Keyed(map),
            other => Collection::List(vec![other]),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::List(items) => items.len(),
            Collection::Keyed(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(key, element)` pairs; keys of lists are stringified indexes.
    pub fn entries(&self) -> Vec<(Key, Value)> {
        match self {
            Collection::List(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| (Key::from(index), item.clone()))
                .collect(),
            Collection::Keyed(map) => map
                .iter()
                .map(|(key, item)| (Key::from(key), item.clone()))
                .collect(),
        }
    }
}

impl From<Vec<Value>> for Collection {
    fn from(items: Vec<Value>) -> Self {
        Collection::List(items)
    }
}

impl From<IndexMap<String, Value>> for Collection {
    fn from(map: IndexMap<String, Value>) -> Self {
        Collection::Keyed(map)
    }
}

impl From<Value> for Collection {
    fn from(value: Value) -> Self {
        Collection::coerce(value)
    }
}

pub type ItemCallback<'a> = Box<dyn FnMut(&Rc<Namespace>) + 'a>;

/// Options for [`Namespace::nest_many`].
#[derive(Default)]
pub struct NestMany<'a> {
    pub(crate) as_key: Option<Key>,
    pub(crate) collection: Option<Collection>,
    pub(crate) default: Option<Collection>,
    pub(crate) on_item: Option<ItemCallback<'a>>,
}

impl<'a> NestMany<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `NestMany::new().each(callback)`.
    pub fn each_item(callback: impl FnMut(&Rc<Namespace>) + 'a) -> Self {
        Self::new().each(callback)
    }

    pub fn as_key(mut self, key: impl Into<Key>) -> Self {
        self.as_key = Some(key.into());
        self
    }

    pub fn collection(mut self, collection: impl Into<Collection>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Used when the source resolves to an empty collection.
    pub fn default_to(mut self, default: impl Into<Collection>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Called once per built item namespace, in element order.
    pub fn each(mut self, callback: impl FnMut(&Rc<Namespace>) + 'a) -> Self {
        self.on_item = Some(Box::new(callback));
        self
    }
}

// ============================================================================
// NamespaceCollection
// ============================================================================

/// One namespace per element of a collection, keyed `0, 1, ...` for lists
/// or by the element key for keyed collections. All items are built up
/// front, since DOM names need every row present.
pub struct NamespaceCollection {
    node: Rc<Node>,
    collection: Collection,
    namespaces: Vec<Rc<Namespace>>,
}

impl NamespaceCollection {
    /// Builds every item namespace under `parent`'s configuration, then
    /// hands each to `on_item`. Fails before building anything when no
    /// callback is given.
    pub fn new(
        key: impl Into<Key>,
        parent: &Namespace,
        collection: Collection,
        on_item: Option<ItemCallback<'_>>,
    ) -> Result<Self, StructureError> {
        let key = key.into();
        let Some(mut on_item) = on_item else {
            return Err(StructureError::MissingItemCallback {
                key: key.to_string(),
            });
        };

        let node = Node::new(key, Some(Rc::clone(parent.node())), NodeKind::Collection);
        let namespaces: Vec<Rc<Namespace>> = collection
            .entries()
            .into_iter()
            .map(|(item_key, object)| {
                Rc::new(parent.child_namespace(item_key, Rc::clone(&node), object))
            })
            .collect();

        parent.context().trace(|| {
            TraceEvent::now(TraceKind::CollectionBuilt, node.key(), NodeKind::Collection)
                .with_detail(format!("{} items", namespaces.len()))
        });

        for namespace in &namespaces {
            on_item(namespace);
        }

        Ok(Self {
            node,
            collection,
            namespaces,
        })
    }

    pub fn key(&self) -> &Key {
        self.node.key()
    }

    pub fn node(&self) -> &Rc<Node> {
        &self.node
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn namespaces(&self) -> &[Rc<Namespace>] {
        &self.namespaces
    }

    pub fn get(&self, key: &str) -> Option<&Rc<Namespace>> {
        self.namespaces.iter().find(|ns| ns.key().as_str() == key)
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Namespace>> {
        self.namespaces.iter()
    }
}

impl fmt::Debug for NamespaceCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceCollection")
            .field("key", self.key())
            .field("items", &self.namespaces.len())
            .finish()
    }
}
