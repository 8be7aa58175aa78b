use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use crate::structure::context::LeafChildNaming;
use crate::structure::node::Node;

/// DOM id, name and value for a node, derived from its lineage.
///
/// Ids join every lineage key with `_`, headed by the root's id fragment.
/// Names follow Rails: the root key bare, every later key in brackets,
/// e.g. `user[addresses][0][street]`.
pub struct DomPath {
    node: Rc<Node>,
    value: String,
    naming: LeafChildNaming,
    lineage: OnceCell<Vec<Rc<Node>>>,
    id: OnceCell<String>,
    name: OnceCell<String>,
}

impl DomPath {
    pub fn new(node: Rc<Node>, value: String, naming: LeafChildNaming) -> Self {
        Self {
            node,
            value,
            naming,
            lineage: OnceCell::new(),
            id: OnceCell::new(),
            name: OnceCell::new(),
        }
    }

    /// Root first, bound node last.
    pub fn lineage(&self) -> &[Rc<Node>] {
        self.lineage.get_or_init(|| {
            let mut chain = Vec::new();
            let mut current = Some(Rc::clone(&self.node));
            while let Some(node) = current {
                current = node.parent().cloned();
                chain.push(node);
            }
            chain.reverse();
            chain
        })
    }

    pub fn id(&self) -> &str {
        self.id.get_or_init(|| {
            let lineage = self.lineage();
            let mut parts = Vec::with_capacity(lineage.len());
            if let Some((root, rest)) = lineage.split_first() {
                parts.push(root.id_fragment());
                parts.extend(rest.iter().map(|node| node.key().as_str()));
            }
            parts.join("_")
        })
    }

    pub fn name(&self) -> &str {
        self.name.get_or_init(|| {
            let mut name = String::new();
            let mut first = true;

            for node in self.lineage() {
                // Children of a leaf field have no nameable key of their own.
                if node.parent().is_some_and(|parent| parent.is_field()) {
                    if self.naming == LeafChildNaming::EmptyBrackets {
                        name.push_str("[]");
                    }
                    continue;
                }

                if first {
                    name.push_str(node.key().as_str());
                    first = false;
                } else {
                    name.push('[');
                    name.push_str(node.key().as_str());
                    name.push(']');
                }
            }

            name
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for DomPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<DomPath id={:?} name={:?} value={:?}/>",
            self.id(),
            self.name(),
            self.value()
        )
    }
}
