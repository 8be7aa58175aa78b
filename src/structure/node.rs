use std::borrow::Borrow;
use std::fmt;
use std::rc::Rc;

/// Canonical, cheaply clonable node key. Numbers and strings normalize to
/// the same textual form, so `0` and `"0"` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Rc<str>);

impl Key {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key(Rc::from(s))
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key(Rc::from(s))
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::from(s.as_str())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::from(i.to_string())
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::from(i.to_string())
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Namespace,
    Collection,
    Field,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Namespace => "namespace",
            NodeKind::Collection => "collection",
            NodeKind::Field => "field",
        };
        f.write_str(name)
    }
}

/// Identity of a tree participant: its key, its parent and what kind of
/// node it is. Immutable once built.
///
/// Nodes point at their parent's identity rather than at the parent
/// namespace itself, so a namespace owning its children never forms a
/// reference cycle.
#[derive(Debug)]
pub struct Node {
    key: Key,
    parent: Option<Rc<Node>>,
    kind: NodeKind,
    dom_id: Option<String>,
}

impl Node {
    pub fn new(key: impl Into<Key>, parent: Option<Rc<Node>>, kind: NodeKind) -> Rc<Self> {
        Self::with_dom_id(key, parent, kind, None)
    }

    pub fn with_dom_id(
        key: impl Into<Key>,
        parent: Option<Rc<Node>>,
        kind: NodeKind,
        dom_id: Option<String>,
    ) -> Rc<Self> {
        Rc::new(Self {
            key: key.into(),
            parent,
            kind,
            dom_id,
        })
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn parent(&self) -> Option<&Rc<Node>> {
        self.parent.as_ref()
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_field(&self) -> bool {
        self.kind == NodeKind::Field
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn dom_id(&self) -> Option<&str> {
        self.dom_id.as_deref()
    }

    /// Fragment this node contributes when it heads a DOM id.
    pub fn id_fragment(&self) -> &str {
        self.dom_id.as_deref().unwrap_or(self.key.as_str())
    }
}

/// Rails-style `underscore`: `UserProfile-1` becomes `user_profile_1`.
pub fn underscore(s: &str) -> String {
    let chars: Vec<char> = s.replace("::", "/").chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else if c == '-' {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    out
}
