use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::structure::node::{Key, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    /// A child was built and stored in its namespace.
    NodeBuilt,
    /// A memoized child was returned instead of building a new one.
    NodeReused,
    /// An unmemoized template field was built.
    TemplateBuilt,
    /// A namespace collection materialized its items.
    CollectionBuilt,
}

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub event: TraceKind,

    pub key: String,
    pub node: String,

    pub path: Option<String>,
    pub detail: Option<String>,
}

impl TraceEvent {
    pub fn now(event: TraceKind, key: &Key, node: NodeKind) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            event,
            key: key.to_string(),
            node: node.to_string(),
            path: None,
            detail: None,
        }
    }

    pub fn with_path(mut self, path: impl ToString) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
