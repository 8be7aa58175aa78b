use serde::{Deserialize, Serialize};

use crate::infer::engine::InferencePolicy;
use crate::theme::theme::Theme;
use crate::trace::{logger::TraceLogger, trace::TraceEvent};

/// How nodes nested directly under a leaf field appear in DOM names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafChildNaming {
    /// Contribute nothing: `post[tags]`.
    #[default]
    Omit,
    /// Contribute an empty pair of brackets: `post[tags][]`.
    EmptyBrackets,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingPolicy {
    #[serde(default)]
    pub leaf_children: LeafChildNaming,
}

/// Configuration shared by every node of one tree. Built once and handed
/// to the root namespace; children inherit it.
#[derive(Debug, Default)]
pub struct FormContext {
    pub inference: InferencePolicy,
    pub naming: NamingPolicy,
    pub theme: Theme,
    pub tracer: Option<TraceLogger>,
}

impl FormContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inference(mut self, inference: InferencePolicy) -> Self {
        self.inference = inference;
        self
    }

    pub fn with_naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Logs the event built by `event` if a tracer is attached.
    pub fn trace(&self, event: impl FnOnce() -> TraceEvent) {
        if let Some(tracer) = &self.tracer {
            tracer.record(event);
        }
    }
}
