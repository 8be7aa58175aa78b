use crate::report::report_model::{FormReport, Render};
use crate::structure::namespace::Namespace;

/// Pretty-printed JSON of the [`FormReport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Render for JsonRenderer {
    fn render(&self, root: &Namespace) -> String {
        match serde_json::to_string_pretty(&FormReport::from_root(root)) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Warning: failed to serialize form report: {}", e);
                String::new()
            }
        }
    }
}
