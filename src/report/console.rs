use crate::report::report_model::{FormReport, Render};
use crate::structure::namespace::Namespace;

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleRenderer;

impl Render for ConsoleRenderer {
    fn render(&self, root: &Namespace) -> String {
        format_console_report(&FormReport::from_root(root))
    }
}

/// Format a form report for terminal output.
///
/// Produces output like:
/// ```text
/// === Form: user (user_42) ===
///
/// ✓ user_42_name  user[name]  string/string  "Alice"
/// ✗ user_42_bio   user[bio]   text/text      ""
///
/// === 2 fields, 1 with values ===
/// ```
pub fn format_console_report(report: &FormReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Form: {} ({}) ===\n\n",
        report.root, report.dom_id
    ));

    let id_width = report.fields.iter().map(|f| f.dom_id.len()).max().unwrap_or(0);
    let name_width = report.fields.iter().map(|f| f.dom_name.len()).max().unwrap_or(0);

    for row in &report.fields {
        let marker = if row.has_value { "\u{2713}" } else { "\u{2717}" };
        let kind = format!("{}/{}", row.field_type, row.component);

        out.push_str(&format!(
            "{} {:id_width$}  {:name_width$}  {:<20}  {:?}",
            marker, row.dom_id, row.dom_name, kind, row.value,
        ));

        if row.required {
            out.push_str("  [required]");
        }
        if let Some(ref label) = row.label {
            out.push_str(&format!("  label={:?}", label));
        }
        out.push('\n');
    }

    let with_values = report.fields.iter().filter(|f| f.has_value).count();
    out.push_str(&format!(
        "\n=== {} fields, {} with values ===\n",
        report.fields.len(),
        with_values
    ));

    out
}
