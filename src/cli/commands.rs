use std::rc::Rc;

use crate::cli::config::{AppConfig, build_context};
use crate::document::loader::{build_form, load_document};
use crate::report::console::ConsoleRenderer;
use crate::report::html::HtmlRenderer;
use crate::report::json::JsonRenderer;
use crate::report::report_model::Render;

// ============================================================================
// inspect subcommand
// ============================================================================

/// Build the tree for `document_path` and write it out in `format`.
pub fn cmd_inspect(
    document_path: &str,
    format: &str,
    output: Option<&str>,
    config: &AppConfig,
    trace_path: Option<&str>,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let renderer = build_renderer(format)?;

    if verbose > 0 {
        eprintln!("Loading document {}...", document_path);
    }
    let document = load_document(document_path)?;

    let context = Rc::new(build_context(config, trace_path));
    let root = build_form(&document, context)?;

    if verbose > 1 {
        eprintln!("Built tree '{}' with {} top-level children", root.key(), root.len());
    }

    let rendered = renderer.render(&root);
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            if verbose > 0 {
                eprintln!("Wrote {} output to {}", format, path);
            }
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

pub fn build_renderer(format: &str) -> Result<Box<dyn Render>, Box<dyn std::error::Error>> {
    match format {
        "console" => Ok(Box::new(ConsoleRenderer)),
        "html" => Ok(Box::new(HtmlRenderer)),
        "json" => Ok(Box::new(JsonRenderer)),
        other => Err(format!("Unknown format '{}'. Use: console, html, json", other).into()),
    }
}
