use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::infer::engine::InferencePolicy;
use crate::structure::context::{FormContext, NamingPolicy};
use crate::theme::theme::Theme;
use crate::trace::logger::TraceLogger;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-tree",
    version,
    about = "Inspect the form field tree built from a document"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-tree.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append tree construction events to this JSONL file
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the tree for a form document and print its fields
    Inspect {
        /// Path to a YAML or JSON form document
        #[arg(long)]
        document: String,

        /// Output format: console, html, json
        #[arg(long, default_value = "console")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-tree.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub inference: InferencePolicy,
    #[serde(default)]
    pub naming: NamingPolicy,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub file: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("form-tree.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content),
        Err(_) => AppConfig::default(),
    }
}

pub fn parse_config(content: &str) -> AppConfig {
    match serde_yaml::from_str(content) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: ignoring malformed config: {}", e);
            AppConfig::default()
        }
    }
}

// ============================================================================
// Context Builder (merge CLI args with config file)
// ============================================================================

/// Build the tree context from resolved CLI/config values. A trace path on
/// the command line wins over the config file.
pub fn build_context(config: &AppConfig, trace_path: Option<&str>) -> FormContext {
    let context = FormContext::new()
        .with_inference(config.inference.clone())
        .with_naming(config.naming.clone())
        .with_theme(config.theme.clone());

    match trace_path.or(config.trace.file.as_deref()) {
        Some(path) => context.with_tracer(TraceLogger::new(path)),
        None => context,
    }
}
