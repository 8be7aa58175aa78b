use clap::Parser;
use form_tree::cli::commands::{build_renderer, cmd_inspect};
use form_tree::cli::config::{AppConfig, Cli, Commands, build_context, load_config, parse_config};
use form_tree::structure::context::LeafChildNaming;

mod common;

use common::fixtures::temp_file;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_inspect_minimal() {
    let cli = Cli::parse_from(["form-tree", "inspect", "--document", "form.yaml"]);
    match cli.command {
        Commands::Inspect {
            document,
            format,
            output,
        } => {
            assert_eq!(document, "form.yaml");
            assert_eq!(format, "console");
            assert!(output.is_none());
        }
    }
    assert_eq!(cli.verbose, 0);
    assert!(cli.config.is_none());
    assert!(cli.trace.is_none());
}

#[test]
fn cli_parse_inspect_all_args() {
    let cli = Cli::parse_from([
        "form-tree",
        "-vv",
        "inspect",
        "--document",
        "form.yaml",
        "--format",
        "html",
        "-o",
        "out.html",
        "--config",
        "custom.yaml",
        "--trace",
        "trace.jsonl",
    ]);
    match cli.command {
        Commands::Inspect {
            document,
            format,
            output,
        } => {
            assert_eq!(document, "form.yaml");
            assert_eq!(format, "html");
            assert_eq!(output.as_deref(), Some("out.html"));
        }
    }
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
    assert_eq!(cli.trace.as_deref(), Some("trace.jsonl"));
}

#[test]
fn cli_requires_a_document() {
    let result = Cli::try_parse_from(["form-tree", "inspect"]);
    assert!(result.is_err());
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn load_config_missing_file_returns_defaults() {
    let config = load_config(Some("nonexistent_file_that_does_not_exist.yaml"));
    // Should return defaults without error
    assert!(config.inference.attachments_before_associations);
    assert_eq!(config.naming.leaf_children, LeafChildNaming::Omit);
    assert!(config.trace.file.is_none());
}

#[test]
fn parse_config_full() {
    let config = parse_config(
        r#"
inference:
  attachments_before_associations: false
naming:
  leaf_children: empty_brackets
theme:
  string: "input"
  email:
    inherit: string
trace:
  file: trace.jsonl
"#,
    );

    assert!(!config.inference.attachments_before_associations);
    assert_eq!(config.naming.leaf_children, LeafChildNaming::EmptyBrackets);
    assert_eq!(config.theme.resolve("email"), Some("input"));
    assert_eq!(config.trace.file.as_deref(), Some("trace.jsonl"));
}

#[test]
fn parse_config_partial_fills_defaults() {
    let config = parse_config("naming:\n  leaf_children: empty_brackets\n");
    assert!(config.inference.attachments_before_associations);
    assert_eq!(config.naming.leaf_children, LeafChildNaming::EmptyBrackets);
}

#[test]
fn parse_config_malformed_returns_defaults() {
    let config = parse_config("naming: 42");
    assert_eq!(config.naming.leaf_children, LeafChildNaming::Omit);
}

#[test]
fn build_context_carries_config() {
    let config = parse_config("naming:\n  leaf_children: empty_brackets\n");
    let context = build_context(&config, None);

    assert_eq!(context.naming.leaf_children, LeafChildNaming::EmptyBrackets);
    assert!(context.tracer.is_none());
}

#[test]
fn build_context_cli_trace_wins() {
    let path = temp_file("cli_context_trace.jsonl");
    let context = build_context(&AppConfig::default(), path.to_str());
    assert!(context.tracer.as_ref().is_some_and(|t| t.is_enabled()));
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn unknown_format_is_rejected() {
    let err = build_renderer("xml").err().unwrap();
    assert!(err.to_string().contains("Unknown format 'xml'"));
    assert!(build_renderer("json").is_ok());
}

#[test]
fn cmd_inspect_writes_output_file() {
    let document = temp_file("cli_inspect_form.yaml");
    std::fs::write(
        &document,
        "key: user\nobject:\n  name: Alice\n  email: alice@example.com\nfields: [name, email]\n",
    )
    .unwrap();
    let output = temp_file("cli_inspect_form.html");

    cmd_inspect(
        document.to_str().unwrap(),
        "html",
        output.to_str(),
        &AppConfig::default(),
        None,
        0,
    )
    .unwrap();

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<form id=\"user\">"));
    assert!(html.contains("name=\"user[name]\""));
    assert!(html.contains("type=\"email\""));
}

#[test]
fn cmd_inspect_reports_missing_document() {
    let result = cmd_inspect(
        "no_such_form_document.yaml",
        "console",
        None,
        &AppConfig::default(),
        None,
        0,
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("no_such_form_document.yaml"));
}
