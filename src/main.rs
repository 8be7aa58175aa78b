use clap::Parser;
use form_tree::cli::commands::cmd_inspect;
use form_tree::cli::config::{Cli, Commands, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Inspect {
            document,
            format,
            output,
        } => {
            cmd_inspect(
                &document,
                &format,
                output.as_deref(),
                &config,
                cli.trace.as_deref(),
                cli.verbose,
            )?;
        }
    }

    Ok(())
}
