//! Main Entrypoint for the Curriculum Creator
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Initializing logging on stderr, keeping stdout for command output.
//! 3. Dispatching the requested subcommand.

use anyhow::Context;
use clap::Parser;
use curriculum_creator::{
    cli::{Cli, Command},
    commands,
    config::Config,
};
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
    info!(output_dir = %config.output_dir.display(), "Configuration loaded");

    // --- 3. Run Command ---
    let output = match cli.command {
        Command::Research(args) => {
            let outcome = commands::research(&config, args)?;
            println!("{}", outcome);
            if !outcome.is_success() {
                return Ok(ExitCode::FAILURE);
            }
            return Ok(ExitCode::SUCCESS);
        }
        Command::Inputs(args) => commands::inputs(&config, args)?,
        Command::Organize { topic, structure } => commands::organize(&config, &topic, &structure)?,
        Command::Zip { source, name } => commands::zip(&config, &source, &name)?,
        Command::Write {
            path,
            content_file,
            file_type,
        } => commands::write(&path, &content_file, file_type.as_deref())?,
        Command::Serve => {
            commands::serve(&config).await?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    println!("{}", output);
    Ok(ExitCode::SUCCESS)
}
