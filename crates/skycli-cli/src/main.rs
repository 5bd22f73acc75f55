//! skycli binary entrypoint.
//!
//! This is the main entry point for the `skycli` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use skycli_cli::cli::{Cli, Commands};
use skycli_cli::commands::{AppCommand, AuthCommand, ConfigCommand};
use skycli_cli::context::CliContext;
use skycli_cli::output::OutputFormat;
use skycli_cli::CliError;
use skycli_config::{default_config_path, ConfigStore, ProjectConfig};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over --debug/--verbose
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let format = OutputFormat::new(cli.format);
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    debug!(path = %config_path.display(), "using config file");

    let mut store = ConfigStore::open(config_path)?;
    let cwd = std::env::current_dir()?;
    let project = ProjectConfig::discover(&cwd)?.map(|(_, project)| project);
    let context = CliContext::resolve(store.config(), project.as_ref(), &cli.overrides());

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Commands::Config { command } => {
            let mut cmd = ConfigCommand::new(&mut store, &context);
            cmd.execute(&mut stdout, &format, command)?;
        }
        Commands::Auth { command } => {
            let mut cmd = AuthCommand::new(&mut store, &context);
            cmd.execute(&mut stdout, &format, command)?;
        }
        Commands::App { command } => {
            let cmd = AppCommand::new(&context);
            cmd.execute(&mut stdout, &format, command)?;
        }
    }

    Ok(())
}
