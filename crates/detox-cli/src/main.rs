mod cli;
mod commands;
mod settings;

use anyhow::Result;
use clap::Parser;
use detox_config::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: cli::Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        cli::Commands::Variant(args) => commands::variant::handle(args, &config),
        cli::Commands::Preview(args) => commands::preview::handle(args, &config),
        cli::Commands::Completions { shell } => commands::completions::handle(shell),
    }
}

/// 2 for configuration errors, 3 for alignment errors, 1 otherwise
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<detox_core::Error>() {
        Some(core) if core.is_configuration() => 2,
        Some(core) if core.is_alignment() => 3,
        _ => 1,
    }
}
