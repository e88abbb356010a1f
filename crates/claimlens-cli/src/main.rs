//! Claimlens CLI - audit executive claims against financial statements.

use std::path::Path;

use clap::Parser;
use claimlens_cli::{commands, Cli, CliFormat, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref().map(Path::new))?;
    let format = cli.format.unwrap_or(CliFormat::Table);
    let formatter = Formatter::new(format, !cli.no_color);

    match cli.command {
        Command::Import(args) => commands::execute_import(args, &config, &formatter)?,
        Command::Verify(args) => commands::execute_verify(args, &config, &formatter)?,
        Command::Analyze(args) => commands::execute_analyze(args, &config, &formatter)?,
        Command::Report(args) => commands::execute_report(args, &config, &formatter)?,
    }

    Ok(())
}
