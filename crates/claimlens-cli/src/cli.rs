//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Claimlens CLI - audit executive claims against financial statements.
#[derive(Debug, Parser)]
#[command(name = "claimlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import companies, financial data, and extracted claims from JSON
    Import(ImportArgs),

    /// Verify all unverified claims against financial data
    Verify(VerifyArgs),

    /// Detect cross-quarter discrepancy patterns per company
    Analyze(AnalyzeArgs),

    /// Print the full analysis report for one company
    Report(ReportArgs),
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// Path to the JSON import document
    pub file: String,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Use the strict tolerance preset
    #[arg(long, conflicts_with = "lenient")]
    pub strict: bool,

    /// Use the lenient tolerance preset
    #[arg(long)]
    pub lenient: bool,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Restrict analysis to one ticker
    #[arg(short, long)]
    pub ticker: Option<String>,
}

/// Arguments for the report command.
#[derive(Debug, Parser)]
pub struct ReportArgs {
    /// Ticker symbol of the company to report on
    pub ticker: String,
}
