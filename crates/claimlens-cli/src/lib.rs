//! Claimlens CLI library
//!
//! Batch pipeline around the verification and analysis engines:
//! `import` loads companies, financial data, and extracted claims;
//! `verify` checks every unverified claim; `analyze` refreshes each
//! company's discrepancy-pattern set; `report` prints a company's
//! analysis.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod import;
pub mod output;

pub use cli::{Cli, CliFormat, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
