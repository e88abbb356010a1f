//! Report command implementation.

use claimlens_analyzer::build_company_analysis;
use claimlens_domain::traits::PatternStore;
use claimlens_store::SqliteStore;

use crate::cli::ReportArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the report command.
pub fn execute_report(
    args: ReportArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let store = SqliteStore::new(&config.database_path)?;

    let company = store
        .get_company(&args.ticker)?
        .ok_or_else(|| CliError::NotFound(format!("company {}", args.ticker)))?;

    let claims_by_quarter = store.claims_by_quarter(company.id)?;
    let patterns = store.get_patterns(company.id)?;

    let analysis = build_company_analysis(
        company.id,
        company.ticker,
        company.name,
        &claims_by_quarter,
        patterns,
    );

    println!("{}", formatter.format_analysis(&analysis)?);
    Ok(())
}
