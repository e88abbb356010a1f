//! Analyze command implementation.

use claimlens_analyzer::DiscrepancyAnalyzer;
use claimlens_domain::traits::PatternStore;
use claimlens_store::{Company, SqliteStore};
use tracing::{error, info};

use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the analyze command.
///
/// Each company's pattern set is replaced atomically; a company whose
/// analysis fails keeps its previous set and the run continues with the
/// remaining companies.
pub fn execute_analyze(
    args: AnalyzeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let mut store = SqliteStore::new(&config.database_path)?;
    let analyzer = DiscrepancyAnalyzer::new();

    let companies = match &args.ticker {
        Some(ticker) => {
            let company = store
                .get_company(ticker)?
                .ok_or_else(|| CliError::NotFound(format!("company {}", ticker)))?;
            vec![company]
        }
        None => store.companies()?,
    };

    let mut failed = 0usize;
    for company in &companies {
        match analyze_one(&mut store, &analyzer, company) {
            Ok(pattern_count) => {
                info!(ticker = %company.ticker, patterns = pattern_count, "analyzed");
                println!(
                    "{}: {} pattern(s) detected",
                    company.ticker, pattern_count
                );
            }
            Err(e) => {
                failed += 1;
                error!(ticker = %company.ticker, error = %e, "analysis failed");
                eprintln!(
                    "{}",
                    formatter.warning(&format!(
                        "{}: analysis failed, previous patterns kept",
                        company.ticker
                    ))
                );
            }
        }
    }

    if failed > 0 {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "{}/{} companies failed analysis",
                failed,
                companies.len()
            ))
        );
    }
    Ok(())
}

fn analyze_one(
    store: &mut SqliteStore,
    analyzer: &DiscrepancyAnalyzer,
    company: &Company,
) -> Result<usize> {
    let claims_by_quarter = store.claims_by_quarter(company.id)?;
    let patterns = analyzer.analyze_company(company.id, &claims_by_quarter);
    store.replace_patterns(company.id, &patterns)?;
    Ok(patterns.len())
}
