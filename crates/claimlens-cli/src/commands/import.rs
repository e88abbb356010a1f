//! Import command implementation.

use std::fs;

use claimlens_store::{SqliteStore, StoreError};
use tracing::{info, warn};

use crate::cli::ImportArgs;
use crate::config::Config;
use crate::error::Result;
use crate::import::ImportDocument;
use crate::output::Formatter;

/// Execute the import command.
pub fn execute_import(
    args: ImportArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let contents = fs::read_to_string(&args.file)?;
    let document: ImportDocument = serde_json::from_str(&contents)?;

    let mut store = SqliteStore::new(&config.database_path)?;

    let mut companies = 0usize;
    let mut records = 0usize;
    let mut claims = 0usize;

    for company_import in document.companies {
        let company = store.upsert_company(
            &company_import.ticker,
            &company_import.name,
            company_import.sector.as_deref(),
        )?;
        companies += 1;

        for financial in company_import.financials {
            let record = financial.into_record(company.id);
            match store.insert_financial_record(&record) {
                Ok(()) => records += 1,
                Err(StoreError::Duplicate(what)) => {
                    // Snapshots are immutable once ingested
                    warn!(%what, "skipping already-ingested snapshot");
                }
                Err(e) => return Err(e.into()),
            }
        }

        for transcript in company_import.transcripts {
            let period = claimlens_domain::FiscalPeriod::new(
                transcript.year,
                transcript.quarter,
            );
            let transcript_id = store.upsert_transcript(
                company.id,
                period,
                transcript.call_date.as_deref(),
                &transcript.full_text,
            )?;

            for claim_import in transcript.claims {
                let claim = claim_import.into_claim(transcript_id);
                store.insert_claim(&claim)?;
                claims += 1;
            }
        }

        info!(ticker = %company.ticker, "imported company");
    }

    println!(
        "{}",
        formatter.success(&format!(
            "Imported {} companies, {} financial snapshots, {} claims",
            companies, records, claims
        ))
    );
    Ok(())
}
