//! Verify command implementation.

use claimlens_domain::VerdictCounts;
use claimlens_store::SqliteStore;
use claimlens_verifier::{MetricMapper, VerificationEngine, VerifierConfig};
use tracing::{error, info};

use crate::cli::VerifyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the verify command.
///
/// Verifies every claim without a result. One claim's failure never
/// aborts the batch: the engine resolves failures to UNVERIFIABLE, and a
/// persistence error for one result is counted and skipped.
pub fn execute_verify(
    args: VerifyArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let verifier_config = if args.strict {
        VerifierConfig::strict()
    } else if args.lenient {
        VerifierConfig::lenient()
    } else {
        config.verifier_config()
    };
    let engine = VerificationEngine::new(MetricMapper::new(), verifier_config);

    let mut store = SqliteStore::new(&config.database_path)?;
    let pending = store.unverified_claims()?;
    info!(pending = pending.len(), "starting verification run");

    let mut counts = VerdictCounts::new();
    let mut errors = 0usize;

    for item in &pending {
        let result = engine.verify(&store, &item.claim, item.company_id, item.period);
        match store.insert_verification(&result) {
            // false means another run won the race; the stored result stands
            Ok(inserted) => {
                if inserted {
                    counts.observe(result.verdict);
                }
            }
            Err(e) => {
                errors += 1;
                error!(claim_id = %item.claim.id, error = %e, "failed to persist result");
            }
        }
    }

    println!("{}", formatter.format_verify_summary(&counts, errors));
    if counts.total() == 0 && errors == 0 {
        println!("{}", formatter.success("Nothing to verify."));
    }
    Ok(())
}
