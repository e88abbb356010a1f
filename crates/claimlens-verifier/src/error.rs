//! Verifier failure taxonomy
//!
//! "Cannot verify" is a legitimate business outcome, not a system fault:
//! every variant here renders to an UNVERIFIABLE result at the per-claim
//! boundary rather than propagating out of `verify`.

use thiserror::Error;

/// Why a claim could not be verified
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyFailure {
    /// Metric absent from the direct and derived mapping tables
    #[error("metric '{0}' is not in the financial data mapping")]
    UnresolvableMetric(String),

    /// No financial record for a required period
    #[error("insufficient financial data for the required period")]
    MissingFinancialData,

    /// Zero denominator in a margin or growth-base computation
    #[error("the comparison base is zero, so the ratio is undefined")]
    UndefinedRatio,

    /// Any other unexpected fault (store error, malformed data)
    #[error("internal verification fault: {0}")]
    Internal(String),
}

impl VerifyFailure {
    /// Explanation text carried on the UNVERIFIABLE result
    pub fn explanation(&self) -> String {
        match self {
            VerifyFailure::UnresolvableMetric(metric) => {
                format!("Metric '{}' is not in our financial data mapping.", metric)
            }
            VerifyFailure::MissingFinancialData => {
                "Could not find sufficient financial data to verify this claim.".to_string()
            }
            VerifyFailure::UndefinedRatio => {
                "The comparison value is zero, so this figure is undefined.".to_string()
            }
            VerifyFailure::Internal(_) => {
                "Verification failed unexpectedly; the claim was left unverified.".to_string()
            }
        }
    }
}
