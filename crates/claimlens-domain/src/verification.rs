//! Verification result - the engine's output for exactly one claim

use serde::{Deserialize, Serialize};

use crate::claim::{Claim, ClaimId};
use crate::period::FiscalPeriod;
use crate::verdict::{MisleadingFlag, Verdict};

/// Outcome of verifying one claim against financial data
///
/// Created at most once per claim; a claim that already has a result is
/// skipped by the orchestration layer, never re-verified in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// The claim this result belongs to
    pub claim_id: ClaimId,

    /// Value computed from financial data, in the claim's own terms
    /// (None when the claim was unverifiable)
    pub actual_value: Option<f64>,

    /// Accuracy score in [0, 1] (None when the claim was unverifiable)
    pub accuracy_score: Option<f64>,

    /// Tiered judgment
    pub verdict: Verdict,

    /// Human-readable explanation of the judgment
    pub explanation: String,

    /// Label describing the data consulted ("revenue Q3 2025")
    pub data_source: Option<String>,

    /// Period of the primary record used
    pub record_period: Option<FiscalPeriod>,

    /// Period of the comparison record, for growth/change claims
    pub comparison_record_period: Option<FiscalPeriod>,

    /// Framing-risk flags detected alongside the numeric check
    pub misleading_flags: Vec<MisleadingFlag>,

    /// Sentence(s) expanding on the flags, when any were raised
    pub misleading_details: Option<String>,
}

impl VerificationResult {
    /// An UNVERIFIABLE result with the given explanation
    pub fn unverifiable(claim_id: ClaimId, explanation: impl Into<String>) -> Self {
        Self {
            claim_id,
            actual_value: None,
            accuracy_score: None,
            verdict: Verdict::Unverifiable,
            explanation: explanation.into(),
            data_source: None,
            record_period: None,
            comparison_record_period: None,
            misleading_flags: Vec::new(),
            misleading_details: None,
        }
    }

    /// Whether this result produced a substantive verdict
    pub fn is_verifiable(&self) -> bool {
        self.verdict != Verdict::Unverifiable
    }
}

/// A claim paired with its verification result, if it has one
///
/// This is the shape the discrepancy analyzer and reporting consume: a
/// claim without a result simply has not been verified yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedClaim {
    /// The claim as extracted
    pub claim: Claim,
    /// Its verification result, once produced
    pub verification: Option<VerificationResult>,
}
