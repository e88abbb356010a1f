//! Verdict assignment rules
//!
//! The tier thresholds and the flag-escalation rule live here, in one
//! place. The verification engine and any standalone verdict
//! recomputation path both call [`assign_verdict`]; nowhere else in the
//! workspace duplicates the thresholds.

use serde::{Deserialize, Serialize};

/// Categorical judgment of a claim's accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Stated value matches the data within the verified tolerance
    Verified,
    /// Close, but outside the verified tolerance
    ApproximatelyCorrect,
    /// Materially off, or accurate but framed misleadingly
    Misleading,
    /// Materially inaccurate
    Incorrect,
    /// Could not be checked against the available data
    Unverifiable,
}

impl Verdict {
    /// Get the verdict as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Verified => "verified",
            Verdict::ApproximatelyCorrect => "approximately_correct",
            Verdict::Misleading => "misleading",
            Verdict::Incorrect => "incorrect",
            Verdict::Unverifiable => "unverifiable",
        }
    }

    /// Parse a verdict from its string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "verified" => Some(Verdict::Verified),
            "approximately_correct" => Some(Verdict::ApproximatelyCorrect),
            "misleading" => Some(Verdict::Misleading),
            "incorrect" => Some(Verdict::Incorrect),
            "unverifiable" => Some(Verdict::Unverifiable),
            _ => None,
        }
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid verdict: {}", s))
    }
}

/// Framing-risk indicator orthogonal to numeric accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MisleadingFlag {
    /// Non-GAAP / adjusted figure presented without standard-reporting context
    GaapNongaapMismatch,
    /// The comparison period appears selectively chosen
    CherryPickedPeriod,
    /// Segment claim checked against company-total data
    SegmentVsTotal,
    /// Stated figure rounds in a favorable direction
    RoundingBias,
    /// Non-standard comparison basis
    MisleadingComparison,
    /// Important context omitted from the claim
    OmitsContext,
}

impl MisleadingFlag {
    /// Get the flag as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MisleadingFlag::GaapNongaapMismatch => "gaap_nongaap_mismatch",
            MisleadingFlag::CherryPickedPeriod => "cherry_picked_period",
            MisleadingFlag::SegmentVsTotal => "segment_vs_total",
            MisleadingFlag::RoundingBias => "rounding_bias",
            MisleadingFlag::MisleadingComparison => "misleading_comparison",
            MisleadingFlag::OmitsContext => "omits_context",
        }
    }

    /// Parse a flag from its string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gaap_nongaap_mismatch" => Some(MisleadingFlag::GaapNongaapMismatch),
            "cherry_picked_period" => Some(MisleadingFlag::CherryPickedPeriod),
            "segment_vs_total" => Some(MisleadingFlag::SegmentVsTotal),
            "rounding_bias" => Some(MisleadingFlag::RoundingBias),
            "misleading_comparison" => Some(MisleadingFlag::MisleadingComparison),
            "omits_context" => Some(MisleadingFlag::OmitsContext),
            _ => None,
        }
    }
}

/// Accuracy-score floors for each verdict tier
///
/// A score of at least `1 - verified` earns VERIFIED, at least
/// `1 - approx` earns APPROXIMATELY_CORRECT, at least `1 - misleading`
/// earns MISLEADING; anything lower is INCORRECT.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerdictTolerances {
    /// Relative error accepted as fully verified (default 2%)
    pub verified: f64,
    /// Relative error accepted as approximately correct (default 10%)
    pub approx: f64,
    /// Relative error boundary between misleading and incorrect (default 25%)
    pub misleading: f64,
}

impl Default for VerdictTolerances {
    fn default() -> Self {
        Self { verified: 0.02, approx: 0.10, misleading: 0.25 }
    }
}

/// Assign a verdict from an accuracy score and detected flags
///
/// Tier assignment first, then flag escalation: a VERIFIED or
/// APPROXIMATELY_CORRECT claim with at least one substantive flag
/// (anything other than rounding bias) is escalated to MISLEADING.
/// Rounding bias alone never escalates, and flags never change a verdict
/// that is already MISLEADING or INCORRECT.
///
/// # Examples
///
/// ```
/// use claimlens_domain::verdict::{assign_verdict, MisleadingFlag, Verdict, VerdictTolerances};
///
/// let tol = VerdictTolerances::default();
/// assert_eq!(assign_verdict(0.99, &[], &tol), Verdict::Verified);
/// assert_eq!(assign_verdict(0.95, &[], &tol), Verdict::ApproximatelyCorrect);
/// assert_eq!(
///     assign_verdict(0.95, &[MisleadingFlag::GaapNongaapMismatch], &tol),
///     Verdict::Misleading
/// );
/// assert_eq!(assign_verdict(0.50, &[], &tol), Verdict::Incorrect);
/// ```
pub fn assign_verdict(
    accuracy_score: f64,
    flags: &[MisleadingFlag],
    tolerances: &VerdictTolerances,
) -> Verdict {
    let mut verdict = if accuracy_score >= 1.0 - tolerances.verified {
        Verdict::Verified
    } else if accuracy_score >= 1.0 - tolerances.approx {
        Verdict::ApproximatelyCorrect
    } else if accuracy_score >= 1.0 - tolerances.misleading {
        Verdict::Misleading
    } else {
        Verdict::Incorrect
    };

    // Substantive flags escalate an otherwise-acceptable verdict
    if matches!(verdict, Verdict::Verified | Verdict::ApproximatelyCorrect) {
        let substantive = flags.iter().any(|f| *f != MisleadingFlag::RoundingBias);
        if substantive {
            verdict = Verdict::Misleading;
        }
    }

    verdict
}
