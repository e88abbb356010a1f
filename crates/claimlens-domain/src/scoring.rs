//! Aggregate scoring over many verified claims
//!
//! Trust-score and accuracy-rate formulas; every caller that tallies
//! verdicts goes through [`VerdictCounts`] rather than reimplementing
//! the weighting.

use serde::{Deserialize, Serialize};

use crate::verdict::Verdict;

/// Per-verdict tallies for a set of claims
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCounts {
    /// Claims judged VERIFIED
    pub verified: usize,
    /// Claims judged APPROXIMATELY_CORRECT
    pub approximately_correct: usize,
    /// Claims judged MISLEADING
    pub misleading: usize,
    /// Claims judged INCORRECT
    pub incorrect: usize,
    /// Claims that could not be checked
    pub unverifiable: usize,
}

impl VerdictCounts {
    /// Empty tallies
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one verdict
    pub fn observe(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Verified => self.verified += 1,
            Verdict::ApproximatelyCorrect => self.approximately_correct += 1,
            Verdict::Misleading => self.misleading += 1,
            Verdict::Incorrect => self.incorrect += 1,
            Verdict::Unverifiable => self.unverifiable += 1,
        }
    }

    /// Tally verdicts from an iterator
    pub fn from_verdicts<I: IntoIterator<Item = Verdict>>(verdicts: I) -> Self {
        let mut counts = Self::new();
        for v in verdicts {
            counts.observe(v);
        }
        counts
    }

    /// Number of claims that produced a substantive verdict
    pub fn verifiable(&self) -> usize {
        self.verified + self.approximately_correct + self.misleading + self.incorrect
    }

    /// Total number of claims tallied
    pub fn total(&self) -> usize {
        self.verifiable() + self.unverifiable
    }
}

/// Weighted trust score on a 0-100 scale
///
/// Formula:
///
/// ```text
/// raw = (verified*1.0 + approx*0.7 + misleading*-0.3 + incorrect*-1.0) / verifiable
/// trust = clamp((raw + 1) * 50, 0, 100)
/// ```
///
/// Returns 50.0 (neutral) when there are no verifiable claims.
///
/// # Examples
///
/// ```
/// use claimlens_domain::scoring::{trust_score, VerdictCounts};
///
/// let counts = VerdictCounts { verified: 5, approximately_correct: 5, ..Default::default() };
/// assert_eq!(trust_score(&counts), 92.5);
/// assert_eq!(trust_score(&VerdictCounts::default()), 50.0);
/// ```
pub fn trust_score(counts: &VerdictCounts) -> f64 {
    let verifiable = counts.verifiable();
    if verifiable == 0 {
        return 50.0;
    }

    let raw = (counts.verified as f64 * 1.0
        + counts.approximately_correct as f64 * 0.7
        + counts.misleading as f64 * -0.3
        + counts.incorrect as f64 * -1.0)
        / verifiable as f64;

    ((raw + 1.0) * 50.0).clamp(0.0, 100.0)
}

/// Fraction of verifiable claims that were correct (verified + approximately correct)
///
/// Returns 0.0 when there are no verifiable claims.
pub fn accuracy_rate(counts: &VerdictCounts) -> f64 {
    let verifiable = counts.verifiable();
    if verifiable == 0 {
        return 0.0;
    }
    (counts.verified + counts.approximately_correct) as f64 / verifiable as f64
}
