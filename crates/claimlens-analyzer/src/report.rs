//! Company-level analysis report assembly

use claimlens_domain::scoring::{accuracy_rate, trust_score};
use claimlens_domain::{
    ClaimId, CompanyId, DiscrepancyPattern, Verdict, VerdictCounts,
};
use serde::{Deserialize, Serialize};

use crate::analyzer::ClaimsByQuarter;

/// How many of the worst claims a report carries
const TOP_DISCREPANCY_LIMIT: usize = 5;

/// One of the worst-scoring claims in a company's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDiscrepancy {
    /// The offending claim
    pub claim_id: ClaimId,
    /// Verbatim claim sentence
    pub claim_text: String,
    /// Who made the claim
    pub speaker: String,
    /// Canonical metric name
    pub metric: String,
    /// What was stated
    pub stated_value: f64,
    /// What the data shows
    pub actual_value: Option<f64>,
    /// Accuracy score of the claim
    pub accuracy_score: Option<f64>,
    /// Its verdict
    pub verdict: Verdict,
    /// The engine's explanation
    pub explanation: String,
}

/// Complete analysis report for a single company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyAnalysis {
    /// Company analysed
    pub company_id: CompanyId,
    /// Ticker symbol
    pub ticker: String,
    /// Company name
    pub name: String,

    /// Number of claims considered
    pub total_claims: usize,
    /// Per-verdict tallies
    pub verdicts: VerdictCounts,

    /// (verified + approximately correct) / verifiable
    pub overall_accuracy_rate: f64,
    /// Weighted 0-100 trust score
    pub overall_trust_score: f64,

    /// Worst claims, most inaccurate first
    pub top_discrepancies: Vec<TopDiscrepancy>,
    /// Detected cross-quarter patterns
    pub patterns: Vec<DiscrepancyPattern>,
    /// Quarter labels covered, chronological
    pub quarters_analyzed: Vec<String>,
}

/// Assemble the report for one company from its grouped claim history
/// and already-detected patterns
pub fn build_company_analysis(
    company_id: CompanyId,
    ticker: impl Into<String>,
    name: impl Into<String>,
    claims_by_quarter: &ClaimsByQuarter,
    patterns: Vec<DiscrepancyPattern>,
) -> CompanyAnalysis {
    let mut verdicts = VerdictCounts::new();
    let mut total_claims = 0usize;
    let mut worst: Vec<TopDiscrepancy> = Vec::new();

    for claims in claims_by_quarter.values() {
        for vc in claims {
            total_claims += 1;
            let Some(v) = &vc.verification else { continue };
            verdicts.observe(v.verdict);

            if matches!(v.verdict, Verdict::Misleading | Verdict::Incorrect) {
                worst.push(TopDiscrepancy {
                    claim_id: vc.claim.id,
                    claim_text: vc.claim.claim_text.clone(),
                    speaker: vc.claim.speaker.clone(),
                    metric: vc.claim.metric.clone(),
                    stated_value: vc.claim.stated_value,
                    actual_value: v.actual_value,
                    accuracy_score: v.accuracy_score,
                    verdict: v.verdict,
                    explanation: v.explanation.clone(),
                });
            }
        }
    }

    // Most inaccurate first; claims without a score sort last
    worst.sort_by(|a, b| {
        let score_a = a.accuracy_score.unwrap_or(1.0);
        let score_b = b.accuracy_score.unwrap_or(1.0);
        score_a.partial_cmp(&score_b).unwrap_or(std::cmp::Ordering::Equal)
    });
    worst.truncate(TOP_DISCREPANCY_LIMIT);

    CompanyAnalysis {
        company_id,
        ticker: ticker.into(),
        name: name.into(),
        total_claims,
        verdicts,
        overall_accuracy_rate: round4(accuracy_rate(&verdicts)),
        overall_trust_score: round1(trust_score(&verdicts)),
        top_discrepancies: worst,
        patterns,
        quarters_analyzed: claims_by_quarter.keys().map(|q| q.label()).collect(),
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimlens_domain::{
        Claim, FiscalPeriod, MetricType, TranscriptId, Unit, VerificationResult,
        VerifiedClaim,
    };

    fn claim_with_verdict(verdict: Verdict, score: Option<f64>) -> VerifiedClaim {
        let claim = Claim::new(
            ClaimId::new(),
            TranscriptId(1),
            "CEO".to_string(),
            "revenue was strong".to_string(),
            "revenue".to_string(),
            MetricType::Absolute,
            100.0,
            Unit::UsdBillions,
        );
        let verification = VerificationResult {
            claim_id: claim.id,
            actual_value: Some(95.0),
            accuracy_score: score,
            verdict,
            explanation: "explained".to_string(),
            data_source: None,
            record_period: None,
            comparison_record_period: None,
            misleading_flags: Vec::new(),
            misleading_details: None,
        };
        VerifiedClaim { claim, verification: Some(verification) }
    }

    #[test]
    fn test_report_tallies_and_scores() {
        let mut cbq = ClaimsByQuarter::new();
        cbq.insert(
            FiscalPeriod::new(2025, 1),
            vec![
                claim_with_verdict(Verdict::Verified, Some(0.99)),
                claim_with_verdict(Verdict::Verified, Some(1.0)),
                claim_with_verdict(Verdict::ApproximatelyCorrect, Some(0.95)),
            ],
        );
        cbq.insert(
            FiscalPeriod::new(2025, 2),
            vec![
                claim_with_verdict(Verdict::Misleading, Some(0.80)),
                claim_with_verdict(Verdict::Unverifiable, None),
            ],
        );

        let report = build_company_analysis(
            CompanyId(1),
            "AAPL",
            "Apple Inc.",
            &cbq,
            Vec::new(),
        );

        assert_eq!(report.total_claims, 5);
        assert_eq!(report.verdicts.verified, 2);
        assert_eq!(report.verdicts.approximately_correct, 1);
        assert_eq!(report.verdicts.misleading, 1);
        assert_eq!(report.verdicts.unverifiable, 1);
        // accuracy = 3/4, trust = ((2*1.0 + 0.7 - 0.3)/4 + 1) * 50 = 80.0
        assert_eq!(report.overall_accuracy_rate, 0.75);
        assert_eq!(report.overall_trust_score, 80.0);
        assert_eq!(report.quarters_analyzed, vec!["Q1 2025", "Q2 2025"]);
    }

    #[test]
    fn test_top_discrepancies_sorted_and_limited() {
        let mut cbq = ClaimsByQuarter::new();
        cbq.insert(
            FiscalPeriod::new(2025, 1),
            vec![
                claim_with_verdict(Verdict::Misleading, Some(0.85)),
                claim_with_verdict(Verdict::Incorrect, Some(0.30)),
                claim_with_verdict(Verdict::Incorrect, Some(0.10)),
                claim_with_verdict(Verdict::Misleading, Some(0.80)),
                claim_with_verdict(Verdict::Incorrect, Some(0.50)),
                claim_with_verdict(Verdict::Misleading, Some(0.88)),
                claim_with_verdict(Verdict::Verified, Some(1.0)),
            ],
        );

        let report =
            build_company_analysis(CompanyId(1), "AAPL", "Apple Inc.", &cbq, Vec::new());

        assert_eq!(report.top_discrepancies.len(), 5);
        assert_eq!(report.top_discrepancies[0].accuracy_score, Some(0.10));
        assert_eq!(report.top_discrepancies[1].accuracy_score, Some(0.30));
        // The mildest misleading claim (0.88) fell off the end
        assert!(report
            .top_discrepancies
            .iter()
            .all(|d| d.accuracy_score != Some(0.88)));
    }

    #[test]
    fn test_empty_history_is_neutral() {
        let report = build_company_analysis(
            CompanyId(1),
            "AAPL",
            "Apple Inc.",
            &ClaimsByQuarter::new(),
            Vec::new(),
        );

        assert_eq!(report.total_claims, 0);
        assert_eq!(report.overall_accuracy_rate, 0.0);
        assert_eq!(report.overall_trust_score, 50.0);
        assert!(report.top_discrepancies.is_empty());
    }
}
