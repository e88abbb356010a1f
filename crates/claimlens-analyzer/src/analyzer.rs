//! Quarter-to-quarter discrepancy pattern detection

use std::collections::BTreeMap;

use claimlens_domain::{
    CompanyId, DiscrepancyPattern, FiscalPeriod, MetricType, PatternType, VerifiedClaim,
};
use tracing::debug;

/// A company's claims grouped by fiscal quarter
///
/// Keyed on [`FiscalPeriod`], so iteration is chronological regardless
/// of how quarter labels format.
pub type ClaimsByQuarter = BTreeMap<FiscalPeriod, Vec<VerifiedClaim>>;

/// Minimum inexact claims before rounding bias can be called
const ROUNDING_MIN_INEXACT: usize = 4;
/// Fraction of inexact claims that must overshoot to flag rounding bias
const ROUNDING_FAVORABLE_RATIO: f64 = 0.7;
/// Quarters (and distinct per-quarter top metrics) needed for switching
const SWITCHING_MIN_QUARTERS: usize = 3;
/// Accuracy drop from first to last quarter that flags decline
const INACCURACY_MIN_DROP: f64 = 0.05;
/// GAAP-ratio spread across quarters that flags shifting
const GAAP_MIN_SPREAD: f64 = 0.3;
/// Signed growth claims a quarter needs before its mix is judged
const EMPHASIS_MIN_CLAIMS: usize = 2;
/// Positive fraction above which a quarter counts as one-sided
const EMPHASIS_POSITIVE_RATIO: f64 = 0.9;
/// One-sided quarters needed to flag selective emphasis
const EMPHASIS_MIN_QUARTERS: usize = 2;

/// Detects cross-quarter patterns of misleading behaviour
///
/// Stateless; all five detectors run on every call and each contributes
/// at most one pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscrepancyAnalyzer;

impl DiscrepancyAnalyzer {
    /// Create an analyzer
    pub fn new() -> Self {
        Self
    }

    /// Run all detectors over one company's claim history
    pub fn analyze_company(
        &self,
        company: CompanyId,
        claims_by_quarter: &ClaimsByQuarter,
    ) -> Vec<DiscrepancyPattern> {
        let patterns: Vec<DiscrepancyPattern> = [
            self.detect_rounding_bias(claims_by_quarter),
            self.detect_metric_switching(claims_by_quarter),
            self.detect_increasing_inaccuracy(claims_by_quarter),
            self.detect_gaap_shifting(claims_by_quarter),
            self.detect_selective_emphasis(claims_by_quarter),
        ]
        .into_iter()
        .flatten()
        .collect();

        debug!(
            company = %company,
            quarters = claims_by_quarter.len(),
            patterns = patterns.len(),
            "discrepancy analysis complete"
        );
        patterns
    }

    // ── detectors ────────────────────────────────────────────────────

    /// Flag if >70% of inexact claims round in a favourable direction
    fn detect_rounding_bias(&self, cbq: &ClaimsByQuarter) -> Option<DiscrepancyPattern> {
        let mut favorable = 0usize;
        let mut total = 0usize;
        let mut affected: Vec<FiscalPeriod> = Vec::new();

        for (quarter, claims) in cbq {
            for vc in claims {
                let Some(v) = &vc.verification else { continue };
                let (Some(actual), Some(score)) = (v.actual_value, v.accuracy_score)
                else {
                    continue;
                };
                if score < 1.0 {
                    total += 1;
                    if vc.claim.stated_value > actual {
                        favorable += 1;
                        affected.push(*quarter);
                    }
                }
            }
        }

        if total < ROUNDING_MIN_INEXACT {
            return None;
        }
        let ratio = favorable as f64 / total as f64;
        if ratio <= ROUNDING_FAVORABLE_RATIO {
            return None;
        }

        affected.dedup();
        Some(DiscrepancyPattern {
            pattern_type: PatternType::ConsistentRoundingUp,
            description: format!(
                "Management consistently rounds in a favorable direction. \
                 {}/{} inexact claims overshoot the actual figure.",
                favorable, total
            ),
            affected_quarters: labels(&affected),
            severity: round2(ratio),
            evidence: vec![format!("{}/{} favorable roundings", favorable, total)],
        })
    }

    /// Flag when the most-emphasised metric changes each quarter
    ///
    /// A quarter's top metric is the mode of its claims' metric names;
    /// ties break to the lexicographically smallest name so the result
    /// never depends on claim ordering.
    fn detect_metric_switching(&self, cbq: &ClaimsByQuarter) -> Option<DiscrepancyPattern> {
        let mut top_by_quarter: BTreeMap<FiscalPeriod, String> = BTreeMap::new();

        for (quarter, claims) in cbq {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for vc in claims {
                *counts.entry(vc.claim.metric.as_str()).or_insert(0) += 1;
            }
            // Reverse name order + last-max-wins leaves the
            // lexicographically smallest name among tied counts
            if let Some((metric, _)) =
                counts.iter().rev().max_by_key(|&(_, count)| *count)
            {
                top_by_quarter.insert(*quarter, (*metric).to_string());
            }
        }

        let distinct: std::collections::BTreeSet<&String> =
            top_by_quarter.values().collect();
        if top_by_quarter.len() < SWITCHING_MIN_QUARTERS
            || distinct.len() < SWITCHING_MIN_QUARTERS
        {
            return None;
        }

        let trend = top_by_quarter
            .iter()
            .map(|(q, m)| format!("{}: {}", q.label(), m))
            .collect::<Vec<_>>()
            .join("; ");

        Some(DiscrepancyPattern {
            pattern_type: PatternType::MetricSwitching,
            description: format!(
                "Most-emphasised metric shifts across quarters ({}). \
                 Possible selective emphasis.",
                trend
            ),
            affected_quarters: top_by_quarter.keys().map(|q| q.label()).collect(),
            severity: 0.5,
            evidence: vec![format!("Top metrics: {}", trend)],
        })
    }

    /// Flag when average accuracy declines over time
    fn detect_increasing_inaccuracy(
        &self,
        cbq: &ClaimsByQuarter,
    ) -> Option<DiscrepancyPattern> {
        let mut quarterly_mean: BTreeMap<FiscalPeriod, f64> = BTreeMap::new();

        for (quarter, claims) in cbq {
            let scores: Vec<f64> = claims
                .iter()
                .filter_map(|vc| vc.verification.as_ref()?.accuracy_score)
                .collect();
            if !scores.is_empty() {
                let mean = scores.iter().sum::<f64>() / scores.len() as f64;
                quarterly_mean.insert(*quarter, mean);
            }
        }

        let values: Vec<f64> = quarterly_mean.values().copied().collect();
        let (Some(first), Some(last)) = (values.first(), values.last()) else {
            return None;
        };
        if values.len() < SWITCHING_MIN_QUARTERS || *last >= first - INACCURACY_MIN_DROP {
            return None;
        }

        let trend = quarterly_mean
            .iter()
            .map(|(q, v)| format!("{}: {:.1}%", q.label(), v * 100.0))
            .collect::<Vec<_>>()
            .join("; ");

        Some(DiscrepancyPattern {
            pattern_type: PatternType::IncreasingInaccuracy,
            description: format!("Claim accuracy declining over time ({}).", trend),
            affected_quarters: quarterly_mean.keys().map(|q| q.label()).collect(),
            severity: round2((last - first).abs()),
            evidence: vec![format!("Accuracy trend: {}", trend)],
        })
    }

    /// Flag when the GAAP vs non-GAAP mix changes significantly
    fn detect_gaap_shifting(&self, cbq: &ClaimsByQuarter) -> Option<DiscrepancyPattern> {
        let mut ratios: BTreeMap<FiscalPeriod, f64> = BTreeMap::new();

        for (quarter, claims) in cbq {
            if claims.is_empty() {
                continue;
            }
            let gaap = claims.iter().filter(|vc| vc.claim.is_gaap).count();
            ratios.insert(*quarter, gaap as f64 / claims.len() as f64);
        }

        if ratios.len() < 2 {
            return None;
        }
        let max = ratios.values().copied().fold(f64::MIN, f64::max);
        let min = ratios.values().copied().fold(f64::MAX, f64::min);
        if max - min <= GAAP_MIN_SPREAD {
            return None;
        }

        let trend = ratios
            .iter()
            .map(|(q, r)| format!("{}: {:.2}", q.label(), r))
            .collect::<Vec<_>>()
            .join("; ");

        Some(DiscrepancyPattern {
            pattern_type: PatternType::GaapNongaapShifting,
            description: format!(
                "Company shifts between GAAP and non-GAAP emphasis. GAAP ratios: {}",
                trend
            ),
            affected_quarters: ratios.keys().map(|q| q.label()).collect(),
            severity: round2(max - min),
            evidence: vec![format!("GAAP ratios: {}", trend)],
        })
    }

    /// Flag when management almost never mentions negative growth
    fn detect_selective_emphasis(
        &self,
        cbq: &ClaimsByQuarter,
    ) -> Option<DiscrepancyPattern> {
        let mut biased: Vec<FiscalPeriod> = Vec::new();

        for (quarter, claims) in cbq {
            let positive = claims
                .iter()
                .filter(|vc| {
                    vc.claim.metric_type == MetricType::GrowthRate
                        && vc.claim.stated_value > 0.0
                })
                .count();
            let negative = claims
                .iter()
                .filter(|vc| {
                    vc.claim.metric_type == MetricType::GrowthRate
                        && vc.claim.stated_value < 0.0
                })
                .count();
            let total = positive + negative;
            if total > EMPHASIS_MIN_CLAIMS
                && positive as f64 / total as f64 > EMPHASIS_POSITIVE_RATIO
            {
                biased.push(*quarter);
            }
        }

        if biased.len() < EMPHASIS_MIN_QUARTERS {
            return None;
        }

        let quarter_list = labels(&biased);
        Some(DiscrepancyPattern {
            pattern_type: PatternType::SelectiveEmphasis,
            description: format!(
                "Management overwhelmingly highlights positive growth metrics \
                 in {} quarters while avoiding negative trends.",
                biased.len()
            ),
            affected_quarters: quarter_list.clone(),
            severity: 0.6,
            evidence: vec![format!(
                "Quarters with >90% positive growth claims: {}",
                quarter_list.join(", ")
            )],
        })
    }
}

fn labels(periods: &[FiscalPeriod]) -> Vec<String> {
    periods.iter().map(|p| p.label()).collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
