//! Claim verification logic

use claimlens_domain::math::{
    accuracy_score, growth_rate, normalize_to_unit, percentage_difference,
};
use claimlens_domain::traits::FinancialRecordStore;
use claimlens_domain::verdict::assign_verdict;
use claimlens_domain::{
    Claim, CompanyId, FiscalPeriod, MetricType, MisleadingFlag, Unit, Verdict,
    VerificationResult,
};
use tracing::warn;

use crate::config::VerifierConfig;
use crate::error::VerifyFailure;
use crate::mapper::MetricMapper;

/// Accuracy window in which a favorable overshoot counts as rounding bias
const ROUNDING_BIAS_MIN_SCORE: f64 = 0.90;
const ROUNDING_BIAS_MAX_SCORE: f64 = 0.98;

/// A derived-margin claim tagged as growth/change with a stated value
/// above this is treated as an absolute-margin statement: nobody's
/// margin *expands* by more than ten percentage points in a quarter,
/// but margins themselves routinely sit above ten percent.
const MARGIN_MISTAG_THRESHOLD: f64 = 10.0;

/// Value resolved from financial data for one claim
struct Resolved {
    actual: f64,
    record_period: Option<FiscalPeriod>,
    comparison_record_period: Option<FiscalPeriod>,
}

/// Verifies a single claim against structured financial data
///
/// Deterministic and side-effect-free apart from reading the injected
/// record store. Construct once and reuse across claims; verification
/// of distinct claims shares no mutable state.
pub struct VerificationEngine {
    mapper: MetricMapper,
    config: VerifierConfig,
}

impl VerificationEngine {
    /// Create an engine with the given mapper and configuration
    pub fn new(mapper: MetricMapper, config: VerifierConfig) -> Self {
        Self { mapper, config }
    }

    /// Create an engine with default configuration
    pub fn default_config() -> Self {
        Self::new(MetricMapper::new(), VerifierConfig::default())
    }

    /// Verify one claim against the company's financial data
    ///
    /// Never fails: unresolvable metrics, missing data, undefined
    /// ratios, and store faults all resolve to an UNVERIFIABLE result,
    /// so one claim can never abort batch processing.
    pub fn verify<S: FinancialRecordStore>(
        &self,
        store: &S,
        claim: &Claim,
        company: CompanyId,
        period: FiscalPeriod,
    ) -> VerificationResult
    where
        S::Error: std::fmt::Display,
    {
        // 1. Can we even resolve this metric?
        if !self.mapper.can_resolve(&claim.metric) {
            let failure = VerifyFailure::UnresolvableMetric(claim.metric.clone());
            return VerificationResult::unverifiable(claim.id, failure.explanation());
        }

        // 2. Dispatch by metric type
        let resolved = match self.resolve_actual(store, claim, company, period) {
            Ok(resolved) => resolved,
            Err(failure) => {
                if let VerifyFailure::Internal(detail) = &failure {
                    warn!(claim_id = %claim.id, %detail, "verification fault");
                }
                return VerificationResult::unverifiable(claim.id, failure.explanation());
            }
        };

        // 3. Normalize the stated value to comparable form
        let stated = Self::stated_comparable(claim);

        // 4. Compute accuracy
        let score = accuracy_score(stated, resolved.actual);

        // 5. Misleading framing checks
        let flags = Self::detect_flags(claim, stated, resolved.actual, score);

        // 6. Assign verdict (flags can escalate severity)
        let verdict = assign_verdict(score, &flags, &self.config.tolerances());

        // 7. Build the human explanation
        let explanation = Self::explain(stated, resolved.actual, verdict, &flags);

        VerificationResult {
            claim_id: claim.id,
            actual_value: Some(round4(resolved.actual)),
            accuracy_score: Some(round4(score)),
            verdict,
            explanation,
            data_source: Some(format!("{} {}", claim.metric, period.label())),
            record_period: resolved.record_period,
            comparison_record_period: resolved.comparison_record_period,
            misleading_details: if flags.is_empty() {
                None
            } else {
                Some(Self::flag_details(&flags))
            },
            misleading_flags: flags,
        }
    }

    // ── verification by type ─────────────────────────────────────────

    fn resolve_actual<S: FinancialRecordStore>(
        &self,
        store: &S,
        claim: &Claim,
        company: CompanyId,
        period: FiscalPeriod,
    ) -> Result<Resolved, VerifyFailure>
    where
        S::Error: std::fmt::Display,
    {
        match claim.metric_type {
            MetricType::GrowthRate | MetricType::Change => {
                // Margin metrics tagged as "change" with a stated value
                // like 48.2 are absolute-margin statements the extractor
                // misclassified ("gross margin was 48.2%, up from 46.9%").
                if self.mapper.is_derived(&claim.metric)
                    && claim.stated_value > MARGIN_MISTAG_THRESHOLD
                {
                    self.resolve_margin(store, claim, company, period)
                } else {
                    self.resolve_growth(store, claim, company, period)
                }
            }
            MetricType::Margin => self.resolve_margin(store, claim, company, period),
            MetricType::Absolute | MetricType::PerShare => {
                self.resolve_absolute(store, claim, company, period)
            }
            MetricType::Ratio => Err(VerifyFailure::MissingFinancialData),
        }
    }

    /// Growth-rate claim ("revenue grew 15% YoY"): needs a record pair
    fn resolve_growth<S: FinancialRecordStore>(
        &self,
        store: &S,
        claim: &Claim,
        company: CompanyId,
        period: FiscalPeriod,
    ) -> Result<Resolved, VerifyFailure>
    where
        S::Error: std::fmt::Display,
    {
        let (current, comparison) = store
            .get_comparison_pair(company, period, claim.comparison_period)
            .map_err(|e| VerifyFailure::Internal(e.to_string()))?;

        let (Some(current), Some(comparison)) = (current, comparison) else {
            return Err(VerifyFailure::MissingFinancialData);
        };

        let cur_val = self
            .mapper
            .resolve(&claim.metric, &current)
            .ok_or(VerifyFailure::MissingFinancialData)?;
        let comp_val = self
            .mapper
            .resolve(&claim.metric, &comparison)
            .ok_or(VerifyFailure::MissingFinancialData)?;

        let actual =
            growth_rate(cur_val, comp_val).ok_or(VerifyFailure::UndefinedRatio)?;

        Ok(Resolved {
            actual,
            record_period: Some(current.period),
            comparison_record_period: Some(comparison.period),
        })
    }

    /// Margin claim ("operating margin of 30%"): single record, derived ratio
    fn resolve_margin<S: FinancialRecordStore>(
        &self,
        store: &S,
        claim: &Claim,
        company: CompanyId,
        period: FiscalPeriod,
    ) -> Result<Resolved, VerifyFailure>
    where
        S::Error: std::fmt::Display,
    {
        let record = store
            .get_record(company, period)
            .map_err(|e| VerifyFailure::Internal(e.to_string()))?
            .ok_or(VerifyFailure::MissingFinancialData)?;

        let actual = self.mapper.resolve(&claim.metric, &record).ok_or_else(|| {
            if self.mapper.is_derived(&claim.metric) {
                VerifyFailure::UndefinedRatio
            } else {
                VerifyFailure::MissingFinancialData
            }
        })?;

        Ok(Resolved {
            actual,
            record_period: Some(record.period),
            comparison_record_period: None,
        })
    }

    /// Absolute or per-share claim: single record, unit-normalized
    fn resolve_absolute<S: FinancialRecordStore>(
        &self,
        store: &S,
        claim: &Claim,
        company: CompanyId,
        period: FiscalPeriod,
    ) -> Result<Resolved, VerifyFailure>
    where
        S::Error: std::fmt::Display,
    {
        let record = store
            .get_record(company, period)
            .map_err(|e| VerifyFailure::Internal(e.to_string()))?
            .ok_or(VerifyFailure::MissingFinancialData)?;

        let raw = self
            .mapper
            .resolve(&claim.metric, &record)
            .ok_or(VerifyFailure::MissingFinancialData)?;

        // Financial data is in raw dollars; convert to the claim's unit
        let actual = normalize_to_unit(raw, claim.unit);

        Ok(Resolved {
            actual,
            record_period: Some(record.period),
            comparison_record_period: None,
        })
    }

    // ── helpers ──────────────────────────────────────────────────────

    /// Normalize the claim's stated value for apples-to-apples comparison
    ///
    /// Growth rates and margins are already in percentage points, except
    /// when stated in basis points. Absolute values are assumed already
    /// expressed in the claim's declared unit.
    fn stated_comparable(claim: &Claim) -> f64 {
        match claim.metric_type {
            MetricType::GrowthRate | MetricType::Change | MetricType::Margin => {
                if claim.unit == Unit::BasisPoints {
                    claim.stated_value / 100.0
                } else {
                    claim.stated_value
                }
            }
            _ => claim.stated_value,
        }
    }

    /// Independent misleading-framing checks; all may co-occur
    fn detect_flags(
        claim: &Claim,
        stated: f64,
        actual: f64,
        score: f64,
    ) -> Vec<MisleadingFlag> {
        let mut flags = Vec::new();

        // Rounding bias: stated overshoots actual within the approximate range
        if (ROUNDING_BIAS_MIN_SCORE..ROUNDING_BIAS_MAX_SCORE).contains(&score) {
            if let Some(pct) = percentage_difference(stated, actual) {
                if pct > 0.0 {
                    flags.push(MisleadingFlag::RoundingBias);
                }
            }
        }

        // Non-GAAP figure without standard-reporting context
        if !claim.is_gaap {
            flags.push(MisleadingFlag::GaapNongaapMismatch);
        }

        // Segment claim necessarily checked against company-total data
        if claim.segment.is_some() {
            flags.push(MisleadingFlag::SegmentVsTotal);
        }

        flags
    }

    fn explain(
        stated: f64,
        actual: f64,
        verdict: Verdict,
        flags: &[MisleadingFlag],
    ) -> String {
        let pct_str = percentage_difference(stated, actual)
            .map(|p| format!("{:+.1}%", p))
            .unwrap_or_else(|| "N/A".to_string());

        let mut base = match verdict {
            Verdict::Verified => format!(
                "Verified. Stated {:.2}, actual {:.2} (difference {}). \
                 Within acceptable tolerance.",
                stated, actual, pct_str
            ),
            Verdict::ApproximatelyCorrect => format!(
                "Approximately correct. Stated {:.2}, actual {:.2} (difference {}).",
                stated, actual, pct_str
            ),
            Verdict::Misleading => format!(
                "Misleading. Stated {:.2}, actual {:.2} (difference {}). \
                 The framing may create a false impression.",
                stated, actual, pct_str
            ),
            Verdict::Incorrect => format!(
                "Incorrect. Stated {:.2}, actual {:.2} (difference {}). \
                 Materially inaccurate.",
                stated, actual, pct_str
            ),
            Verdict::Unverifiable => "Cannot verify: insufficient data.".to_string(),
        };

        if !flags.is_empty() {
            let names: Vec<String> = flags
                .iter()
                .map(|f| f.as_str().replace('_', " "))
                .collect();
            base.push_str(&format!(" Flags: {}.", names.join(", ")));
        }

        base
    }

    fn flag_details(flags: &[MisleadingFlag]) -> String {
        let parts: Vec<&str> = flags
            .iter()
            .map(|f| match f {
                MisleadingFlag::RoundingBias => {
                    "The stated figure rounds in a more favorable direction than the actual data."
                }
                MisleadingFlag::GaapNongaapMismatch => {
                    "The claim uses non-GAAP / adjusted figures which may not match standard reporting."
                }
                MisleadingFlag::SegmentVsTotal => {
                    "The claim references a business segment; verification uses total-company data."
                }
                MisleadingFlag::CherryPickedPeriod => {
                    "The comparison period may be selectively chosen."
                }
                MisleadingFlag::MisleadingComparison => {
                    "The comparison basis is non-standard."
                }
                MisleadingFlag::OmitsContext => {
                    "Important context is omitted from the claim."
                }
            })
            .collect();
        parts.join(" ")
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimlens_domain::{
        Claim, ClaimId, ComparisonPeriod, FinancialRecord, TranscriptId,
    };
    use std::collections::HashMap;

    // In-memory record store for testing (no actual storage)
    struct MockStore {
        records: HashMap<(CompanyId, FiscalPeriod), FinancialRecord>,
    }

    impl MockStore {
        fn new() -> Self {
            Self { records: HashMap::new() }
        }

        fn insert(&mut self, record: FinancialRecord) {
            self.records.insert((record.company_id, record.period), record);
        }
    }

    impl FinancialRecordStore for MockStore {
        type Error = String;

        fn get_record(
            &self,
            company: CompanyId,
            period: FiscalPeriod,
        ) -> Result<Option<FinancialRecord>, Self::Error> {
            Ok(self.records.get(&(company, period)).cloned())
        }
    }

    struct FailingStore;

    impl FinancialRecordStore for FailingStore {
        type Error = String;

        fn get_record(
            &self,
            _company: CompanyId,
            _period: FiscalPeriod,
        ) -> Result<Option<FinancialRecord>, Self::Error> {
            Err("database locked".to_string())
        }
    }

    const COMPANY: CompanyId = CompanyId(1);
    const Q3_2025: FiscalPeriod = FiscalPeriod { year: 2025, quarter: 3 };

    /// Q3 2025 and Q3 2024 data with realistic large-cap numbers
    fn sample_store() -> MockStore {
        let mut store = MockStore::new();

        let mut q3_2025 = FinancialRecord::empty(COMPANY, FiscalPeriod::new(2025, 3));
        q3_2025.revenue = Some(94_930_000_000.0);
        q3_2025.cost_of_revenue = Some(51_051_000_000.0);
        q3_2025.gross_profit = Some(43_879_000_000.0);
        q3_2025.operating_income = Some(29_590_000_000.0);
        q3_2025.operating_expenses = Some(14_289_000_000.0);
        q3_2025.net_income = Some(23_636_000_000.0);
        q3_2025.eps = Some(1.46);
        q3_2025.eps_diluted = Some(1.46);
        q3_2025.ebitda = Some(32_500_000_000.0);
        q3_2025.operating_cash_flow = Some(26_760_000_000.0);
        q3_2025.capital_expenditure = Some(-4_270_000_000.0);
        q3_2025.free_cash_flow = Some(22_490_000_000.0);
        store.insert(q3_2025);

        let mut q3_2024 = FinancialRecord::empty(COMPANY, FiscalPeriod::new(2024, 3));
        q3_2024.revenue = Some(85_777_000_000.0);
        q3_2024.cost_of_revenue = Some(46_377_000_000.0);
        q3_2024.gross_profit = Some(39_400_000_000.0);
        q3_2024.operating_income = Some(26_200_000_000.0);
        q3_2024.net_income = Some(22_956_000_000.0);
        q3_2024.eps = Some(1.40);
        q3_2024.eps_diluted = Some(1.40);
        q3_2024.capital_expenditure = Some(-3_800_000_000.0);
        store.insert(q3_2024);

        store
    }

    fn growth_claim(stated: f64) -> Claim {
        let mut claim = Claim::new(
            ClaimId::new(),
            TranscriptId(1),
            "Tim Cook, CEO".to_string(),
            "Revenue grew year over year".to_string(),
            "revenue".to_string(),
            MetricType::GrowthRate,
            stated,
            Unit::Percent,
        );
        claim.comparison_period = ComparisonPeriod::YearOverYear;
        claim
    }

    fn absolute_claim(metric: &str, stated: f64, unit: Unit) -> Claim {
        Claim::new(
            ClaimId::new(),
            TranscriptId(1),
            "Tim Cook, CEO".to_string(),
            "test claim".to_string(),
            metric.to_string(),
            MetricType::Absolute,
            stated,
            unit,
        )
    }

    // ── Growth rate verification ─────────────────────────────────────

    #[test]
    fn test_accurate_yoy_growth() {
        // Actual revenue growth: (94.93B - 85.78B) / 85.78B = 10.67%
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let result = engine.verify(&store, &growth_claim(10.7), COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Verified);
        assert!(result.accuracy_score.unwrap() > 0.98);
        assert_eq!(result.record_period, Some(FiscalPeriod::new(2025, 3)));
        assert_eq!(
            result.comparison_record_period,
            Some(FiscalPeriod::new(2024, 3))
        );
    }

    #[test]
    fn test_overstated_growth_is_misleading() {
        // Stated 12% vs actual ~10.67%: accuracy ~0.875, below the
        // approximately-correct floor but above incorrect
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let result = engine.verify(&store, &growth_claim(12.0), COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Misleading);
        let score = result.accuracy_score.unwrap();
        assert!(score < 0.90);
        assert!((score - 0.8755).abs() < 0.001);
    }

    #[test]
    fn test_understated_growth_is_approximate() {
        // Stated 10% vs actual ~10.67%: no favorable rounding involved
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let result = engine.verify(&store, &growth_claim(10.0), COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::ApproximatelyCorrect);
        assert!(!result.misleading_flags.contains(&MisleadingFlag::RoundingBias));
    }

    #[test]
    fn test_slight_overshoot_gets_rounding_bias_flag() {
        // Stated 11% vs actual ~10.67%: inside [0.90, 0.98) and overshooting
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let result = engine.verify(&store, &growth_claim(11.0), COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::ApproximatelyCorrect);
        assert!(result.misleading_flags.contains(&MisleadingFlag::RoundingBias));
    }

    #[test]
    fn test_wildly_incorrect_growth() {
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let result = engine.verify(&store, &growth_claim(50.0), COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Incorrect);
    }

    #[test]
    fn test_missing_comparison_data() {
        // No 2019 data at all
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let result = engine.verify(
            &store,
            &growth_claim(10.0),
            COMPANY,
            FiscalPeriod::new(2020, 3),
        );

        assert_eq!(result.verdict, Verdict::Unverifiable);
        assert!(result.accuracy_score.is_none());
    }

    #[test]
    fn test_sequential_growth_uses_prior_quarter() {
        let engine = VerificationEngine::default_config();
        let mut store = sample_store();

        let mut q2_2025 = FinancialRecord::empty(COMPANY, FiscalPeriod::new(2025, 2));
        q2_2025.revenue = Some(90_000_000_000.0);
        store.insert(q2_2025);

        // (94.93 - 90.0) / 90.0 = 5.48%
        let mut claim = growth_claim(5.5);
        claim.comparison_period = ComparisonPeriod::Sequential;

        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Verified);
        assert_eq!(
            result.comparison_record_period,
            Some(FiscalPeriod::new(2025, 2))
        );
    }

    #[test]
    fn test_growth_against_zero_base_is_unverifiable() {
        let engine = VerificationEngine::default_config();
        let mut store = MockStore::new();

        let mut current = FinancialRecord::empty(COMPANY, Q3_2025);
        current.revenue = Some(10_000_000.0);
        store.insert(current);

        let mut prior = FinancialRecord::empty(COMPANY, FiscalPeriod::new(2024, 3));
        prior.revenue = Some(0.0);
        store.insert(prior);

        let result = engine.verify(&store, &growth_claim(100.0), COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Unverifiable);
    }

    // ── Margin verification ──────────────────────────────────────────

    #[test]
    fn test_gross_margin() {
        // Actual gross margin ~46.22%
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let mut claim = absolute_claim("gross_margin", 46.0, Unit::Percent);
        claim.metric_type = MetricType::Margin;

        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Verified);
        assert!((result.actual_value.unwrap() - 46.22).abs() < 0.01);
    }

    #[test]
    fn test_margin_mistagged_as_change_routes_to_margin() {
        // "Gross margin was 46.2%, up from 45.9%" misclassified as a
        // change claim with stated_value 46.2: the stated value exceeds
        // the mistag threshold, so this is checked as an absolute margin
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let mut claim = absolute_claim("gross_margin", 46.2, Unit::Percent);
        claim.metric_type = MetricType::Change;
        claim.comparison_period = ComparisonPeriod::YearOverYear;

        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Verified);
        // Routed to the single-record margin path, no comparison record
        assert!(result.comparison_record_period.is_none());
    }

    #[test]
    fn test_small_margin_change_still_uses_growth_path() {
        // A genuine margin-change claim ("expanded 1.3 points") stays on
        // the growth path and compares margin against margin
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let mut claim = absolute_claim("gross_margin", 0.6, Unit::Percent);
        claim.metric_type = MetricType::Change;
        claim.comparison_period = ComparisonPeriod::YearOverYear;

        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        // Growth of gross margin: 46.222% vs 45.934% -> ~0.63%
        assert!(result.comparison_record_period.is_some());
        assert_eq!(result.verdict, Verdict::ApproximatelyCorrect);
    }

    // ── Absolute / per-share verification ────────────────────────────

    #[test]
    fn test_accurate_revenue_billions() {
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let claim = absolute_claim("revenue", 94.9, Unit::UsdBillions);
        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Verified);
        assert!((result.actual_value.unwrap() - 94.93).abs() < 0.001);
    }

    #[test]
    fn test_accurate_revenue_millions() {
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let claim = absolute_claim("revenue", 94_930.0, Unit::UsdMillions);
        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Verified);
        assert_eq!(result.accuracy_score, Some(1.0));
    }

    #[test]
    fn test_incorrect_absolute() {
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let claim = absolute_claim("revenue", 120.0, Unit::UsdBillions);
        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Incorrect);
    }

    #[test]
    fn test_exact_eps() {
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let mut claim = absolute_claim("eps_diluted", 1.46, Unit::Usd);
        claim.metric_type = MetricType::PerShare;

        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Verified);
        assert_eq!(result.accuracy_score, Some(1.0));
        assert!(result.misleading_flags.is_empty());
    }

    #[test]
    fn test_capex_claim_positive_against_negative_storage() {
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let claim = absolute_claim("capital_expenditure", 4.27, Unit::UsdBillions);
        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Verified);
        assert_eq!(result.actual_value, Some(4.27));
    }

    // ── Unresolvable / unsupported claims ────────────────────────────

    #[test]
    fn test_unknown_metric() {
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let claim = absolute_claim("subscriber_count", 1_000_000.0, Unit::Usd);
        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Unverifiable);
        assert!(result.explanation.contains("subscriber_count"));
    }

    #[test]
    fn test_ratio_claims_are_unverifiable() {
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let mut claim = absolute_claim("total_debt", 0.5, Unit::Ratio);
        claim.metric_type = MetricType::Ratio;

        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Unverifiable);
    }

    #[test]
    fn test_store_fault_becomes_unverifiable() {
        // A store error must never escape the per-claim boundary
        let engine = VerificationEngine::default_config();

        let claim = absolute_claim("revenue", 94.9, Unit::UsdBillions);
        let result = engine.verify(&FailingStore, &claim, COMPANY, Q3_2025);

        assert_eq!(result.verdict, Verdict::Unverifiable);
        assert!(!result.explanation.contains("database"));
    }

    // ── Misleading flags ─────────────────────────────────────────────

    #[test]
    fn test_non_gaap_flag_escalates() {
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let mut claim = absolute_claim("revenue", 94.9, Unit::UsdBillions);
        claim.is_gaap = false;

        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        assert!(result
            .misleading_flags
            .contains(&MisleadingFlag::GaapNongaapMismatch));
        // Numerically verified, but the flag escalates the verdict
        assert_eq!(result.verdict, Verdict::Misleading);
        assert!(result.misleading_details.is_some());
    }

    #[test]
    fn test_segment_flag_escalates() {
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let mut claim = absolute_claim("revenue", 94.9, Unit::UsdBillions);
        claim.segment = Some("iPhone".to_string());

        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        assert!(result
            .misleading_flags
            .contains(&MisleadingFlag::SegmentVsTotal));
        assert_eq!(result.verdict, Verdict::Misleading);
    }

    // ── Stated-value normalization ───────────────────────────────────

    #[test]
    fn test_basis_points_stated_value_converted() {
        // "expanded 130 basis points" stated as 130 -> compared as 1.3
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let mut claim = absolute_claim("revenue", 1_070.0, Unit::BasisPoints);
        claim.metric_type = MetricType::GrowthRate;
        claim.comparison_period = ComparisonPeriod::YearOverYear;

        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        // 1070 bps = 10.7% against actual ~10.67%
        assert_eq!(result.verdict, Verdict::Verified);
    }

    #[test]
    fn test_explanation_carries_values_and_flags() {
        let engine = VerificationEngine::default_config();
        let store = sample_store();

        let mut claim = growth_claim(12.0);
        claim.is_gaap = false;

        let result = engine.verify(&store, &claim, COMPANY, Q3_2025);

        assert!(result.explanation.contains("12.00"));
        assert!(result.explanation.contains("10.67"));
        assert!(result.explanation.contains("gaap nongaap mismatch"));
    }

    #[test]
    fn test_scenario_exact_match() {
        // Stated 15.0 vs actual 15.0 -> accuracy 1.0 -> VERIFIED
        let engine = VerificationEngine::default_config();
        let mut store = MockStore::new();

        let mut current = FinancialRecord::empty(COMPANY, Q3_2025);
        current.revenue = Some(115_000_000_000.0);
        store.insert(current);

        let mut prior = FinancialRecord::empty(COMPANY, FiscalPeriod::new(2024, 3));
        prior.revenue = Some(100_000_000_000.0);
        store.insert(prior);

        let result = engine.verify(&store, &growth_claim(15.0), COMPANY, Q3_2025);

        assert_eq!(result.accuracy_score, Some(1.0));
        assert_eq!(result.verdict, Verdict::Verified);
    }
}
