//! Integration tests for the SQLite store

use claimlens_domain::traits::{FinancialRecordStore, PatternStore};
use claimlens_domain::{
    Claim, ClaimId, ComparisonPeriod, DiscrepancyPattern, FinancialRecord, FiscalPeriod,
    MetricType, MisleadingFlag, PatternType, TranscriptId, Unit, Verdict,
    VerificationResult,
};
use claimlens_store::{SqliteStore, StoreError};

fn memory_store() -> SqliteStore {
    SqliteStore::new(":memory:").unwrap()
}

fn sample_record(store: &mut SqliteStore, year: i32, quarter: u8, revenue: f64) {
    let company = store.get_company("AAPL").unwrap().unwrap();
    let mut record =
        FinancialRecord::empty(company.id, FiscalPeriod::new(year, quarter));
    record.revenue = Some(revenue);
    record.gross_profit = Some(revenue * 0.46);
    store.insert_financial_record(&record).unwrap();
}

fn sample_claim(transcript_id: TranscriptId) -> Claim {
    let mut claim = Claim::new(
        ClaimId::new(),
        transcript_id,
        "Tim Cook, CEO".to_string(),
        "Revenue grew 10.7% year over year".to_string(),
        "revenue".to_string(),
        MetricType::GrowthRate,
        10.7,
        Unit::Percent,
    );
    claim.comparison_period = ComparisonPeriod::YearOverYear;
    claim.context_snippet = Some("up approximately 10.7 percent".to_string());
    claim
}

#[test]
fn test_company_upsert_is_stable() {
    let mut store = memory_store();

    let first = store.upsert_company("AAPL", "Apple Inc.", Some("Technology")).unwrap();
    let second = store.upsert_company("AAPL", "Apple Inc.", Some("Technology")).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(store.companies().unwrap().len(), 1);
}

#[test]
fn test_financial_record_round_trip() {
    let mut store = memory_store();
    let company = store.upsert_company("AAPL", "Apple Inc.", None).unwrap();

    let mut record =
        FinancialRecord::empty(company.id, FiscalPeriod::new(2025, 3));
    record.revenue = Some(94_930_000_000.0);
    record.capital_expenditure = Some(-4_270_000_000.0);
    record.eps_diluted = Some(1.46);
    store.insert_financial_record(&record).unwrap();

    let loaded = store
        .get_record(company.id, FiscalPeriod::new(2025, 3))
        .unwrap()
        .unwrap();
    assert_eq!(loaded, record);

    // CapEx keeps its stored sign; normalization is the mapper's job
    assert_eq!(loaded.capital_expenditure, Some(-4_270_000_000.0));
}

#[test]
fn test_duplicate_financial_record_rejected() {
    let mut store = memory_store();
    store.upsert_company("AAPL", "Apple Inc.", None).unwrap();
    sample_record(&mut store, 2025, 3, 94_930_000_000.0);

    let company = store.get_company("AAPL").unwrap().unwrap();
    let record = FinancialRecord::empty(company.id, FiscalPeriod::new(2025, 3));
    let result = store.insert_financial_record(&record);

    assert!(matches!(result, Err(StoreError::Duplicate(_))));
    // Original snapshot untouched
    let loaded = store
        .get_record(company.id, FiscalPeriod::new(2025, 3))
        .unwrap()
        .unwrap();
    assert_eq!(loaded.revenue, Some(94_930_000_000.0));
}

#[test]
fn test_comparison_pair_wraps_year_boundary() {
    let mut store = memory_store();
    store.upsert_company("AAPL", "Apple Inc.", None).unwrap();
    sample_record(&mut store, 2025, 1, 90_000_000_000.0);
    sample_record(&mut store, 2024, 4, 120_000_000_000.0);

    let company = store.get_company("AAPL").unwrap().unwrap();
    let (current, prior) = store
        .get_comparison_pair(
            company.id,
            FiscalPeriod::new(2025, 1),
            ComparisonPeriod::Sequential,
        )
        .unwrap();

    assert_eq!(current.unwrap().revenue, Some(90_000_000_000.0));
    assert_eq!(prior.unwrap().period, FiscalPeriod::new(2024, 4));
}

#[test]
fn test_unverified_claims_carry_transcript_context() {
    let mut store = memory_store();
    let company = store.upsert_company("AAPL", "Apple Inc.", None).unwrap();
    let transcript_id = store
        .upsert_transcript(company.id, FiscalPeriod::new(2025, 3), None, "call text")
        .unwrap();

    let claim = sample_claim(transcript_id);
    store.insert_claim(&claim).unwrap();

    let pending = store.unverified_claims().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].claim, claim);
    assert_eq!(pending[0].company_id, company.id);
    assert_eq!(pending[0].period, FiscalPeriod::new(2025, 3));
}

#[test]
fn test_verification_is_first_write_wins() {
    let mut store = memory_store();
    let company = store.upsert_company("AAPL", "Apple Inc.", None).unwrap();
    let transcript_id = store
        .upsert_transcript(company.id, FiscalPeriod::new(2025, 3), None, "")
        .unwrap();
    let claim = sample_claim(transcript_id);
    store.insert_claim(&claim).unwrap();

    let first = VerificationResult {
        claim_id: claim.id,
        actual_value: Some(10.67),
        accuracy_score: Some(0.9972),
        verdict: Verdict::Verified,
        explanation: "Verified.".to_string(),
        data_source: Some("revenue Q3 2025".to_string()),
        record_period: Some(FiscalPeriod::new(2025, 3)),
        comparison_record_period: Some(FiscalPeriod::new(2024, 3)),
        misleading_flags: vec![MisleadingFlag::RoundingBias],
        misleading_details: Some("rounds favorably".to_string()),
    };
    assert!(store.insert_verification(&first).unwrap());

    // A second write for the same claim is ignored
    let mut second = first.clone();
    second.verdict = Verdict::Incorrect;
    assert!(!store.insert_verification(&second).unwrap());

    let stored = store.get_verification(claim.id).unwrap().unwrap();
    assert_eq!(stored, first);

    // The claim no longer shows as unverified
    assert!(store.unverified_claims().unwrap().is_empty());
}

#[test]
fn test_claims_grouped_by_quarter_chronologically() {
    let mut store = memory_store();
    let company = store.upsert_company("AAPL", "Apple Inc.", None).unwrap();

    // Insert out of chronological order
    for period in [
        FiscalPeriod::new(2025, 1),
        FiscalPeriod::new(2024, 4),
        FiscalPeriod::new(2025, 2),
    ] {
        let transcript_id = store
            .upsert_transcript(company.id, period, None, "")
            .unwrap();
        store.insert_claim(&sample_claim(transcript_id)).unwrap();
    }

    let grouped = store.claims_by_quarter(company.id).unwrap();
    let periods: Vec<FiscalPeriod> = grouped.keys().copied().collect();
    assert_eq!(
        periods,
        vec![
            FiscalPeriod::new(2024, 4),
            FiscalPeriod::new(2025, 1),
            FiscalPeriod::new(2025, 2),
        ]
    );
    assert!(grouped.values().all(|claims| claims.len() == 1));
    // No verification results yet
    assert!(grouped
        .values()
        .flatten()
        .all(|vc| vc.verification.is_none()));
}

#[test]
fn test_pattern_replacement_is_scoped_to_company() {
    let mut store = memory_store();
    let apple = store.upsert_company("AAPL", "Apple Inc.", None).unwrap();
    let msft = store.upsert_company("MSFT", "Microsoft", None).unwrap();

    let pattern = |description: &str| DiscrepancyPattern {
        pattern_type: PatternType::ConsistentRoundingUp,
        description: description.to_string(),
        affected_quarters: vec!["Q1 2025".to_string()],
        severity: 0.8,
        evidence: vec!["4/5 favorable roundings".to_string()],
    };

    store.replace_patterns(apple.id, &[pattern("apple rounds up")]).unwrap();
    store.replace_patterns(msft.id, &[pattern("msft rounds up")]).unwrap();

    // Re-analysis replaces Apple's set wholesale
    store
        .replace_patterns(
            apple.id,
            &[
                pattern("apple still rounds up"),
                DiscrepancyPattern {
                    pattern_type: PatternType::SelectiveEmphasis,
                    description: "only positive growth".to_string(),
                    affected_quarters: vec!["Q1 2025".to_string(), "Q2 2025".to_string()],
                    severity: 0.6,
                    evidence: vec![],
                },
            ],
        )
        .unwrap();

    let apple_patterns = store.get_patterns(apple.id).unwrap();
    assert_eq!(apple_patterns.len(), 2);
    assert_eq!(apple_patterns[0].description, "apple still rounds up");

    // Microsoft's set untouched
    let msft_patterns = store.get_patterns(msft.id).unwrap();
    assert_eq!(msft_patterns.len(), 1);
    assert_eq!(msft_patterns[0].description, "msft rounds up");
}

#[test]
fn test_replace_with_empty_clears_patterns() {
    let mut store = memory_store();
    let company = store.upsert_company("AAPL", "Apple Inc.", None).unwrap();

    store
        .replace_patterns(
            company.id,
            &[DiscrepancyPattern {
                pattern_type: PatternType::MetricSwitching,
                description: "switches metrics".to_string(),
                affected_quarters: vec![],
                severity: 0.5,
                evidence: vec![],
            }],
        )
        .unwrap();
    assert_eq!(store.get_patterns(company.id).unwrap().len(), 1);

    store.replace_patterns(company.id, &[]).unwrap();
    assert!(store.get_patterns(company.id).unwrap().is_empty());
}

#[test]
fn test_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("claimlens.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.upsert_company("AAPL", "Apple Inc.", None).unwrap();
        sample_record(&mut store, 2025, 3, 94_930_000_000.0);
    }

    let store = SqliteStore::new(&path).unwrap();
    let company = store.get_company("AAPL").unwrap().unwrap();
    let record = store
        .get_record(company.id, FiscalPeriod::new(2025, 3))
        .unwrap()
        .unwrap();
    assert_eq!(record.revenue, Some(94_930_000_000.0));
}
