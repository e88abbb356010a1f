//! Maps canonical metric names to structured financial data fields
//!
//! This is the bridge between what an executive *says* and what column
//! of the financial statements to look at.

use claimlens_domain::math::margin;
use claimlens_domain::{FinancialRecord, StatementField};

/// Canonical metric name → statement field (direct lookup)
const DIRECT: &[(&str, StatementField)] = &[
    ("revenue", StatementField::Revenue),
    ("cost_of_revenue", StatementField::CostOfRevenue),
    ("gross_profit", StatementField::GrossProfit),
    ("operating_income", StatementField::OperatingIncome),
    ("operating_expenses", StatementField::OperatingExpenses),
    ("net_income", StatementField::NetIncome),
    ("eps", StatementField::Eps),
    ("eps_diluted", StatementField::EpsDiluted),
    ("ebitda", StatementField::Ebitda),
    ("research_and_development", StatementField::ResearchAndDevelopment),
    ("selling_general_admin", StatementField::SellingGeneralAdmin),
    ("interest_expense", StatementField::InterestExpense),
    ("income_tax_expense", StatementField::IncomeTaxExpense),
    ("operating_cash_flow", StatementField::OperatingCashFlow),
    ("capital_expenditure", StatementField::CapitalExpenditure),
    ("free_cash_flow", StatementField::FreeCashFlow),
    ("total_assets", StatementField::TotalAssets),
    ("total_liabilities", StatementField::TotalLiabilities),
    ("total_debt", StatementField::TotalDebt),
    ("cash_and_equivalents", StatementField::CashAndEquivalents),
    ("shareholders_equity", StatementField::ShareholdersEquity),
];

/// Metrics the data provider stores as negative cash outflows but
/// executives always state as positive magnitudes
const SIGN_NORMALIZE: &[&str] = &["capital_expenditure"];

/// Canonical metric name → (numerator field, denominator field); the
/// resolved value is a percentage
const DERIVED: &[(&str, StatementField, StatementField)] = &[
    ("gross_margin", StatementField::GrossProfit, StatementField::Revenue),
    ("operating_margin", StatementField::OperatingIncome, StatementField::Revenue),
    ("net_margin", StatementField::NetIncome, StatementField::Revenue),
];

/// Resolves a claim's metric name to an actual value from financial data
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricMapper;

impl MetricMapper {
    /// Create a metric mapper
    pub fn new() -> Self {
        Self
    }

    /// Whether the metric appears in the direct or derived tables
    pub fn can_resolve(&self, metric: &str) -> bool {
        DIRECT.iter().any(|(name, _)| *name == metric)
            || DERIVED.iter().any(|(name, _, _)| *name == metric)
    }

    /// Whether the metric is one of the derived ratio metrics
    pub fn is_derived(&self, metric: &str) -> bool {
        DERIVED.iter().any(|(name, _, _)| *name == metric)
    }

    /// Return the actual numeric value for `metric` from `record`
    ///
    /// For derived metrics (margins) the result is a percentage
    /// (e.g. 46.2). Returns `None` when the required fields are missing,
    /// when a derived metric's denominator is zero, or when the metric
    /// is unknown — never an error.
    pub fn resolve(&self, metric: &str, record: &FinancialRecord) -> Option<f64> {
        if let Some((_, field)) = DIRECT.iter().find(|(name, _)| *name == metric) {
            let value = record.field(*field)?;
            if SIGN_NORMALIZE.contains(&metric) {
                return Some(value.abs());
            }
            return Some(value);
        }

        if let Some((_, num_field, den_field)) =
            DERIVED.iter().find(|(name, _, _)| *name == metric)
        {
            let num = record.field(*num_field)?;
            let den = record.field(*den_field)?;
            return margin(num, den);
        }

        None
    }
}
