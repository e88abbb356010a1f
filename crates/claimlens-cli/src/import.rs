//! JSON import document
//!
//! Shape of the file the `import` command consumes: companies with
//! their quarterly financial snapshots and transcripts carrying
//! already-extracted claims. Claim extraction itself happens upstream;
//! this is purely the hand-off format.

use claimlens_domain::metric::normalize_metric_name;
use claimlens_domain::{
    Claim, ClaimId, CompanyId, ComparisonPeriod, FinancialRecord, FiscalPeriod,
    MetricType, TranscriptId, Unit,
};
use serde::Deserialize;

/// Top-level import document
#[derive(Debug, Deserialize)]
pub struct ImportDocument {
    /// Companies to import
    pub companies: Vec<CompanyImport>,
}

/// One company with its data
#[derive(Debug, Deserialize)]
pub struct CompanyImport {
    /// Ticker symbol
    pub ticker: String,
    /// Company name
    pub name: String,
    /// Sector, if known
    #[serde(default)]
    pub sector: Option<String>,
    /// Quarterly financial snapshots
    #[serde(default)]
    pub financials: Vec<FinancialImport>,
    /// Earnings-call transcripts with extracted claims
    #[serde(default)]
    pub transcripts: Vec<TranscriptImport>,
}

/// One quarterly financial snapshot
#[derive(Debug, Default, Deserialize)]
pub struct FinancialImport {
    /// Fiscal year
    pub year: i32,
    /// Fiscal quarter 1-4
    pub quarter: u8,

    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub cost_of_revenue: Option<f64>,
    #[serde(default)]
    pub gross_profit: Option<f64>,
    #[serde(default)]
    pub operating_income: Option<f64>,
    #[serde(default)]
    pub operating_expenses: Option<f64>,
    #[serde(default)]
    pub net_income: Option<f64>,
    #[serde(default)]
    pub eps: Option<f64>,
    #[serde(default)]
    pub eps_diluted: Option<f64>,
    #[serde(default)]
    pub ebitda: Option<f64>,
    #[serde(default)]
    pub research_and_development: Option<f64>,
    #[serde(default)]
    pub selling_general_admin: Option<f64>,
    #[serde(default)]
    pub interest_expense: Option<f64>,
    #[serde(default)]
    pub income_tax_expense: Option<f64>,
    #[serde(default)]
    pub operating_cash_flow: Option<f64>,
    #[serde(default)]
    pub capital_expenditure: Option<f64>,
    #[serde(default)]
    pub free_cash_flow: Option<f64>,
    #[serde(default)]
    pub total_assets: Option<f64>,
    #[serde(default)]
    pub total_liabilities: Option<f64>,
    #[serde(default)]
    pub total_debt: Option<f64>,
    #[serde(default)]
    pub cash_and_equivalents: Option<f64>,
    #[serde(default)]
    pub shareholders_equity: Option<f64>,
}

impl FinancialImport {
    /// Convert to a domain record for the given company
    pub fn into_record(self, company: CompanyId) -> FinancialRecord {
        let mut record =
            FinancialRecord::empty(company, FiscalPeriod::new(self.year, self.quarter));
        record.revenue = self.revenue;
        record.cost_of_revenue = self.cost_of_revenue;
        record.gross_profit = self.gross_profit;
        record.operating_income = self.operating_income;
        record.operating_expenses = self.operating_expenses;
        record.net_income = self.net_income;
        record.eps = self.eps;
        record.eps_diluted = self.eps_diluted;
        record.ebitda = self.ebitda;
        record.research_and_development = self.research_and_development;
        record.selling_general_admin = self.selling_general_admin;
        record.interest_expense = self.interest_expense;
        record.income_tax_expense = self.income_tax_expense;
        record.operating_cash_flow = self.operating_cash_flow;
        record.capital_expenditure = self.capital_expenditure;
        record.free_cash_flow = self.free_cash_flow;
        record.total_assets = self.total_assets;
        record.total_liabilities = self.total_liabilities;
        record.total_debt = self.total_debt;
        record.cash_and_equivalents = self.cash_and_equivalents;
        record.shareholders_equity = self.shareholders_equity;
        record
    }
}

/// One transcript with its extracted claims
#[derive(Debug, Deserialize)]
pub struct TranscriptImport {
    /// Fiscal year of the call
    pub year: i32,
    /// Fiscal quarter of the call
    pub quarter: u8,
    /// Call date (ISO), if known
    #[serde(default)]
    pub call_date: Option<String>,
    /// Raw transcript text
    #[serde(default)]
    pub full_text: String,
    /// Claims extracted from the call
    #[serde(default)]
    pub claims: Vec<ClaimImport>,
}

/// One extracted claim
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimImport {
    /// Who made the claim
    pub speaker: String,
    /// Speaker's role, if known
    #[serde(default)]
    pub speaker_role: Option<String>,
    /// Verbatim claim sentence
    pub claim_text: String,
    /// Metric name as spoken (aliases are normalized on import)
    pub metric: String,
    /// Kind of quantity stated
    pub metric_type: MetricType,
    /// The stated number
    pub stated_value: f64,
    /// Unit of the stated value
    pub unit: Unit,
    /// Comparison basis
    #[serde(default)]
    pub comparison_period: Option<ComparisonPeriod>,
    /// Free-text comparison basis
    #[serde(default)]
    pub comparison_basis: Option<String>,
    /// Whether the figure is GAAP
    #[serde(default = "default_is_gaap")]
    pub is_gaap: bool,
    /// Business segment, if not company-total
    #[serde(default)]
    pub segment: Option<String>,
    /// Extraction confidence
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Surrounding transcript text
    #[serde(default)]
    pub context_snippet: Option<String>,
}

fn default_is_gaap() -> bool {
    true
}

fn default_confidence() -> f64 {
    0.8
}

impl ClaimImport {
    /// Convert to a domain claim under the given transcript
    ///
    /// Assigns a fresh id and normalizes the metric name ("Total
    /// Revenue" becomes "revenue").
    pub fn into_claim(self, transcript_id: TranscriptId) -> Claim {
        Claim {
            id: ClaimId::new(),
            transcript_id,
            speaker: self.speaker,
            speaker_role: self.speaker_role,
            claim_text: self.claim_text,
            metric: normalize_metric_name(&self.metric),
            metric_type: self.metric_type,
            stated_value: self.stated_value,
            unit: self.unit,
            comparison_period: self.comparison_period.unwrap_or(ComparisonPeriod::None),
            comparison_basis: self.comparison_basis,
            is_gaap: self.is_gaap,
            segment: self.segment,
            confidence: self.confidence,
            context_snippet: self.context_snippet,
        }
    }
}
