//! Financial record module - one quarter's statement snapshot
//!
//! Fields mirror what the upstream data provider returns for a single
//! (company, year, quarter): income statement, select cash-flow items,
//! and select balance-sheet items. Any field may be absent for a given
//! filing, so every field is optional.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::period::FiscalPeriod;

/// Database-assigned company identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub i64);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of statement fields a metric can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum StatementField {
    Revenue,
    CostOfRevenue,
    GrossProfit,
    OperatingIncome,
    OperatingExpenses,
    NetIncome,
    Eps,
    EpsDiluted,
    Ebitda,
    ResearchAndDevelopment,
    SellingGeneralAdmin,
    InterestExpense,
    IncomeTaxExpense,
    OperatingCashFlow,
    CapitalExpenditure,
    FreeCashFlow,
    TotalAssets,
    TotalLiabilities,
    TotalDebt,
    CashAndEquivalents,
    ShareholdersEquity,
}

impl StatementField {
    /// Get the field name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementField::Revenue => "revenue",
            StatementField::CostOfRevenue => "cost_of_revenue",
            StatementField::GrossProfit => "gross_profit",
            StatementField::OperatingIncome => "operating_income",
            StatementField::OperatingExpenses => "operating_expenses",
            StatementField::NetIncome => "net_income",
            StatementField::Eps => "eps",
            StatementField::EpsDiluted => "eps_diluted",
            StatementField::Ebitda => "ebitda",
            StatementField::ResearchAndDevelopment => "research_and_development",
            StatementField::SellingGeneralAdmin => "selling_general_admin",
            StatementField::InterestExpense => "interest_expense",
            StatementField::IncomeTaxExpense => "income_tax_expense",
            StatementField::OperatingCashFlow => "operating_cash_flow",
            StatementField::CapitalExpenditure => "capital_expenditure",
            StatementField::FreeCashFlow => "free_cash_flow",
            StatementField::TotalAssets => "total_assets",
            StatementField::TotalLiabilities => "total_liabilities",
            StatementField::TotalDebt => "total_debt",
            StatementField::CashAndEquivalents => "cash_and_equivalents",
            StatementField::ShareholdersEquity => "shareholders_equity",
        }
    }
}

/// One (company, year, quarter) financial-statement snapshot
///
/// Immutable once ingested; uniquely keyed by `(company_id, period)`.
/// Dollar amounts are raw dollars, per-share figures raw dollars per
/// share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    /// Company this snapshot belongs to
    pub company_id: CompanyId,

    /// Fiscal period of the snapshot
    pub period: FiscalPeriod,

    // ── Income Statement ─────────────────────────────────────────────
    /// Total revenue
    pub revenue: Option<f64>,
    /// Cost of goods sold
    pub cost_of_revenue: Option<f64>,
    /// Revenue minus cost of revenue
    pub gross_profit: Option<f64>,
    /// Operating profit (EBIT)
    pub operating_income: Option<f64>,
    /// Total operating expenses
    pub operating_expenses: Option<f64>,
    /// Net profit after tax
    pub net_income: Option<f64>,
    /// Basic earnings per share
    pub eps: Option<f64>,
    /// Diluted earnings per share
    pub eps_diluted: Option<f64>,
    /// Earnings before interest, tax, depreciation and amortization
    pub ebitda: Option<f64>,
    /// Research and development expense
    pub research_and_development: Option<f64>,
    /// Selling, general and administrative expense
    pub selling_general_admin: Option<f64>,
    /// Interest expense
    pub interest_expense: Option<f64>,
    /// Income tax expense
    pub income_tax_expense: Option<f64>,

    // ── Cash Flow Statement ──────────────────────────────────────────
    /// Cash from operations
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditures (stored as a negative outflow by the provider)
    pub capital_expenditure: Option<f64>,
    /// Operating cash flow minus CapEx
    pub free_cash_flow: Option<f64>,

    // ── Balance Sheet (select items) ─────────────────────────────────
    /// Total assets
    pub total_assets: Option<f64>,
    /// Total liabilities
    pub total_liabilities: Option<f64>,
    /// Total debt
    pub total_debt: Option<f64>,
    /// Cash and cash equivalents
    pub cash_and_equivalents: Option<f64>,
    /// Total shareholders' equity
    pub shareholders_equity: Option<f64>,
}

impl FinancialRecord {
    /// A snapshot with every statement field absent
    pub fn empty(company_id: CompanyId, period: FiscalPeriod) -> Self {
        Self {
            company_id,
            period,
            revenue: None,
            cost_of_revenue: None,
            gross_profit: None,
            operating_income: None,
            operating_expenses: None,
            net_income: None,
            eps: None,
            eps_diluted: None,
            ebitda: None,
            research_and_development: None,
            selling_general_admin: None,
            interest_expense: None,
            income_tax_expense: None,
            operating_cash_flow: None,
            capital_expenditure: None,
            free_cash_flow: None,
            total_assets: None,
            total_liabilities: None,
            total_debt: None,
            cash_and_equivalents: None,
            shareholders_equity: None,
        }
    }

    /// Look up a statement field by its closed-enum name
    pub fn field(&self, field: StatementField) -> Option<f64> {
        match field {
            StatementField::Revenue => self.revenue,
            StatementField::CostOfRevenue => self.cost_of_revenue,
            StatementField::GrossProfit => self.gross_profit,
            StatementField::OperatingIncome => self.operating_income,
            StatementField::OperatingExpenses => self.operating_expenses,
            StatementField::NetIncome => self.net_income,
            StatementField::Eps => self.eps,
            StatementField::EpsDiluted => self.eps_diluted,
            StatementField::Ebitda => self.ebitda,
            StatementField::ResearchAndDevelopment => self.research_and_development,
            StatementField::SellingGeneralAdmin => self.selling_general_admin,
            StatementField::InterestExpense => self.interest_expense,
            StatementField::IncomeTaxExpense => self.income_tax_expense,
            StatementField::OperatingCashFlow => self.operating_cash_flow,
            StatementField::CapitalExpenditure => self.capital_expenditure,
            StatementField::FreeCashFlow => self.free_cash_flow,
            StatementField::TotalAssets => self.total_assets,
            StatementField::TotalLiabilities => self.total_liabilities,
            StatementField::TotalDebt => self.total_debt,
            StatementField::CashAndEquivalents => self.cash_and_equivalents,
            StatementField::ShareholdersEquity => self.shareholders_equity,
        }
    }
}
