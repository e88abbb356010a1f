//! Trait definitions for the persistence boundary
//!
//! These traits define the seams between domain logic and
//! infrastructure. Implementations live in other crates
//! (claimlens-store); tests substitute in-memory fakes.

use crate::claim::ComparisonPeriod;
use crate::financials::{CompanyId, FinancialRecord};
use crate::pattern::DiscrepancyPattern;
use crate::period::FiscalPeriod;

/// Read-only access to financial-statement snapshots
///
/// The verification engine only ever reads through this trait; a worker
/// verifying claims needs nothing more than its own handle.
pub trait FinancialRecordStore {
    /// Error type for store operations
    type Error;

    /// Fetch the snapshot for one (company, period), if ingested
    fn get_record(
        &self,
        company: CompanyId,
        period: FiscalPeriod,
    ) -> Result<Option<FinancialRecord>, Self::Error>;

    /// Fetch the (current, comparison) pair for a growth/change claim
    ///
    /// Year-over-year compares against the same quarter of the prior
    /// year; quarter-over-quarter and sequential against the
    /// immediately preceding quarter (Q1 wraps to Q4 of the prior
    /// year). Other comparison kinds have no comparison record. Either
    /// side may be `None` when the data was never ingested.
    fn get_comparison_pair(
        &self,
        company: CompanyId,
        period: FiscalPeriod,
        comparison: ComparisonPeriod,
    ) -> Result<(Option<FinancialRecord>, Option<FinancialRecord>), Self::Error> {
        let current = self.get_record(company, period)?;
        let comparison_period = match comparison {
            ComparisonPeriod::YearOverYear => Some(period.prior_year()),
            ComparisonPeriod::QuarterOverQuarter | ComparisonPeriod::Sequential => {
                Some(period.prior_quarter())
            }
            _ => None,
        };
        let prior = match comparison_period {
            Some(p) => self.get_record(company, p)?,
            None => None,
        };
        Ok((current, prior))
    }
}

/// Persistence for a company's detected pattern set
///
/// `replace_patterns` must swap the entire set atomically
/// (delete-then-insert inside one transaction) so no reader observes a
/// partially-replaced set, and a failed swap must leave the previous
/// set authoritative.
pub trait PatternStore {
    /// Error type for store operations
    type Error;

    /// Atomically replace the company's stored patterns with `patterns`
    fn replace_patterns(
        &mut self,
        company: CompanyId,
        patterns: &[DiscrepancyPattern],
    ) -> Result<(), Self::Error>;

    /// Fetch the company's current pattern set
    fn get_patterns(
        &self,
        company: CompanyId,
    ) -> Result<Vec<DiscrepancyPattern>, Self::Error>;
}
