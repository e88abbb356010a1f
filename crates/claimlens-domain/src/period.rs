//! Fiscal period module - (year, quarter) keys for financial data
//!
//! Quarter labels like "Q3 2025" are display strings only; ordering and
//! comparison-period arithmetic always go through the structured key so
//! that chronological sorting never depends on string formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One fiscal quarter of one fiscal year
///
/// Orders by `(year, quarter)`, so a `BTreeMap<FiscalPeriod, _>` iterates
/// chronologically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FiscalPeriod {
    /// Fiscal year
    pub year: i32,
    /// Fiscal quarter, 1 through 4
    pub quarter: u8,
}

impl FiscalPeriod {
    /// Create a fiscal period
    ///
    /// # Panics
    /// Panics if quarter is not in 1..=4
    pub fn new(year: i32, quarter: u8) -> Self {
        assert!((1..=4).contains(&quarter), "Quarter must be 1..=4");
        Self { year, quarter }
    }

    /// Display label, e.g. "Q3 2025"
    pub fn label(&self) -> String {
        format!("Q{} {}", self.quarter, self.year)
    }

    /// Parse a label of the form "Q3 2025"
    pub fn parse_label(s: &str) -> Option<Self> {
        let rest = s.strip_prefix('Q')?;
        let (q, y) = rest.split_once(' ')?;
        let quarter: u8 = q.parse().ok()?;
        if !(1..=4).contains(&quarter) {
            return None;
        }
        let year: i32 = y.parse().ok()?;
        Some(Self { year, quarter })
    }

    /// The immediately preceding quarter, wrapping Q1 to Q4 of the prior year
    ///
    /// # Examples
    ///
    /// ```
    /// use claimlens_domain::FiscalPeriod;
    ///
    /// assert_eq!(FiscalPeriod::new(2025, 1).prior_quarter(), FiscalPeriod::new(2024, 4));
    /// assert_eq!(FiscalPeriod::new(2025, 3).prior_quarter(), FiscalPeriod::new(2025, 2));
    /// ```
    pub fn prior_quarter(&self) -> Self {
        if self.quarter > 1 {
            Self { year: self.year, quarter: self.quarter - 1 }
        } else {
            Self { year: self.year - 1, quarter: 4 }
        }
    }

    /// The same quarter one fiscal year earlier
    pub fn prior_year(&self) -> Self {
        Self { year: self.year - 1, quarter: self.quarter }
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{} {}", self.quarter, self.year)
    }
}
