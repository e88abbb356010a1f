//! Claimlens Analyzer
//!
//! Cross-quarter discrepancy detection: given a company's claims grouped
//! by fiscal quarter, five independent detectors look for systematic
//! patterns of misleading communication (favorable rounding, metric
//! switching, declining accuracy, GAAP shifting, selective emphasis).
//!
//! Each detector is pure and order-insensitive and produces zero or one
//! [`claimlens_domain::DiscrepancyPattern`]. Analysis for one company
//! never reads or writes state for another; persistence of the detected
//! pattern set is the caller's concern.
//!
//! # Examples
//!
//! ```no_run
//! use claimlens_analyzer::{ClaimsByQuarter, DiscrepancyAnalyzer};
//! use claimlens_domain::CompanyId;
//!
//! let analyzer = DiscrepancyAnalyzer::new();
//! let claims: ClaimsByQuarter = Default::default();
//! let patterns = analyzer.analyze_company(CompanyId(1), &claims);
//! assert!(patterns.is_empty());
//! ```

#![warn(missing_docs)]

mod analyzer;
mod report;

pub use analyzer::{ClaimsByQuarter, DiscrepancyAnalyzer};
pub use report::{build_company_analysis, CompanyAnalysis, TopDiscrepancy};
