//! Claimlens Verifier
//!
//! Checks a single extracted claim against structured financial data and
//! produces a [`claimlens_domain::VerificationResult`].
//!
//! Pipeline per claim:
//! 1. Check the metric is resolvable
//! 2. Fetch the relevant financial data (current + comparison period)
//! 3. Compute the actual value (growth rate, margin, absolute, per-share)
//! 4. Normalize units so stated and actual are comparable
//! 5. Score accuracy
//! 6. Detect misleading framing
//! 7. Assign a verdict
//!
//! `verify` never fails for a single malformed claim: every failure mode
//! resolves to an UNVERIFIABLE result, so one claim can never abort a
//! batch.
//!
//! # Examples
//!
//! ```no_run
//! use claimlens_verifier::{MetricMapper, VerificationEngine, VerifierConfig};
//!
//! let engine = VerificationEngine::new(MetricMapper::new(), VerifierConfig::default());
//! // let result = engine.verify(&store, &claim, company, period);
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod mapper;

pub use config::VerifierConfig;
pub use engine::VerificationEngine;
pub use error::VerifyFailure;
pub use mapper::MetricMapper;
