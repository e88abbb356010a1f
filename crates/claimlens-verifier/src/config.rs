//! Verifier configuration

use claimlens_domain::VerdictTolerances;
use serde::{Deserialize, Serialize};

/// Configuration for the verification engine
///
/// The three tolerances are relative-error floors for the verdict tiers.
/// Injected into [`crate::VerificationEngine::new`]; there is no
/// process-wide settings object.
///
/// # Examples
///
/// ```
/// use claimlens_verifier::VerifierConfig;
///
/// let config = VerifierConfig::default();
/// assert_eq!(config.tolerance_verified, 0.02);
///
/// let config = VerifierConfig::strict();
/// assert_eq!(config.tolerance_verified, 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Relative error accepted as VERIFIED (default 2%)
    pub tolerance_verified: f64,

    /// Relative error accepted as APPROXIMATELY_CORRECT (default 10%)
    pub tolerance_approx: f64,

    /// Relative error boundary between MISLEADING and INCORRECT (default 25%)
    pub tolerance_misleading: f64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            tolerance_verified: 0.02,
            tolerance_approx: 0.10,
            tolerance_misleading: 0.25,
        }
    }
}

impl VerifierConfig {
    /// Tighter tolerances for a stricter audit
    pub fn strict() -> Self {
        Self {
            tolerance_verified: 0.01,
            tolerance_approx: 0.05,
            tolerance_misleading: 0.15,
        }
    }

    /// Looser tolerances, forgiving of rounded figures
    pub fn lenient() -> Self {
        Self {
            tolerance_verified: 0.05,
            tolerance_approx: 0.15,
            tolerance_misleading: 0.35,
        }
    }

    /// The tolerances as the domain's verdict-tier struct
    pub fn tolerances(&self) -> VerdictTolerances {
        VerdictTolerances {
            verified: self.tolerance_verified,
            approx: self.tolerance_approx,
            misleading: self.tolerance_misleading,
        }
    }
}
