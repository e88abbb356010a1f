//! Discrepancy patterns - systematic cross-quarter communication biases

use serde::{Deserialize, Serialize};

/// Kind of cross-quarter pattern a detector can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Inexact claims overwhelmingly round in a favorable direction
    ConsistentRoundingUp,
    /// The most-emphasised metric changes quarter to quarter
    MetricSwitching,
    /// Average claim accuracy declines over time
    IncreasingInaccuracy,
    /// The GAAP vs non-GAAP mix shifts significantly
    GaapNongaapShifting,
    /// Negative growth is almost never mentioned
    SelectiveEmphasis,
}

impl PatternType {
    /// Get the pattern type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::ConsistentRoundingUp => "consistent_rounding_up",
            PatternType::MetricSwitching => "metric_switching",
            PatternType::IncreasingInaccuracy => "increasing_inaccuracy",
            PatternType::GaapNongaapShifting => "gaap_nongaap_shifting",
            PatternType::SelectiveEmphasis => "selective_emphasis",
        }
    }

    /// Parse a pattern type from its string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "consistent_rounding_up" => Some(PatternType::ConsistentRoundingUp),
            "metric_switching" => Some(PatternType::MetricSwitching),
            "increasing_inaccuracy" => Some(PatternType::IncreasingInaccuracy),
            "gaap_nongaap_shifting" => Some(PatternType::GaapNongaapShifting),
            "selective_emphasis" => Some(PatternType::SelectiveEmphasis),
            _ => None,
        }
    }
}

impl std::str::FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid pattern type: {}", s))
    }
}

/// One detected cross-quarter pattern for a company
///
/// A company's pattern set is regenerated wholesale on each analysis
/// run; individual patterns are never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscrepancyPattern {
    /// What kind of bias was detected
    pub pattern_type: PatternType,

    /// Free-text description embedding the computed statistic
    pub description: String,

    /// Quarter labels implicated, in chronological order
    pub affected_quarters: Vec<String>,

    /// Severity in [0, 1]
    pub severity: f64,

    /// Raw counts / ratios backing the detection
    pub evidence: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_type_round_trip() {
        for pt in [
            PatternType::ConsistentRoundingUp,
            PatternType::MetricSwitching,
            PatternType::IncreasingInaccuracy,
            PatternType::GaapNongaapShifting,
            PatternType::SelectiveEmphasis,
        ] {
            assert_eq!(PatternType::parse(pt.as_str()), Some(pt));
        }
        assert_eq!(PatternType::parse("bogus"), None);
    }
}
