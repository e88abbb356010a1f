//! Claim module - the fundamental unit of the auditing system

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a claim based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability (claims are extracted in transcript order)
/// - 128-bit uniqueness
/// - No coordination required between extraction workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClaimId(u128);

impl ClaimId {
    /// Generate a new UUIDv7-based ClaimId
    ///
    /// # Examples
    ///
    /// ```
    /// use claimlens_domain::ClaimId;
    ///
    /// let id = ClaimId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a ClaimId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ClaimId from a UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use claimlens_domain::ClaimId;
    ///
    /// let id = ClaimId::new();
    /// let parsed = ClaimId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUID string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Database-assigned identifier of the transcript a claim was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TranscriptId(pub i64);

impl fmt::Display for TranscriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of quantity a claim states
///
/// The verification engine dispatches on this: growth and change claims
/// need a comparison period, margins and absolutes need only the current
/// quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    /// "$5B in revenue"
    Absolute,
    /// "grew 15%"
    GrowthRate,
    /// "operating margin of 30%"
    Margin,
    /// "debt-to-equity of 0.5"
    Ratio,
    /// "expanded 200 basis points"
    Change,
    /// "EPS of $2.50"
    PerShare,
}

impl MetricType {
    /// Get the metric type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Absolute => "absolute",
            MetricType::GrowthRate => "growth_rate",
            MetricType::Margin => "margin",
            MetricType::Ratio => "ratio",
            MetricType::Change => "change",
            MetricType::PerShare => "per_share",
        }
    }

    /// Parse a metric type from its string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "absolute" => Some(MetricType::Absolute),
            "growth_rate" => Some(MetricType::GrowthRate),
            "margin" => Some(MetricType::Margin),
            "ratio" => Some(MetricType::Ratio),
            "change" => Some(MetricType::Change),
            "per_share" => Some(MetricType::PerShare),
            _ => None,
        }
    }
}

impl std::str::FromStr for MetricType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid metric type: {}", s))
    }
}

/// Unit a claim's stated value is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Raw US dollars
    Usd,
    /// Millions of US dollars
    UsdMillions,
    /// Billions of US dollars
    UsdBillions,
    /// Percentage points
    Percent,
    /// Basis points (1/100th of a percentage point)
    BasisPoints,
    /// Dimensionless ratio
    Ratio,
}

impl Unit {
    /// Get the unit as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Usd => "usd",
            Unit::UsdMillions => "usd_millions",
            Unit::UsdBillions => "usd_billions",
            Unit::Percent => "percent",
            Unit::BasisPoints => "basis_points",
            Unit::Ratio => "ratio",
        }
    }

    /// Parse a unit from its string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "usd" => Some(Unit::Usd),
            "usd_millions" => Some(Unit::UsdMillions),
            "usd_billions" => Some(Unit::UsdBillions),
            "percent" => Some(Unit::Percent),
            "basis_points" => Some(Unit::BasisPoints),
            "ratio" => Some(Unit::Ratio),
            _ => None,
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid unit: {}", s))
    }
}

/// Comparison period a growth or change claim is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonPeriod {
    /// Same quarter, prior fiscal year
    YearOverYear,
    /// Immediately preceding quarter
    QuarterOverQuarter,
    /// Synonym for quarter-over-quarter used by some transcripts
    Sequential,
    /// Full fiscal year comparison
    FullYear,
    /// Non-standard basis stated in the claim text
    Custom,
    /// No comparison stated
    None,
}

impl ComparisonPeriod {
    /// Get the comparison period as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonPeriod::YearOverYear => "year_over_year",
            ComparisonPeriod::QuarterOverQuarter => "quarter_over_quarter",
            ComparisonPeriod::Sequential => "sequential",
            ComparisonPeriod::FullYear => "full_year",
            ComparisonPeriod::Custom => "custom",
            ComparisonPeriod::None => "none",
        }
    }

    /// Parse a comparison period from its string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "year_over_year" => Some(ComparisonPeriod::YearOverYear),
            "quarter_over_quarter" => Some(ComparisonPeriod::QuarterOverQuarter),
            "sequential" => Some(ComparisonPeriod::Sequential),
            "full_year" => Some(ComparisonPeriod::FullYear),
            "custom" => Some(ComparisonPeriod::Custom),
            "none" => Some(ComparisonPeriod::None),
            _ => None,
        }
    }
}

impl std::str::FromStr for ComparisonPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid comparison period: {}", s))
    }
}

/// A claim - one quantitative assertion from an earnings call
///
/// Claims are immutable once extracted; verification never mutates them,
/// it produces a separate [`crate::VerificationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,

    /// Transcript this claim was extracted from
    pub transcript_id: TranscriptId,

    /// Who made the claim ("Tim Cook, CEO")
    pub speaker: String,

    /// Speaker's role if known
    pub speaker_role: Option<String>,

    /// Verbatim claim sentence
    pub claim_text: String,

    /// Canonical metric name ("revenue", "gross_margin", ...)
    pub metric: String,

    /// What kind of quantity is stated
    pub metric_type: MetricType,

    /// The number the executive stated
    pub stated_value: f64,

    /// Unit of the stated value
    pub unit: Unit,

    /// Comparison basis for growth/change claims
    pub comparison_period: ComparisonPeriod,

    /// Free-text comparison basis ("Q3 2025 vs Q3 2024")
    pub comparison_basis: Option<String>,

    /// Whether the figure is a GAAP measure
    pub is_gaap: bool,

    /// Business segment the claim refers to, if not company-total
    pub segment: Option<String>,

    /// Extraction confidence in [0, 1]
    pub confidence: f64,

    /// Surrounding transcript text for context
    pub context_snippet: Option<String>,
}

impl Claim {
    /// Create a claim with the required fields; optional context defaults to empty
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ClaimId,
        transcript_id: TranscriptId,
        speaker: String,
        claim_text: String,
        metric: String,
        metric_type: MetricType,
        stated_value: f64,
        unit: Unit,
    ) -> Self {
        Self {
            id,
            transcript_id,
            speaker,
            speaker_role: None,
            claim_text,
            metric,
            metric_type,
            stated_value,
            unit,
            comparison_period: ComparisonPeriod::None,
            comparison_basis: None,
            is_gaap: true,
            segment: None,
            confidence: 0.8,
            context_snippet: None,
        }
    }
}
