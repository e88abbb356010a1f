//! Metric name registry
//!
//! Single source of truth for canonical metric names, the alias table
//! used to normalize what executives actually say ("top line", "FCF"),
//! and per-metric metadata.

use crate::claim::Unit;

/// Spoken-form aliases mapped to canonical metric names
///
/// Lookup is case-insensitive on the alias side.
const METRIC_ALIASES: &[(&str, &str)] = &[
    // Revenue
    ("total revenue", "revenue"),
    ("net revenue", "revenue"),
    ("net revenues", "revenue"),
    ("sales", "revenue"),
    ("net sales", "revenue"),
    ("top line", "revenue"),
    // Earnings
    ("earnings per share", "eps"),
    ("diluted eps", "eps_diluted"),
    ("diluted earnings per share", "eps_diluted"),
    ("basic eps", "eps"),
    // Operating
    ("op income", "operating_income"),
    ("operating profit", "operating_income"),
    ("operating loss", "operating_income"),
    ("op margin", "operating_margin"),
    // Margins
    ("gross margin", "gross_margin"),
    ("gross profit margin", "gross_margin"),
    ("net margin", "net_margin"),
    ("profit margin", "net_margin"),
    // Cash flow
    ("fcf", "free_cash_flow"),
    // CapEx
    ("capex", "capital_expenditure"),
    ("capital expenditures", "capital_expenditure"),
    // R&D
    ("r&d", "research_and_development"),
    ("research and development", "research_and_development"),
    // SG&A
    ("sg&a", "selling_general_admin"),
    ("sga", "selling_general_admin"),
    // Balance sheet
    ("cash", "cash_and_equivalents"),
    ("cash and cash equivalents", "cash_and_equivalents"),
    ("debt", "total_debt"),
    ("long-term debt", "total_debt"),
    ("stockholders equity", "shareholders_equity"),
    ("shareholders equity", "shareholders_equity"),
    ("total stockholders equity", "shareholders_equity"),
];

/// Whether a metric is read straight from a statement or computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricCategory {
    /// Read directly from financial statements
    Direct,
    /// Computed from other metrics (margins)
    Derived,
    /// Per-share figure
    PerShare,
}

/// Metadata about a financial metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDefinition {
    /// Canonical name used throughout the system
    pub canonical_name: &'static str,
    /// Direct, derived, or per-share
    pub category: MetricCategory,
    /// Human-readable description
    pub description: &'static str,
    /// Unit the metric is usually stated in
    pub typical_unit: Unit,
}

/// Registry of known metrics
const METRICS: &[MetricDefinition] = &[
    // ── Direct metrics (from financial statements) ────────────────────
    MetricDefinition {
        canonical_name: "revenue",
        category: MetricCategory::Direct,
        description: "Total revenue from income statement",
        typical_unit: Unit::UsdBillions,
    },
    MetricDefinition {
        canonical_name: "cost_of_revenue",
        category: MetricCategory::Direct,
        description: "Cost of goods sold",
        typical_unit: Unit::UsdBillions,
    },
    MetricDefinition {
        canonical_name: "gross_profit",
        category: MetricCategory::Direct,
        description: "Revenue minus cost of revenue",
        typical_unit: Unit::UsdBillions,
    },
    MetricDefinition {
        canonical_name: "operating_income",
        category: MetricCategory::Direct,
        description: "Operating profit (EBIT)",
        typical_unit: Unit::UsdBillions,
    },
    MetricDefinition {
        canonical_name: "net_income",
        category: MetricCategory::Direct,
        description: "Net profit after tax",
        typical_unit: Unit::UsdBillions,
    },
    MetricDefinition {
        canonical_name: "eps",
        category: MetricCategory::PerShare,
        description: "Basic earnings per share",
        typical_unit: Unit::Usd,
    },
    MetricDefinition {
        canonical_name: "eps_diluted",
        category: MetricCategory::PerShare,
        description: "Diluted earnings per share",
        typical_unit: Unit::Usd,
    },
    MetricDefinition {
        canonical_name: "operating_cash_flow",
        category: MetricCategory::Direct,
        description: "Cash from operations",
        typical_unit: Unit::UsdBillions,
    },
    MetricDefinition {
        canonical_name: "free_cash_flow",
        category: MetricCategory::Direct,
        description: "Operating cash flow minus CapEx",
        typical_unit: Unit::UsdBillions,
    },
    MetricDefinition {
        canonical_name: "capital_expenditure",
        category: MetricCategory::Direct,
        description: "Capital investments (CapEx)",
        typical_unit: Unit::UsdBillions,
    },
    // ── Derived metrics (calculated from other metrics) ───────────────
    MetricDefinition {
        canonical_name: "gross_margin",
        category: MetricCategory::Derived,
        description: "Gross profit / revenue * 100",
        typical_unit: Unit::Percent,
    },
    MetricDefinition {
        canonical_name: "operating_margin",
        category: MetricCategory::Derived,
        description: "Operating income / revenue * 100",
        typical_unit: Unit::Percent,
    },
    MetricDefinition {
        canonical_name: "net_margin",
        category: MetricCategory::Derived,
        description: "Net income / revenue * 100",
        typical_unit: Unit::Percent,
    },
];

/// Normalize a spoken metric name to its canonical form
///
/// Unknown names pass through lowercased so downstream resolution can
/// still reject them.
///
/// # Examples
///
/// ```
/// use claimlens_domain::metric::normalize_metric_name;
///
/// assert_eq!(normalize_metric_name("Total Revenue"), "revenue");
/// assert_eq!(normalize_metric_name("FCF"), "free_cash_flow");
/// assert_eq!(normalize_metric_name("subscriber_count"), "subscriber_count");
/// ```
pub fn normalize_metric_name(raw: &str) -> String {
    let normalized = raw.to_lowercase().trim().to_string();
    for (alias, canonical) in METRIC_ALIASES {
        if *alias == normalized {
            return (*canonical).to_string();
        }
    }
    normalized
}

/// Look up metadata for a canonical metric name
pub fn get_metric_definition(metric: &str) -> Option<&'static MetricDefinition> {
    METRICS.iter().find(|d| d.canonical_name == metric)
}

/// Whether a metric is computed rather than read from a statement
pub fn is_derived_metric(metric: &str) -> bool {
    get_metric_definition(metric)
        .map(|d| d.category == MetricCategory::Derived)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_normalization() {
        assert_eq!(normalize_metric_name("Total Revenue"), "revenue");
        assert_eq!(normalize_metric_name("top line"), "revenue");
        assert_eq!(normalize_metric_name("CapEx"), "capital_expenditure");
        assert_eq!(normalize_metric_name("SG&A"), "selling_general_admin");
        assert_eq!(normalize_metric_name("Diluted EPS"), "eps_diluted");
    }

    #[test]
    fn test_unknown_name_passes_through_lowercased() {
        assert_eq!(normalize_metric_name("Subscriber_Count"), "subscriber_count");
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(normalize_metric_name("  net sales  "), "revenue");
    }

    #[test]
    fn test_derived_detection() {
        assert!(is_derived_metric("gross_margin"));
        assert!(is_derived_metric("operating_margin"));
        assert!(is_derived_metric("net_margin"));
        assert!(!is_derived_metric("revenue"));
        assert!(!is_derived_metric("unknown_metric"));
    }

    #[test]
    fn test_definition_lookup() {
        let defn = get_metric_definition("revenue").unwrap();
        assert_eq!(defn.typical_unit, crate::Unit::UsdBillions);
        assert_eq!(defn.category, MetricCategory::Direct);
        assert!(get_metric_definition("nonexistent").is_none());
    }

    #[test]
    fn test_every_alias_targets_a_known_or_derived_name() {
        // Alias targets should be canonical names the mapper can handle
        for (_, canonical) in METRIC_ALIASES {
            assert!(
                canonical.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "alias target {} is not canonical",
                canonical
            );
        }
    }
}
