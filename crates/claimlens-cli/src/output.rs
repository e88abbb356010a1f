//! Output formatting for the CLI.

use claimlens_analyzer::CompanyAnalysis;
use claimlens_domain::{Verdict, VerdictCounts};
use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

use crate::cli::CliFormat;
use crate::error::Result;

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self { format, color_enabled }
    }

    /// Style a success message.
    pub fn success(&self, message: &str) -> String {
        if self.color_enabled {
            message.green().to_string()
        } else {
            message.to_string()
        }
    }

    /// Style a warning message.
    pub fn warning(&self, message: &str) -> String {
        if self.color_enabled {
            message.yellow().to_string()
        } else {
            message.to_string()
        }
    }

    /// Style an error message.
    pub fn error(&self, message: &str) -> String {
        if self.color_enabled {
            message.red().to_string()
        } else {
            message.to_string()
        }
    }

    /// Render a verdict with its severity color.
    fn verdict_cell(&self, verdict: Verdict) -> String {
        let text = verdict.as_str();
        if !self.color_enabled {
            return text.to_string();
        }
        match verdict {
            Verdict::Verified => text.green().to_string(),
            Verdict::ApproximatelyCorrect => text.cyan().to_string(),
            Verdict::Misleading => text.yellow().to_string(),
            Verdict::Incorrect => text.red().to_string(),
            Verdict::Unverifiable => text.dimmed().to_string(),
        }
    }

    /// Format the verdict summary printed after a verify run.
    pub fn format_verify_summary(&self, counts: &VerdictCounts, errors: usize) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Verdict", "Count"]);
        builder.push_record([
            self.verdict_cell(Verdict::Verified),
            counts.verified.to_string(),
        ]);
        builder.push_record([
            self.verdict_cell(Verdict::ApproximatelyCorrect),
            counts.approximately_correct.to_string(),
        ]);
        builder.push_record([
            self.verdict_cell(Verdict::Misleading),
            counts.misleading.to_string(),
        ]);
        builder.push_record([
            self.verdict_cell(Verdict::Incorrect),
            counts.incorrect.to_string(),
        ]);
        builder.push_record([
            self.verdict_cell(Verdict::Unverifiable),
            counts.unverifiable.to_string(),
        ]);
        if errors > 0 {
            builder.push_record([self.error("errors"), errors.to_string()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a full company analysis report.
    pub fn format_analysis(&self, analysis: &CompanyAnalysis) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(analysis)?),
            CliFormat::Table => Ok(self.format_analysis_table(analysis)),
        }
    }

    fn format_analysis_table(&self, analysis: &CompanyAnalysis) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "{} ({})\n",
            if self.color_enabled {
                analysis.name.bold().to_string()
            } else {
                analysis.name.clone()
            },
            analysis.ticker
        ));
        out.push_str(&format!(
            "Quarters analyzed: {}\n",
            analysis.quarters_analyzed.join(", ")
        ));
        out.push_str(&format!(
            "Claims: {}  Accuracy rate: {:.1}%  Trust score: {:.1}/100\n\n",
            analysis.total_claims,
            analysis.overall_accuracy_rate * 100.0,
            analysis.overall_trust_score
        ));

        out.push_str(&self.format_verify_summary(&analysis.verdicts, 0));
        out.push('\n');

        if !analysis.patterns.is_empty() {
            out.push('\n');
            out.push_str(&self.warning("Discrepancy patterns:"));
            out.push('\n');
            let mut builder = Builder::default();
            builder.push_record(["Pattern", "Severity", "Quarters", "Description"]);
            for pattern in &analysis.patterns {
                builder.push_record([
                    pattern.pattern_type.as_str().to_string(),
                    format!("{:.2}", pattern.severity),
                    pattern.affected_quarters.join(", "),
                    pattern.description.clone(),
                ]);
            }
            let mut table = builder.build();
            table.with(Style::rounded());
            out.push_str(&table.to_string());
            out.push('\n');
        }

        if !analysis.top_discrepancies.is_empty() {
            out.push('\n');
            out.push_str(&self.warning("Top discrepancies:"));
            out.push('\n');
            let mut builder = Builder::default();
            builder.push_record(["Metric", "Stated", "Actual", "Verdict", "Speaker"]);
            for d in &analysis.top_discrepancies {
                builder.push_record([
                    d.metric.clone(),
                    format!("{:.2}", d.stated_value),
                    d.actual_value
                        .map(|v| format!("{:.2}", v))
                        .unwrap_or_else(|| "-".to_string()),
                    self.verdict_cell(d.verdict),
                    d.speaker.clone(),
                ]);
            }
            let mut table = builder.build();
            table.with(Style::rounded());
            out.push_str(&table.to_string());
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimlens_analyzer::build_company_analysis;
    use claimlens_domain::CompanyId;

    #[test]
    fn test_summary_contains_counts() {
        let formatter = Formatter::new(CliFormat::Table, false);
        let counts = VerdictCounts { verified: 3, misleading: 1, ..Default::default() };
        let table = formatter.format_verify_summary(&counts, 0);
        assert!(table.contains("verified"));
        assert!(table.contains('3'));
        assert!(!table.contains("errors"));
    }

    #[test]
    fn test_summary_shows_errors_when_present() {
        let formatter = Formatter::new(CliFormat::Table, false);
        let table = formatter.format_verify_summary(&VerdictCounts::default(), 2);
        assert!(table.contains("errors"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let formatter = Formatter::new(CliFormat::Json, false);
        let analysis = build_company_analysis(
            CompanyId(1),
            "AAPL",
            "Apple Inc.",
            &Default::default(),
            Vec::new(),
        );
        let json = formatter.format_analysis(&analysis).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["ticker"], "AAPL");
    }
}
