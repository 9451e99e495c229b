//! Output reporters for audit reports
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors and emoji
//! - `json` - Machine-readable JSON
//! - `markdown` - GitHub-flavored Markdown

mod json;
mod markdown;
mod text;

use crate::models::AuditReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render an audit report in the specified format
pub fn report(report: &AuditReport, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(report, fmt)
}

/// Render an audit report using an OutputFormat enum
pub fn report_with_format(report: &AuditReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => markdown::render(report),
    }
}

/// Get the recommended file extension for a format
#[allow(dead_code)] // Public API helper
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Create a small but realistic AuditReport for reporter tests: one
    /// evaluated category, one synthesized, recommendations from both.
    pub(crate) fn test_report() -> AuditReport {
        use crate::error::ProbeFailure;
        use crate::fallback::FallbackSynthesizer;
        use crate::models::{
            Category, Check, CheckOutcome, DataQuality,
        };
        use crate::recommend::RecommendationEngine;
        use crate::registry::CheckRegistry;
        use crate::scoring::{overall_summary, BandTable, CategoryEvaluator};
        use std::collections::BTreeMap;

        let registry = CheckRegistry::new();
        let bands = BandTable::coarse();

        let technical = CategoryEvaluator::new(&bands).evaluate(
            Category::Technical,
            registry.hydrate(
                Category::Technical,
                vec![
                    Check::new("https", 10.0, true, CheckOutcome::Passed),
                    Check::new("sitemap", 5.0, false, CheckOutcome::Failed),
                ],
            ),
        );
        let security = FallbackSynthesizer::new(&registry, &bands)
            .synthesize(Category::Security, ProbeFailure::Timeout);

        let mut categories = BTreeMap::new();
        categories.insert(Category::Technical, technical);
        categories.insert(Category::Security, security);

        let ordered: Vec<_> = categories.values().collect();
        let recommendations = RecommendationEngine::recommend(&ordered);
        let data_quality = DataQuality::from_results(&categories);
        let overall_score = categories
            .values()
            .map(|r| r.normalized_score)
            .sum::<f64>()
            / categories.len() as f64;

        AuditReport {
            target: "https://example.com".to_string(),
            timestamp: chrono::Utc::now(),
            overall_grade: bands.grade(overall_score).to_string(),
            summary: overall_summary(overall_score),
            overall_score,
            categories,
            recommendations,
            data_quality,
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str("md").unwrap(),
            OutputFormat::Markdown
        );
        assert!(OutputFormat::from_str("sarif").is_err());
    }

    #[test]
    fn test_render_dispatch() {
        let r = test_report();
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Markdown] {
            let rendered = report_with_format(&r, format).expect("render");
            assert!(!rendered.is_empty());
        }
    }
}
