//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Client-facing audit summaries
//! - Pull request or ticket comments
//! - Documentation and wikis

use crate::models::{AuditReport, RecommendationPriority};
use anyhow::Result;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &AuditReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');
    md.push_str(&render_category_table(report));
    md.push('\n');
    md.push_str(&render_findings(report));
    md.push_str(&render_recommendations(report));
    md.push_str(&render_footer(report));

    Ok(md)
}

fn grade_emoji(grade: &str) -> &'static str {
    match grade.chars().next() {
        Some('A') => "🏆",
        Some('B') => "⭐",
        Some('C') => "⚠️",
        Some('D') => "❌",
        Some('F') => "💀",
        _ => "❓",
    }
}

fn render_header(report: &AuditReport) -> String {
    format!(
        "# {} Site Audit Report — {}\n\n**Grade: {}** | **Score: {:.1}/100**\n\n{}\n",
        grade_emoji(&report.overall_grade),
        report.target,
        report.overall_grade,
        report.overall_score,
        report.summary,
    )
}

fn render_category_table(report: &AuditReport) -> String {
    let mut md = String::from("## Category Scores\n\n");
    md.push_str("| Category | Score | Grade | Data |\n");
    md.push_str("|----------|------:|:-----:|------|\n");
    for result in report.categories.values() {
        let data = if result.degraded {
            "degraded baseline"
        } else {
            "probe"
        };
        md.push_str(&format!(
            "| {} | {:.1} | {} | {} |\n",
            result.category.display_name(),
            result.normalized_score,
            result.grade,
            data,
        ));
    }
    md
}

fn render_findings(report: &AuditReport) -> String {
    let mut md = String::from("## Findings\n\n");
    for result in report.categories.values() {
        if result.issues.is_empty() && result.warnings.is_empty() {
            continue;
        }
        md.push_str(&format!("### {}\n\n", result.category.display_name()));
        for issue in &result.issues {
            md.push_str(&format!("- ❌ {issue}\n"));
        }
        for warning in &result.warnings {
            md.push_str(&format!("- ⚠️ {warning}\n"));
        }
        md.push('\n');
    }
    md
}

fn render_recommendations(report: &AuditReport) -> String {
    if report.recommendations.is_empty() {
        return String::new();
    }
    let mut md = String::from("## Recommendations\n\n");
    for rec in &report.recommendations {
        let marker = match rec.priority {
            RecommendationPriority::Critical => "**[critical]**",
            RecommendationPriority::High => "**[high]**",
            RecommendationPriority::General => "",
        };
        let text = &rec.text;
        if marker.is_empty() {
            md.push_str(&format!("1. {text}\n"));
        } else {
            md.push_str(&format!("1. {marker} {text}\n"));
        }
    }
    md.push('\n');
    md
}

fn render_footer(report: &AuditReport) -> String {
    let quality = if report.data_quality.is_complete() {
        "complete".to_string()
    } else {
        let names: Vec<&str> = report
            .data_quality
            .degraded_categories
            .iter()
            .map(|c| c.as_str())
            .collect();
        format!("partial (degraded: {})", names.join(", "))
    };
    format!(
        "---\n\n*Generated {} — data quality: {}*\n",
        report.timestamp.format("%Y-%m-%d %H:%M UTC"),
        quality,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_markdown_structure() {
        let report = test_report();
        let md = render(&report).expect("render markdown");
        assert!(md.contains("# "));
        assert!(md.contains("## Category Scores"));
        assert!(md.contains("## Recommendations"));
        assert!(md.contains("| Technical SEO |"));
    }

    #[test]
    fn test_markdown_flags_degraded_rows() {
        let report = test_report();
        let md = render(&report).expect("render markdown");
        assert!(md.contains("degraded baseline"));
        assert!(md.contains("partial (degraded:"));
    }
}
