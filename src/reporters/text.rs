//! Text (terminal) reporter with colors and formatting

use crate::models::{AuditReport, CategoryResult, RecommendationPriority};
use anyhow::Result;

/// Grade colors (ANSI escape codes)
fn grade_color(grade: &str) -> &'static str {
    match grade.chars().next() {
        Some('A') => "\x1b[32m", // Green
        Some('B') => "\x1b[92m", // Light green
        Some('C') => "\x1b[33m", // Yellow
        Some('D') => "\x1b[91m", // Light red
        Some('F') => "\x1b[31m", // Red
        _ => "\x1b[0m",
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn priority_tag(priority: RecommendationPriority) -> &'static str {
    match priority {
        RecommendationPriority::Critical => "[!]",
        RecommendationPriority::High => "[H]",
        RecommendationPriority::General => "[·]",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AuditReport) -> Result<String> {
    let mut out = String::new();

    // Header
    let grade_c = grade_color(&report.overall_grade);
    out.push_str(&format!("\n{BOLD}Site Audit: {}{RESET}\n", report.target));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Score: {BOLD}{:.1}/100{RESET}  Grade: {grade_c}{BOLD}{}{RESET}\n",
        report.overall_score, report.overall_grade
    ));
    out.push_str(&format!("{}\n\n", report.summary));

    // Category scores (compact)
    out.push_str(&format!("{BOLD}CATEGORIES{RESET}\n"));
    for result in report.categories.values() {
        let c = grade_color(&result.grade);
        let degraded = if result.degraded { " (degraded)" } else { "" };
        out.push_str(&format!(
            "  {:<18} {:>5.1}  {c}{}{RESET}{DIM}{degraded}{RESET}\n",
            result.category.display_name(),
            result.normalized_score,
            result.grade,
        ));
    }
    out.push('\n');

    // Per-category findings
    for result in report.categories.values() {
        render_category(&mut out, result);
    }

    // Recommendations
    if !report.recommendations.is_empty() {
        out.push_str(&format!("{BOLD}RECOMMENDATIONS{RESET}\n"));
        for rec in &report.recommendations {
            out.push_str(&format!("  {} {}\n", priority_tag(rec.priority), rec.text));
        }
        out.push('\n');
    }

    // Data quality footer
    if report.data_quality.is_complete() {
        out.push_str(&format!("{DIM}Data quality: complete{RESET}\n"));
    } else {
        let degraded: Vec<&str> = report
            .data_quality
            .degraded_categories
            .iter()
            .map(|c| c.as_str())
            .collect();
        out.push_str(&format!(
            "{DIM}Data quality: partial — degraded: {}{RESET}\n",
            degraded.join(", ")
        ));
    }

    Ok(out)
}

fn render_category(out: &mut String, result: &CategoryResult) {
    // Skip clean categories to keep terminal output short
    if result.issues.is_empty() && result.warnings.is_empty() {
        return;
    }

    out.push_str(&format!(
        "{BOLD}{}{RESET}",
        result.category.display_name().to_uppercase()
    ));
    if let Some(latency) = result.source_latency_ms {
        out.push_str(&format!("{DIM} (probe {latency}ms){RESET}"));
    }
    out.push('\n');

    for issue in &result.issues {
        out.push_str(&format!("  ❌ {issue}\n"));
    }
    for warning in &result.warnings {
        out.push_str(&format!("  ⚠️ {warning}\n"));
    }
    for success in &result.successes {
        out.push_str(&format!("  ✅ {success}\n"));
    }
    out.push('\n');
}
