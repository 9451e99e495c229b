//! Category evaluation: checks in, normalized score and finding lists out
//!
//! The evaluator is a pure function of its inputs: no I/O, no shared state.
//! Score math follows one invariant:
//!
//! ```text
//! normalized_score = 100 * sum(weight of passed) / sum(weight of known)
//! ```
//!
//! clamped to [0, 100]. Checks with an unknown outcome are recorded but
//! excluded from both sides of the ratio — they neither help nor hurt. A
//! category with zero known checks scores 0 and is marked degraded.

use crate::models::{Category, CategoryResult, Check};
use crate::scoring::BandTable;
use std::cmp::Ordering;
use tracing::debug;

/// Evaluates one category's checks against a grade-band table
pub struct CategoryEvaluator<'a> {
    bands: &'a BandTable,
}

impl<'a> CategoryEvaluator<'a> {
    pub fn new(bands: &'a BandTable) -> Self {
        Self { bands }
    }

    /// Produce a `CategoryResult` from probe-reported checks.
    ///
    /// Issues are failing checks that are critical or carry top-quartile
    /// weight for the category; critical ones are listed first regardless of
    /// weight. Remaining failing checks become warnings, passing checks
    /// become successes.
    pub fn evaluate(&self, category: Category, checks: Vec<Check>) -> CategoryResult {
        let known_weight: f64 = checks.iter().filter(|c| c.is_known()).map(|c| c.weight).sum();
        let passed_weight: f64 = checks.iter().filter(|c| c.passed()).map(|c| c.weight).sum();

        let (normalized_score, degraded) = if known_weight > 0.0 {
            ((100.0 * passed_weight / known_weight).clamp(0.0, 100.0), false)
        } else {
            // No usable data at all; flag it rather than report a silent zero.
            (0.0, true)
        };

        debug!(
            "{category}: {passed_weight:.1}/{known_weight:.1} weighted -> {normalized_score:.1}"
        );

        let quartile = top_quartile_threshold(&checks);

        let mut issues = Vec::new();
        let mut warnings = Vec::new();
        let mut successes = Vec::new();

        // Critical failures first, in check order.
        for check in checks.iter().filter(|c| c.failed() && c.critical) {
            issues.push(label(check));
        }
        for check in checks.iter().filter(|c| c.failed() && !c.critical) {
            if check.weight >= quartile {
                issues.push(label(check));
            } else {
                warnings.push(label(check));
            }
        }
        for check in checks.iter().filter(|c| c.passed()) {
            successes.push(label(check));
        }

        let grade = self.bands.grade(normalized_score).to_string();
        let summary = if degraded {
            format!("No usable probe data for {}", category.display_name())
        } else {
            score_summary(category, normalized_score)
        };

        CategoryResult {
            category,
            checks,
            normalized_score,
            grade,
            issues,
            warnings,
            successes,
            summary,
            degraded,
            degraded_reason: None,
            source_latency_ms: None,
        }
    }
}

fn label(check: &Check) -> String {
    if check.description.is_empty() {
        check.id.clone()
    } else {
        check.description.clone()
    }
}

/// Smallest weight still inside the top quartile of the category's checks,
/// by rank: the heaviest ceil(n/4) checks count as high-weight.
pub(crate) fn top_quartile_threshold(checks: &[Check]) -> f64 {
    let mut weights: Vec<f64> = checks.iter().map(|c| c.weight).collect();
    if weights.is_empty() {
        return f64::INFINITY;
    }
    weights.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    let take = weights.len().div_ceil(4);
    weights[take - 1]
}

/// One-line assessment per score band, category flavored
fn score_summary(category: Category, score: f64) -> String {
    let name = category.display_name();
    if score >= 80.0 {
        format!("Excellent {name} health")
    } else if score >= 60.0 {
        format!("Good {name} with minor improvements needed")
    } else if score >= 40.0 {
        format!("Moderate {name} - several issues to address")
    } else {
        format!("Poor {name} - critical issues require immediate attention")
    }
}

/// Assessment line for the overall report score
pub fn overall_summary(score: f64) -> String {
    if score >= 80.0 {
        "Excellent overall site health".to_string()
    } else if score >= 60.0 {
        "Good overall site health with minor improvements needed".to_string()
    } else if score >= 40.0 {
        "Moderate site health - several issues to address".to_string()
    } else {
        "Poor site health - critical issues require immediate attention".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckOutcome;

    fn check(id: &str, weight: f64, critical: bool, outcome: CheckOutcome) -> Check {
        Check::new(id, weight, critical, outcome)
    }

    #[test]
    fn test_all_passing_scores_100() {
        let bands = BandTable::coarse();
        let evaluator = CategoryEvaluator::new(&bands);
        let result = evaluator.evaluate(
            Category::Mobile,
            vec![
                check("a", 20.0, false, CheckOutcome::Passed),
                check("b", 5.0, true, CheckOutcome::Passed),
            ],
        );
        assert_eq!(result.normalized_score, 100.0);
        assert_eq!(result.grade, "A+");
        assert!(!result.degraded);
        assert!(result.issues.is_empty());
        assert_eq!(result.successes.len(), 2);
    }

    #[test]
    fn test_all_failing_scores_0() {
        let bands = BandTable::coarse();
        let evaluator = CategoryEvaluator::new(&bands);
        let result = evaluator.evaluate(
            Category::Security,
            vec![
                check("a", 10.0, true, CheckOutcome::Failed),
                check("b", 5.0, false, CheckOutcome::Failed),
            ],
        );
        assert_eq!(result.normalized_score, 0.0);
        assert_eq!(result.grade, "F");
        assert!(!result.degraded);
    }

    #[test]
    fn test_unknown_excluded_from_both_sides() {
        let bands = BandTable::coarse();
        let evaluator = CategoryEvaluator::new(&bands);
        // unknown check with huge weight must not move the score
        let result = evaluator.evaluate(
            Category::Technical,
            vec![
                check("a", 10.0, false, CheckOutcome::Passed),
                check("b", 10.0, false, CheckOutcome::Failed),
                check("c", 1000.0, false, CheckOutcome::Unknown),
            ],
        );
        assert_eq!(result.normalized_score, 50.0);
        // but it is still recorded
        assert_eq!(result.checks.len(), 3);
    }

    #[test]
    fn test_zero_known_checks_degrades() {
        let bands = BandTable::coarse();
        let evaluator = CategoryEvaluator::new(&bands);
        let result = evaluator.evaluate(
            Category::Trust,
            vec![check("a", 10.0, false, CheckOutcome::Unknown)],
        );
        assert_eq!(result.normalized_score, 0.0);
        assert!(result.degraded);
    }

    #[test]
    fn test_scenario_a_technical_two_checks() {
        // https pass (weight 10) + sitemap fail (weight 5, non-critical)
        // => 10/15 = 66.7, coarse grade C
        let bands = BandTable::coarse();
        let evaluator = CategoryEvaluator::new(&bands);
        let result = evaluator.evaluate(
            Category::Technical,
            vec![
                check("https", 10.0, false, CheckOutcome::Passed),
                check("sitemap", 5.0, false, CheckOutcome::Failed),
            ],
        );
        assert!((result.normalized_score - 66.6666).abs() < 0.01);
        assert_eq!(result.grade, "C");
    }

    #[test]
    fn test_issue_partitioning() {
        let bands = BandTable::coarse();
        let evaluator = CategoryEvaluator::new(&bands);
        let result = evaluator.evaluate(
            Category::Security,
            vec![
                check("low-fail", 2.0, false, CheckOutcome::Failed),
                check("crit-fail", 1.0, true, CheckOutcome::Failed),
                check("heavy-fail", 25.0, false, CheckOutcome::Failed),
                check("ok", 10.0, false, CheckOutcome::Passed),
            ],
        );
        // critical first, then the top-quartile weight failure
        assert_eq!(result.issues, vec!["crit-fail", "heavy-fail"]);
        assert_eq!(result.warnings, vec!["low-fail"]);
        assert_eq!(result.successes, vec!["ok"]);
    }

    #[test]
    fn test_score_bounds_hold() {
        let bands = BandTable::coarse();
        let evaluator = CategoryEvaluator::new(&bands);
        for failing in 0..=6 {
            let checks: Vec<Check> = (0..6)
                .map(|i| {
                    check(
                        &format!("c{i}"),
                        (i + 1) as f64,
                        i == 0,
                        CheckOutcome::from_passed(i >= failing),
                    )
                })
                .collect();
            let result = evaluator.evaluate(Category::Performance, checks);
            assert!((0.0..=100.0).contains(&result.normalized_score));
        }
    }
}
