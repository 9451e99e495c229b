//! Core data models for siteaudit
//!
//! These models are used throughout the codebase for representing
//! checks, category results, probe payloads, and the final report.

use crate::error::{AuditError, ProbeFailure};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Inspection categories
///
/// Each category is an independent inspection dimension with its own check
/// catalog, probe, and score. The enum order is the canonical evaluation
/// and presentation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Technical,
    Performance,
    Mobile,
    Trust,
    Accessibility,
    Security,
    CrawlHealth,
}

impl Category {
    /// All categories in canonical order
    pub fn all() -> &'static [Category] {
        &[
            Category::Technical,
            Category::Performance,
            Category::Mobile,
            Category::Trust,
            Category::Accessibility,
            Category::Security,
            Category::CrawlHealth,
        ]
    }

    /// Stable string identifier (matches the serde wire form)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::Performance => "performance",
            Category::Mobile => "mobile",
            Category::Trust => "trust",
            Category::Accessibility => "accessibility",
            Category::Security => "security",
            Category::CrawlHealth => "crawl-health",
        }
    }

    /// Human-readable name for report output
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Technical => "Technical SEO",
            Category::Performance => "Performance",
            Category::Mobile => "Mobile Usability",
            Category::Trust => "Trust & Authority",
            Category::Accessibility => "Accessibility",
            Category::Security => "Security",
            Category::CrawlHealth => "Crawl Health",
        }
    }

    /// Resolve a category identifier, failing with `UnknownCategory` for
    /// anything the registry does not know.
    pub fn parse(s: &str) -> Result<Category, AuditError> {
        match s.trim().to_lowercase().as_str() {
            "technical" => Ok(Category::Technical),
            "performance" => Ok(Category::Performance),
            "mobile" => Ok(Category::Mobile),
            "trust" => Ok(Category::Trust),
            "accessibility" => Ok(Category::Accessibility),
            "security" => Ok(Category::Security),
            "crawl-health" => Ok(Category::CrawlHealth),
            other => Err(AuditError::UnknownCategory(other.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a single check
///
/// `Unknown` means the owning probe could not determine the check; it is
/// recorded but excluded from both the numerator and the denominator of the
/// category score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckOutcome {
    Passed,
    Failed,
    Unknown,
}

impl CheckOutcome {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            CheckOutcome::Passed
        } else {
            CheckOutcome::Failed
        }
    }
}

// Wire form: probes send `passed` as a bool, or the string "unknown" when
// the probe could not determine the check. Reports serialize the outcome
// back as a plain string.
impl Serialize for CheckOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CheckOutcome::Passed => serializer.serialize_str("passed"),
            CheckOutcome::Failed => serializer.serialize_str("failed"),
            CheckOutcome::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for CheckOutcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Bool(bool),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Bool(b) => Ok(CheckOutcome::from_passed(b)),
            Wire::Text(s) => match s.to_lowercase().as_str() {
                "passed" | "pass" | "true" => Ok(CheckOutcome::Passed),
                "failed" | "fail" | "false" => Ok(CheckOutcome::Failed),
                "unknown" => Ok(CheckOutcome::Unknown),
                other => Err(serde::de::Error::custom(format!(
                    "invalid check outcome '{other}'"
                ))),
            },
        }
    }
}

/// The atomic unit of evaluation: a weighted, possibly-critical probe result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    /// Stable identifier within its category (e.g. "https", "alt-text")
    pub id: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Relative contribution to the category score; must be positive
    pub weight: f64,
    /// Critical failures are surfaced first regardless of weight
    #[serde(default)]
    pub critical: bool,
    /// Pass/fail/unknown, named `passed` on the wire
    #[serde(rename = "passed")]
    pub outcome: CheckOutcome,
}

impl Check {
    pub fn new(id: impl Into<String>, weight: f64, critical: bool, outcome: CheckOutcome) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            weight,
            critical,
            outcome,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn passed(&self) -> bool {
        self.outcome == CheckOutcome::Passed
    }

    pub fn failed(&self) -> bool {
        self.outcome == CheckOutcome::Failed
    }

    /// Whether this check participates in scoring
    pub fn is_known(&self) -> bool {
        self.outcome != CheckOutcome::Unknown
    }
}

/// Summary of checks by outcome
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckSummary {
    pub passed: usize,
    pub failed: usize,
    pub unknown: usize,
    pub total: usize,
}

impl CheckSummary {
    pub fn from_checks(checks: &[Check]) -> Self {
        let mut summary = Self::default();
        for c in checks {
            match c.outcome {
                CheckOutcome::Passed => summary.passed += 1,
                CheckOutcome::Failed => summary.failed += 1,
                CheckOutcome::Unknown => summary.unknown += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// Evaluated result for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: Category,
    pub checks: Vec<Check>,
    /// Weighted pass ratio scaled to [0, 100]
    pub normalized_score: f64,
    /// Letter grade per the category's band table
    pub grade: String,
    /// Failing checks that are critical or carry top-quartile weight
    pub issues: Vec<String>,
    /// Remaining failing checks
    pub warnings: Vec<String>,
    /// Passing checks
    pub successes: Vec<String>,
    /// One-line assessment for the category's score band
    pub summary: String,
    /// True iff this result came from the fallback synthesizer
    pub degraded: bool,
    /// Why the category degraded, when it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<ProbeFailure>,
    /// Upstream probe latency, absent for synthesized results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_latency_ms: Option<u64>,
}

/// Raw per-category finding delivered by an external collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    pub category: Category,
    #[serde(default)]
    pub checks: Vec<Check>,
    #[serde(default)]
    pub source_latency_ms: u64,
    /// Probes may self-report failure instead of sending checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProbeFailure>,
}

/// Report completeness marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Completeness {
    Complete,
    Partial,
}

/// Data provenance for the report: complete, or partial with the list of
/// categories whose values came from synthesized fallback data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQuality {
    pub completeness: Completeness,
    pub degraded_categories: Vec<Category>,
}

impl DataQuality {
    pub fn from_results(categories: &BTreeMap<Category, CategoryResult>) -> Self {
        let degraded: Vec<Category> = categories
            .values()
            .filter(|r| r.degraded)
            .map(|r| r.category)
            .collect();
        Self {
            completeness: if degraded.is_empty() {
                Completeness::Complete
            } else {
                Completeness::Partial
            },
            degraded_categories: degraded,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completeness == Completeness::Complete
    }
}

/// A single deduplicated recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Canonical issue id — the dedup key, stable across categories
    pub issue_id: String,
    pub text: String,
    pub priority: RecommendationPriority,
}

/// Priority tiers for recommendation ordering
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    /// From a failing critical check
    Critical,
    /// From a failing high-weight (top-quartile) check
    High,
    /// Remaining findings and general best practice
    General,
}

/// Final audit report
///
/// Created fresh per audit invocation and never mutated after assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// The audited identifier (URL or business name)
    pub target: String,
    pub timestamp: DateTime<Utc>,
    /// Only categories that were requested and produced a result
    pub categories: BTreeMap<Category, CategoryResult>,
    /// Arithmetic mean across present categories; absent categories are
    /// never zero-filled
    pub overall_score: f64,
    pub overall_grade: String,
    /// One-line assessment for the overall score band
    pub summary: String,
    pub recommendations: Vec<Recommendation>,
    pub data_quality: DataQuality,
}
