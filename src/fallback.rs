//! Deterministic baseline synthesis for failed probes
//!
//! When a category's probe is unavailable, times out, or returns an
//! unusable payload, the audit still needs a result for that category. The
//! synthesizer replays the category's full check catalog with a fixed
//! pass/fail pattern, runs it through the same evaluator as real data, and
//! marks the result degraded — an explicit, named substitute, never
//! silently indistinguishable from a real probe.
//!
//! Baseline patterns are constants: repeated synthesis for the same
//! category always yields the same score. With default catalog weights the
//! baselines land at:
//!
//! | category      | failing checks                                  | score |
//! |---------------|--------------------------------------------------|-------|
//! | technical     | robots-txt, security-headers                     | 72.7  |
//! | performance   | ttfb, fcp                                        | 65.0  |
//! | mobile        | fast-loading                                     | 85.0  |
//! | trust         | author-bio, domain-age, citations, backlinks     | 35.0  |
//! | accessibility | color-contrast, aria-landmarks, skip-links       | 66.7  |
//! | security      | hsts, csp, referrer-policy, permissions-policy   | 52.9  |
//! | crawl-health  | meta-descriptions, page-size                     | 65.0  |
//!
//! Configured weight overrides shift the numbers, but never the pattern.

use crate::error::ProbeFailure;
use crate::models::{Category, CategoryResult};
use crate::registry::CheckRegistry;
use crate::scoring::{BandTable, CategoryEvaluator};
use tracing::debug;

/// Fixed failing-check pattern per category
const fn baseline_failing(category: Category) -> &'static [&'static str] {
    match category {
        Category::Technical => &["robots-txt", "security-headers"],
        Category::Performance => &["ttfb", "fcp"],
        Category::Mobile => &["fast-loading"],
        Category::Trust => &["author-bio", "domain-age", "citations", "backlink-authority"],
        Category::Accessibility => &["color-contrast", "aria-landmarks", "skip-links"],
        Category::Security => &["hsts", "csp", "referrer-policy", "permissions-policy"],
        Category::CrawlHealth => &["meta-descriptions", "page-size"],
    }
}

/// Produces baseline `CategoryResult`s for categories whose probe failed
pub struct FallbackSynthesizer<'a> {
    registry: &'a CheckRegistry,
    bands: &'a BandTable,
}

impl<'a> FallbackSynthesizer<'a> {
    pub fn new(registry: &'a CheckRegistry, bands: &'a BandTable) -> Self {
        Self { registry, bands }
    }

    /// Synthesize a degraded result for `category`.
    ///
    /// The baseline check set goes through the same evaluation rules as real
    /// probe data, so downstream recommendation logic behaves uniformly.
    pub fn synthesize(&self, category: Category, reason: ProbeFailure) -> CategoryResult {
        debug!("synthesizing baseline for {category}: {reason}");
        let checks = self.registry.materialize(category, baseline_failing(category));
        let mut result = CategoryEvaluator::new(self.bands).evaluate(category, checks);
        result.degraded = true;
        result.degraded_reason = Some(reason);
        result
    }
}
