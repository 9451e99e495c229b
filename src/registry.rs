//! Canonical check catalogs per category
//!
//! The registry owns the known checks for each inspection category: their
//! ids, descriptions, default weights, and critical flags. Probes report
//! outcomes against these ids; the fallback synthesizer replays the catalog
//! with a fixed baseline pattern. Default weights follow the historical
//! audit tooling this engine replaced, but every weight can be overridden
//! through `[weights.<category>]` in siteaudit.toml — they are configuration,
//! not constants.

use crate::config::AuditConfig;
use crate::models::{Category, Check, CheckOutcome};
use std::collections::HashMap;

/// Static description of one registered check
#[derive(Debug, Clone, Copy)]
pub struct CheckSpec {
    pub id: &'static str,
    pub description: &'static str,
    pub weight: f64,
    pub critical: bool,
}

const fn spec(id: &'static str, description: &'static str, weight: f64, critical: bool) -> CheckSpec {
    CheckSpec { id, description, weight, critical }
}

const TECHNICAL: &[CheckSpec] = &[
    spec("https", "Site served over HTTPS with HTTP redirected", 10.0, true),
    spec("robots-txt", "robots.txt present and allows important pages", 5.0, false),
    spec("sitemap", "XML sitemap present and contains important URLs", 5.0, false),
    spec("meta-tags", "Title tags and meta descriptions present", 15.0, false),
    spec("security-headers", "X-Frame-Options, CSP, and HSTS headers set", 10.0, false),
    spec("clean-urls", "Clean, readable URL structure", 5.0, false),
    spec("canonical", "Self-referencing canonical tags", 5.0, false),
];

const PERFORMANCE: &[CheckSpec] = &[
    spec("lcp", "Largest Contentful Paint within 2.5s", 25.0, true),
    spec("fid", "First Input Delay within 100ms", 20.0, false),
    spec("cls", "Cumulative Layout Shift below 0.1", 20.0, false),
    spec("ttfb", "Time to First Byte within 0.8s", 15.0, false),
    spec("fcp", "First Contentful Paint within 1.8s", 20.0, false),
];

const MOBILE: &[CheckSpec] = &[
    spec("viewport-meta", "Viewport meta tag configured", 20.0, true),
    spec("text-readable", "Text is readable without zooming", 15.0, false),
    spec("tap-targets", "Tap targets are appropriately sized", 15.0, false),
    spec("no-horizontal-scroll", "Content fits screen width", 15.0, false),
    spec("touch-friendly", "Touch-friendly navigation", 10.0, false),
    spec("fast-loading", "Mobile page load speed", 15.0, false),
    spec("no-flash", "No Flash or unsupported plugins", 10.0, false),
];

const TRUST: &[CheckSpec] = &[
    spec("author-bio", "Author credentials displayed", 15.0, false),
    spec("domain-age", "Established domain (2+ years)", 10.0, false),
    spec("citations", "External citations and references present", 15.0, false),
    spec("about-page", "About page exists", 10.0, false),
    spec("backlink-authority", "Backlinks from authoritative sites", 25.0, false),
    spec("https", "HTTPS enabled", 10.0, true),
    spec("contact-page", "Contact information available", 8.0, false),
    spec("privacy-policy", "Privacy policy present", 7.0, false),
];

const ACCESSIBILITY: &[CheckSpec] = &[
    spec("alt-text", "Images have alt text", 15.0, false),
    spec("heading-structure", "Proper heading hierarchy (H1-H6)", 10.0, false),
    spec("color-contrast", "Sufficient color contrast (4.5:1)", 15.0, false),
    spec("keyboard-navigation", "Keyboard accessible", 15.0, false),
    spec("form-labels", "Form inputs have labels", 10.0, false),
    spec("aria-landmarks", "ARIA landmarks present", 10.0, false),
    spec("link-text", "Descriptive link text", 10.0, false),
    spec("skip-links", "Skip to content link", 5.0, false),
];

const SECURITY: &[CheckSpec] = &[
    spec("https", "HTTPS enabled", 25.0, true),
    spec("hsts", "HTTP Strict Transport Security (HSTS)", 15.0, false),
    spec("csp", "Content Security Policy (CSP)", 15.0, false),
    spec("x-frame-options", "X-Frame-Options header", 10.0, false),
    spec("x-content-type-options", "X-Content-Type-Options header", 10.0, false),
    spec("referrer-policy", "Referrer-Policy header", 5.0, false),
    spec("permissions-policy", "Permissions-Policy header", 5.0, false),
];

const CRAWL_HEALTH: &[CheckSpec] = &[
    spec("broken-links", "No broken internal or outbound links", 25.0, true),
    spec("meta-descriptions", "Unique meta descriptions on all pages", 20.0, false),
    spec("h1-coverage", "Every crawled page has exactly one H1", 15.0, false),
    spec("page-size", "Page sizes under 2MB", 15.0, false),
    spec("crawl-coverage", "All important pages reachable by crawl", 25.0, false),
];

/// Catalog of registered checks for a category
pub fn catalog(category: Category) -> &'static [CheckSpec] {
    match category {
        Category::Technical => TECHNICAL,
        Category::Performance => PERFORMANCE,
        Category::Mobile => MOBILE,
        Category::Trust => TRUST,
        Category::Accessibility => ACCESSIBILITY,
        Category::Security => SECURITY,
        Category::CrawlHealth => CRAWL_HEALTH,
    }
}

/// Registry of known categories and checks, with configured weight overrides
#[derive(Debug, Clone, Default)]
pub struct CheckRegistry {
    /// (category, check id) -> overridden weight
    overrides: HashMap<(Category, String), f64>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry applying `[weights.<category>]` overrides from config.
    /// Overrides for unknown check ids are ignored with a warning; weights
    /// must stay positive.
    pub fn from_config(config: &AuditConfig) -> Self {
        let mut overrides = HashMap::new();
        for (cat_name, weights) in &config.weights {
            let Ok(category) = Category::parse(cat_name) else {
                tracing::warn!("ignoring weight overrides for unknown category '{cat_name}'");
                continue;
            };
            for (check_id, &weight) in weights {
                if !catalog(category).iter().any(|s| s.id == check_id) {
                    tracing::warn!(
                        "ignoring weight override for unknown check '{check_id}' in {category}"
                    );
                    continue;
                }
                if weight <= 0.0 {
                    tracing::warn!(
                        "ignoring non-positive weight override for '{check_id}' in {category}"
                    );
                    continue;
                }
                overrides.insert((category, check_id.clone()), weight);
            }
        }
        Self { overrides }
    }

    /// Look up the spec for a check id within a category
    pub fn describe(&self, category: Category, check_id: &str) -> Option<&'static CheckSpec> {
        catalog(category).iter().find(|s| s.id == check_id)
    }

    /// Effective weight for a check, honoring config overrides
    pub fn weight_for(&self, category: Category, check_id: &str, default: f64) -> f64 {
        self.overrides
            .get(&(category, check_id.to_string()))
            .copied()
            .unwrap_or(default)
    }

    /// Fill in catalog descriptions and weight overrides on probe-supplied
    /// checks. Checks the catalog does not know keep what the probe sent.
    pub fn hydrate(&self, category: Category, checks: Vec<Check>) -> Vec<Check> {
        checks
            .into_iter()
            .map(|mut check| {
                if let Some(spec) = self.describe(category, &check.id) {
                    if check.description.is_empty() {
                        check.description = spec.description.to_string();
                    }
                }
                check.weight = self.weight_for(category, &check.id, check.weight);
                check
            })
            .collect()
    }

    /// Materialize the full catalog for a category with the given outcome
    /// pattern: check ids in `failing` fail, everything else passes.
    pub fn materialize(&self, category: Category, failing: &[&str]) -> Vec<Check> {
        catalog(category)
            .iter()
            .map(|spec| {
                let outcome = CheckOutcome::from_passed(!failing.contains(&spec.id));
                Check::new(
                    spec.id,
                    self.weight_for(category, spec.id, spec.weight),
                    spec.critical,
                    outcome,
                )
                .with_description(spec.description)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_catalog() {
        for &cat in Category::all() {
            let specs = catalog(cat);
            assert!(!specs.is_empty(), "{cat} catalog is empty");
            for spec in specs {
                assert!(spec.weight > 0.0, "{cat}/{} has non-positive weight", spec.id);
            }
        }
    }

    #[test]
    fn test_check_ids_unique_within_category() {
        for &cat in Category::all() {
            let specs = catalog(cat);
            for (i, a) in specs.iter().enumerate() {
                for b in &specs[i + 1..] {
                    assert_ne!(a.id, b.id, "duplicate check id in {cat}");
                }
            }
        }
    }

    #[test]
    fn test_hydrate_fills_descriptions() {
        let registry = CheckRegistry::new();
        let checks = vec![Check::new("https", 10.0, true, CheckOutcome::Passed)];
        let hydrated = registry.hydrate(Category::Technical, checks);
        assert!(!hydrated[0].description.is_empty());
    }

    #[test]
    fn test_weight_override_applied() {
        let mut config = AuditConfig::default();
        config
            .weights
            .entry("security".to_string())
            .or_default()
            .insert("https".to_string(), 40.0);
        let registry = CheckRegistry::from_config(&config);
        assert_eq!(registry.weight_for(Category::Security, "https", 25.0), 40.0);
        // Unregistered override left alone
        assert_eq!(registry.weight_for(Category::Security, "hsts", 15.0), 15.0);
    }

    #[test]
    fn test_materialize_pattern() {
        let registry = CheckRegistry::new();
        let checks = registry.materialize(Category::Security, &["hsts", "csp"]);
        assert_eq!(checks.len(), catalog(Category::Security).len());
        let hsts = checks.iter().find(|c| c.id == "hsts").unwrap();
        assert!(hsts.failed());
        let https = checks.iter().find(|c| c.id == "https").unwrap();
        assert!(https.passed());
    }
}
