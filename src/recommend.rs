//! Recommendation aggregation
//!
//! Failing checks map to canned recommendation text through a static table
//! keyed by check id. Identity for deduplication is the canonical issue id,
//! not the surface text: the same underlying defect detected in two
//! categories (HTTPS missing shows up in technical, trust, and security)
//! merges into a single entry, and the first occurrence — at the highest
//! priority tier it was seen in — wins.
//!
//! Output order: critical failures in category evaluation order, then
//! high-weight warnings, then general findings, then the best-practice
//! suggestions that close out every report exactly once.

use crate::models::{CategoryResult, Check, Recommendation, RecommendationPriority};
use crate::scoring::top_quartile_threshold;
use rustc_hash::FxHashSet;

/// check id -> (canonical issue id, recommendation text)
///
/// A check id missing from this table simply produces no recommendation.
const RECOMMENDATIONS: &[(&str, &str, &str)] = &[
    // Transport security — fired from technical, trust, and security
    ("https", "https-missing", "Implement an SSL certificate and redirect unencrypted traffic"),
    // Technical SEO
    ("robots-txt", "robots-unverified", "Ensure robots.txt allows crawling of important pages"),
    ("sitemap", "sitemap-missing", "Publish an XML sitemap and submit it to Google Search Console"),
    ("meta-tags", "meta-tags-weak", "Write unique title tags (50-60 chars) and meta descriptions (150-160 chars)"),
    ("security-headers", "security-headers-missing", "Implement security headers for better protection"),
    ("canonical", "canonical-missing", "Add self-referencing canonical tags to all indexable pages"),
    // Performance
    ("lcp", "slow-lcp", "Optimize LCP: compress images, use a CDN, lazy-load below-the-fold media"),
    ("fid", "slow-fid", "Improve FID: minimize JavaScript, use code splitting, defer non-critical scripts"),
    ("cls", "layout-shift", "Fix CLS: set image and video dimensions, avoid injecting content above existing content"),
    ("ttfb", "slow-ttfb", "Reduce TTFB: optimize server configuration, use caching, consider a CDN"),
    ("fcp", "slow-fcp", "Speed up FCP: inline critical CSS and remove render-blocking resources"),
    // Mobile
    ("viewport-meta", "viewport-missing", "Add a responsive viewport meta tag"),
    ("text-readable", "mobile-text-small", "Ensure font sizes are at least 16px on mobile"),
    ("tap-targets", "tap-targets-small", "Size tap targets for touch (48px minimum)"),
    ("fast-loading", "mobile-slow", "Optimize images and reduce JavaScript execution time on mobile"),
    // Trust & authority
    ("author-bio", "no-author-bio", "Add author bios showcasing expertise and experience"),
    ("citations", "no-citations", "Add citations to authoritative sources"),
    ("about-page", "no-about-page", "Create a comprehensive About page"),
    ("contact-page", "no-contact-page", "Add a contact page with multiple contact methods"),
    ("privacy-policy", "no-privacy-policy", "Add a privacy policy (required for GDPR compliance)"),
    ("backlink-authority", "weak-backlinks", "Build high-quality backlinks from authoritative sites"),
    ("domain-age", "new-domain", "Build domain authority over time"),
    // Accessibility
    ("alt-text", "missing-alt-text", "Provide alt text for all meaningful images"),
    ("color-contrast", "low-contrast", "Increase color contrast for text to meet WCAG AA standards"),
    ("aria-landmarks", "missing-landmarks", "Add ARIA landmarks (main, navigation, complementary)"),
    ("skip-links", "no-skip-link", "Add a skip to main content link for keyboard users"),
    ("form-labels", "unlabeled-forms", "Label every form input"),
    // Security headers
    ("hsts", "hsts-missing", "Add HSTS header: Strict-Transport-Security: max-age=31536000"),
    ("csp", "csp-missing", "Implement Content Security Policy to prevent XSS attacks"),
    ("referrer-policy", "referrer-policy-missing", "Set Referrer-Policy: strict-origin-when-cross-origin"),
    ("permissions-policy", "permissions-policy-missing", "Add Permissions-Policy header to control browser features"),
    // Crawl health
    ("broken-links", "broken-links", "Fix or redirect broken internal and outbound links"),
    ("meta-descriptions", "meta-descriptions-missing", "Add unique meta descriptions to all pages (150-160 characters)"),
    ("h1-coverage", "h1-missing", "Ensure every page has exactly one H1 tag"),
    ("page-size", "oversized-pages", "Reduce page size by minifying CSS/JS and compressing images"),
    ("crawl-coverage", "orphan-pages", "Link orphaned pages from crawlable navigation"),
];

/// Best-practice suggestions appended once per report, after all findings
const GENERAL_SUGGESTIONS: &[(&str, &str)] = &[
    ("enable-compression", "Enable compression (Gzip/Brotli)"),
    ("minify-assets", "Minify CSS, JavaScript, and HTML"),
    ("browser-caching", "Leverage browser caching"),
    ("modern-image-formats", "Use modern image formats (WebP, AVIF)"),
];

fn lookup(check_id: &str) -> Option<(&'static str, &'static str)> {
    RECOMMENDATIONS
        .iter()
        .find(|(id, _, _)| *id == check_id)
        .map(|(_, issue, text)| (*issue, *text))
}

/// Merges all category findings into one ordered, deduplicated list
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Build the report-level recommendation list from category results in
    /// evaluation order.
    pub fn recommend(results: &[&CategoryResult]) -> Vec<Recommendation> {
        let mut seen: FxHashSet<&'static str> = FxHashSet::default();
        let mut out = Vec::new();

        let push = |seen: &mut FxHashSet<&'static str>,
                    out: &mut Vec<Recommendation>,
                    check: &Check,
                    priority: RecommendationPriority| {
            if let Some((issue_id, text)) = lookup(&check.id) {
                if seen.insert(issue_id) {
                    out.push(Recommendation {
                        issue_id: issue_id.to_string(),
                        text: text.to_string(),
                        priority,
                    });
                }
            }
        };

        // Tier 1: critical failures, category evaluation order.
        for result in results {
            for check in result.checks.iter().filter(|c| c.failed() && c.critical) {
                push(&mut seen, &mut out, check, RecommendationPriority::Critical);
            }
        }

        // Tier 2: high-impact (top-quartile weight) failures.
        for result in results {
            let quartile = top_quartile_threshold(&result.checks);
            for check in result
                .checks
                .iter()
                .filter(|c| c.failed() && !c.critical && c.weight >= quartile)
            {
                push(&mut seen, &mut out, check, RecommendationPriority::High);
            }
        }

        // Tier 3: everything else that failed.
        for result in results {
            let quartile = top_quartile_threshold(&result.checks);
            for check in result
                .checks
                .iter()
                .filter(|c| c.failed() && !c.critical && c.weight < quartile)
            {
                push(&mut seen, &mut out, check, RecommendationPriority::General);
            }
        }

        // Generic best practice closes every report, once, findings or not.
        for &(issue_id, text) in GENERAL_SUGGESTIONS {
            if seen.insert(issue_id) {
                out.push(Recommendation {
                    issue_id: issue_id.to_string(),
                    text: text.to_string(),
                    priority: RecommendationPriority::General,
                });
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CheckOutcome};
    use crate::scoring::{BandTable, CategoryEvaluator};

    fn result_for(category: Category, checks: Vec<Check>) -> CategoryResult {
        let bands = BandTable::coarse();
        CategoryEvaluator::new(&bands).evaluate(category, checks)
    }

    #[test]
    fn test_no_duplicate_issue_ids() {
        // https failing critically in both technical and security
        let technical = result_for(
            Category::Technical,
            vec![Check::new("https", 10.0, true, CheckOutcome::Failed)],
        );
        let security = result_for(
            Category::Security,
            vec![Check::new("https", 25.0, true, CheckOutcome::Failed)],
        );

        let recs = RecommendationEngine::recommend(&[&technical, &security]);
        let https_count = recs.iter().filter(|r| r.issue_id == "https-missing").count();
        assert_eq!(https_count, 1);

        let mut ids: Vec<&str> = recs.iter().map(|r| r.issue_id.as_str()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before, "duplicate canonical issue ids in output");
    }

    #[test]
    fn test_critical_precedes_non_critical() {
        let security = result_for(
            Category::Security,
            vec![
                Check::new("hsts", 15.0, false, CheckOutcome::Failed),
                Check::new("https", 25.0, true, CheckOutcome::Failed),
            ],
        );

        let recs = RecommendationEngine::recommend(&[&security]);
        let https_pos = recs.iter().position(|r| r.issue_id == "https-missing").unwrap();
        let hsts_pos = recs.iter().position(|r| r.issue_id == "hsts-missing").unwrap();
        assert!(https_pos < hsts_pos);
        assert_eq!(recs[https_pos].priority, RecommendationPriority::Critical);
    }

    #[test]
    fn test_general_suggestions_always_appended_last_once() {
        let clean = result_for(
            Category::Mobile,
            vec![Check::new("viewport-meta", 20.0, true, CheckOutcome::Passed)],
        );
        let also_clean = result_for(
            Category::Performance,
            vec![Check::new("lcp", 25.0, true, CheckOutcome::Passed)],
        );

        let recs = RecommendationEngine::recommend(&[&clean, &also_clean]);
        // Nothing failed, so only the generic tail remains
        assert_eq!(recs.len(), GENERAL_SUGGESTIONS.len());
        assert_eq!(recs[0].issue_id, "enable-compression");
        assert!(recs.iter().all(|r| r.priority == RecommendationPriority::General));
    }

    #[test]
    fn test_unmapped_check_produces_nothing() {
        let result = result_for(
            Category::Mobile,
            vec![Check::new("no-flash", 10.0, false, CheckOutcome::Failed)],
        );
        let recs = RecommendationEngine::recommend(&[&result]);
        assert!(recs.iter().all(|r| !r.issue_id.contains("flash")));
    }

    #[test]
    fn test_first_tier_wins_dedup() {
        // https fails critically in security but is a plain warning weight in
        // trust; the merged entry must carry the critical tier.
        let trust = result_for(
            Category::Trust,
            vec![
                Check::new("https", 10.0, false, CheckOutcome::Failed),
                Check::new("backlink-authority", 25.0, false, CheckOutcome::Failed),
            ],
        );
        let security = result_for(
            Category::Security,
            vec![Check::new("https", 25.0, true, CheckOutcome::Failed)],
        );

        let recs = RecommendationEngine::recommend(&[&trust, &security]);
        let https = recs.iter().find(|r| r.issue_id == "https-missing").unwrap();
        assert_eq!(https.priority, RecommendationPriority::Critical);
    }
}
