//! Report assembly: probe collection, evaluation, and aggregation
//!
//! One audit invocation walks four states:
//!
//! ```text
//! Collecting -> Evaluating -> Aggregating -> Done
//! ```
//!
//! Collection spawns one task per requested category into a
//! [`tokio::task::JoinSet`]; every probe gets an independent bounded wait,
//! so a single slow source never delays the others. Dropping the assemble
//! future drops the JoinSet, which aborts still-pending probes — caller
//! cancellation propagates without extra plumbing. Aggregation is a join
//! point: no partial report is ever observable.
//!
//! Failure policy: an invalid target aborts before collection. Everything
//! that goes wrong with an individual category — unreachable source,
//! timeout, malformed payload — is absorbed into fallback synthesis and the
//! category marked degraded. A well-formed target always gets a report,
//! even a fully degraded one.

use crate::config::AuditConfig;
use crate::error::{AuditError, ProbeFailure};
use crate::fallback::FallbackSynthesizer;
use crate::models::{AuditReport, Category, CategoryResult, DataQuality, ProbeResult};
use crate::recommend::RecommendationEngine;
use crate::registry::CheckRegistry;
use crate::scoring::{overall_summary, CategoryEvaluator};
use crate::target::validate_target;
use chrono::Utc;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{info, warn};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Collaborator seam: delivers one category's raw probe finding.
///
/// Implementations do the actual fetching/measuring/crawling — none of
/// which happens in this crate. A returned `ProbeFailure` (or a payload
/// carrying an `error` field) sends the category down the fallback path.
pub trait ProbeSource: Send + Sync + 'static {
    fn fetch(&self, category: Category) -> BoxFuture<'static, Result<ProbeResult, ProbeFailure>>;
}

/// Pre-collected probe payloads, keyed by category
///
/// The stand-in source used by the CLI (probes read from a JSON document)
/// and by tests. Categories without a payload resolve as unavailable.
#[derive(Debug, Clone, Default)]
pub struct StaticProbes {
    probes: BTreeMap<Category, ProbeResult>,
}

impl StaticProbes {
    pub fn new(probes: impl IntoIterator<Item = ProbeResult>) -> Self {
        Self {
            probes: probes.into_iter().map(|p| (p.category, p)).collect(),
        }
    }
}

impl ProbeSource for StaticProbes {
    fn fetch(&self, category: Category) -> BoxFuture<'static, Result<ProbeResult, ProbeFailure>> {
        let result = self
            .probes
            .get(&category)
            .cloned()
            .ok_or(ProbeFailure::Unavailable);
        Box::pin(async move { result })
    }
}

/// Orchestrates one audit invocation end to end
pub struct ReportAssembler {
    config: AuditConfig,
    registry: CheckRegistry,
    probe_timeout: Duration,
}

impl ReportAssembler {
    pub fn new(config: AuditConfig) -> Self {
        let registry = CheckRegistry::from_config(&config);
        let probe_timeout = Duration::from_millis(config.probes.timeout_ms);
        Self {
            config,
            registry,
            probe_timeout,
        }
    }

    /// Override the per-probe bounded wait
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Run a full audit: collect probes for the requested categories,
    /// evaluate or synthesize each, and aggregate into one report.
    pub async fn assemble(
        &self,
        target: &str,
        requested: &[Category],
        source: Arc<dyn ProbeSource>,
    ) -> Result<AuditReport, AuditError> {
        let target = validate_target(target)?;

        // Dedup while keeping canonical category order.
        let mut categories: Vec<Category> = requested.to_vec();
        categories.sort();
        categories.dedup();
        if categories.is_empty() {
            return Err(AuditError::NoCategoriesRequested);
        }

        // Collecting: one task per category, each with its own bounded wait.
        let mut probes = JoinSet::new();
        for &category in &categories {
            let source = Arc::clone(&source);
            let timeout = self.probe_timeout;
            probes.spawn(async move {
                let outcome = tokio::time::timeout(timeout, source.fetch(category)).await;
                (category, outcome)
            });
        }

        let mut outcomes: BTreeMap<Category, Result<ProbeResult, ProbeFailure>> = BTreeMap::new();
        while let Some(joined) = probes.join_next().await {
            match joined {
                Ok((category, Ok(result))) => {
                    outcomes.insert(category, result);
                }
                Ok((category, Err(_elapsed))) => {
                    outcomes.insert(category, Err(ProbeFailure::Timeout));
                }
                Err(join_err) => {
                    // A panicked probe task loses its category tag; recover it
                    // below by treating every still-missing category as
                    // unavailable.
                    warn!("probe task failed to join: {join_err}");
                }
            }
        }

        // Evaluating: categories are independent; canonical order here fixes
        // the recommendation ordering downstream.
        let mut results: BTreeMap<Category, CategoryResult> = BTreeMap::new();
        for &category in &categories {
            let outcome = outcomes
                .remove(&category)
                .unwrap_or(Err(ProbeFailure::Unavailable));
            results.insert(category, self.resolve_category(category, outcome));
        }

        // Aggregating: mean over present categories only, never zero-filled.
        // `results` is non-empty here; an empty request was rejected above.
        let overall_score =
            results.values().map(|r| r.normalized_score).sum::<f64>() / results.len() as f64;
        let overall_table = self.config.grading.overall.table();
        let overall_grade = overall_table.grade(overall_score).to_string();

        let ordered: Vec<&CategoryResult> = results.values().collect();
        let recommendations = RecommendationEngine::recommend(&ordered);
        let data_quality = DataQuality::from_results(&results);

        info!(
            "audit of '{target}': {overall_score:.1} ({overall_grade}), {} categories ({} degraded), {} recommendations",
            results.len(),
            data_quality.degraded_categories.len(),
            recommendations.len()
        );

        Ok(AuditReport {
            target,
            timestamp: Utc::now(),
            summary: overall_summary(overall_score),
            categories: results,
            overall_score,
            overall_grade,
            recommendations,
            data_quality,
        })
    }

    /// Evaluate a real probe payload or fall back to a synthesized baseline.
    fn resolve_category(
        &self,
        category: Category,
        outcome: Result<ProbeResult, ProbeFailure>,
    ) -> CategoryResult {
        let bands = self.config.category_scale(category.as_str()).table();

        let failure = match outcome {
            Ok(probe) => match self.validate_probe(category, &probe) {
                Ok(()) => {
                    let checks = self.registry.hydrate(category, probe.checks);
                    let mut result = CategoryEvaluator::new(&bands).evaluate(category, checks);
                    result.source_latency_ms = Some(probe.source_latency_ms);
                    return result;
                }
                Err(reason) => reason,
            },
            Err(reason) => reason,
        };

        warn!("{category} probe degraded ({failure}), synthesizing baseline");
        FallbackSynthesizer::new(&self.registry, &bands).synthesize(category, failure)
    }

    /// Reject payloads the evaluator cannot trust: self-reported errors,
    /// category mismatches, and non-positive weights.
    fn validate_probe(&self, category: Category, probe: &ProbeResult) -> Result<(), ProbeFailure> {
        if let Some(reason) = probe.error {
            return Err(reason);
        }
        if probe.category != category {
            warn!(
                "probe for {category} answered with category {}",
                probe.category
            );
            return Err(ProbeFailure::Malformed);
        }
        if probe.checks.iter().any(|c| c.weight <= 0.0 || !c.weight.is_finite()) {
            return Err(ProbeFailure::Malformed);
        }
        Ok(())
    }
}
