//! Error taxonomy for the audit engine
//!
//! Two tiers, deliberately kept apart:
//! - `AuditError` — fatal to the whole audit (bad target, caller bug)
//! - `ProbeFailure` — per-category, absorbed via fallback synthesis

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort an audit invocation
#[derive(Error, Debug)]
pub enum AuditError {
    /// The target failed basic well-formedness validation.
    /// Surfaced immediately, before any probe is awaited.
    #[error("invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    /// The caller named a category the registry does not know.
    /// This is a programming error, not a runtime condition to recover from.
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// The caller requested an audit over zero categories. There is
    /// nothing to score, so no report could be anything but misleading.
    #[error("no categories requested")]
    NoCategoriesRequested,
}

pub type AuditResult<T> = Result<T, AuditError>;

/// Per-category probe failure reasons
///
/// Never escalates to report-level failure: the assembler absorbs each of
/// these via the fallback synthesizer and marks the category degraded.
/// Doubles as the wire form of the optional `error` field on `ProbeResult`.
#[derive(
    Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProbeFailure {
    /// Upstream data source could not be reached
    #[error("probe unavailable")]
    Unavailable,

    /// Probe exceeded its bounded wait
    #[error("probe timed out")]
    Timeout,

    /// Probe returned a payload the engine could not use
    #[error("probe payload malformed")]
    Malformed,
}
