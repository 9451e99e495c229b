//! Siteaudit - weighted site audit scoring
//!
//! Turns per-category probe payloads into a graded audit report:
//! weighted check scoring, letter grades, prioritized recommendations,
//! and documented baseline fallbacks when a probe fails.

pub mod assembler;
pub mod cli;
pub mod config;
pub mod error;
pub mod fallback;
pub mod models;
pub mod recommend;
pub mod registry;
pub mod reporters;
pub mod scoring;
pub mod target;

pub use assembler::{ProbeSource, ReportAssembler, StaticProbes};
pub use error::{AuditError, AuditResult, ProbeFailure};
pub use models::{AuditReport, Category, CategoryResult, Check, CheckOutcome, ProbeResult};
