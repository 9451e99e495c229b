//! Audit configuration support
//!
//! Loads per-project configuration from a `siteaudit.toml` file in the
//! working directory. Everything has a sensible default; a missing file is
//! normal and a malformed file degrades to defaults with a warning rather
//! than aborting the audit.
//!
//! # Configuration Format
//!
//! ```toml
//! # siteaudit.toml
//!
//! [grading]
//! overall = "coarse"            # or "fine"
//! category_default = "coarse"
//! categories = { performance = "fine", security = "fine" }
//!
//! [probes]
//! timeout_ms = 5000
//!
//! [weights.security]
//! https = 30.0
//! csp = 20.0
//! ```

use crate::scoring::GradeScale;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Config file name looked up in the working directory
pub const CONFIG_FILE: &str = "siteaudit.toml";

const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// Grade-table selection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GradingConfig {
    /// Table for the overall report grade
    pub overall: GradeScale,
    /// Table used for categories without an explicit entry
    pub category_default: GradeScale,
    /// Per-category table overrides, keyed by category identifier
    pub categories: HashMap<String, GradeScale>,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            overall: GradeScale::Coarse,
            category_default: GradeScale::Coarse,
            categories: HashMap::new(),
        }
    }
}

/// Probe collection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Independent bounded wait per probe, in milliseconds
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
        }
    }
}

/// Top-level audit configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub grading: GradingConfig,
    pub probes: ProbeConfig,
    /// Check-weight overrides: category identifier -> check id -> weight
    pub weights: HashMap<String, HashMap<String, f64>>,
}

impl AuditConfig {
    /// Grade table for one category
    pub fn category_scale(&self, category: &str) -> GradeScale {
        self.grading
            .categories
            .get(category)
            .copied()
            .unwrap_or(self.grading.category_default)
    }
}

/// Load configuration from `dir/siteaudit.toml`.
///
/// Missing file returns defaults silently; an unreadable or malformed file
/// warns and returns defaults.
pub fn load_audit_config(dir: &Path) -> AuditConfig {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        debug!("no {CONFIG_FILE} found in {}, using defaults", dir.display());
        return AuditConfig::default();
    }

    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            warn!("failed to read {}: {e}, using defaults", path.display());
            return AuditConfig::default();
        }
    };

    match toml::from_str(&contents) {
        Ok(config) => {
            debug!("loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("failed to parse {}: {e}, using defaults", path.display());
            AuditConfig::default()
        }
    }
}
