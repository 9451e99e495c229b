//! `siteaudit audit` — run the engine over pre-collected probe payloads

use crate::assembler::{ReportAssembler, StaticProbes};
use crate::config::load_audit_config;
use crate::models::{Category, ProbeResult};
use crate::reporters;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

pub struct AuditArgs {
    pub target: String,
    /// JSON document of probe payloads; `-` reads stdin
    pub probes: Option<PathBuf>,
    pub format: String,
    pub output: Option<PathBuf>,
    /// Category identifiers; empty means all registered categories
    pub categories: Vec<String>,
    pub timeout_ms: Option<u64>,
}

pub fn run(args: AuditArgs) -> Result<()> {
    let mut config = load_audit_config(Path::new("."));
    if let Some(timeout_ms) = args.timeout_ms {
        config.probes.timeout_ms = timeout_ms;
    }

    let categories: Vec<Category> = if args.categories.is_empty() {
        Category::all().to_vec()
    } else {
        args.categories
            .iter()
            .map(|s| Category::parse(s))
            .collect::<Result<_, _>>()?
    };

    let probes = load_probes(args.probes.as_deref())?;
    let assembler = ReportAssembler::new(config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let report = runtime.block_on(assembler.assemble(
        &args.target,
        &categories,
        Arc::new(StaticProbes::new(probes)),
    ))?;

    let rendered = reporters::report(&report, &args.format)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Parse probe payloads from a JSON array.
///
/// Entries that fail to parse are skipped with a warning instead of failing
/// the whole audit — their categories degrade through the unavailable path,
/// never silently mixing into real data.
fn load_probes(path: Option<&Path>) -> Result<Vec<ProbeResult>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read probes from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    let entries: Vec<serde_json::Value> =
        serde_json::from_str(&raw).context("probes document is not a JSON array")?;

    let mut probes = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ProbeResult>(entry) {
            Ok(probe) => probes.push(probe),
            Err(e) => warn!("skipping unparseable probe entry {index}: {e}"),
        }
    }
    Ok(probes)
}
