//! CLI command definitions and handlers

mod audit;

use crate::models::Category;
use crate::registry::catalog;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate a probe timeout in milliseconds (1-600000)
fn parse_timeout_ms(s: &str) -> Result<u64, String> {
    let n: u64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("timeout must be at least 1ms".to_string())
    } else if n > 600_000 {
        Err("timeout cannot exceed 600000ms (10 minutes)".to_string())
    } else {
        Ok(n)
    }
}

/// Siteaudit - weighted site audit scoring
#[derive(Parser, Debug)]
#[command(name = "siteaudit")]
#[command(
    version,
    about = "Score site audit probe data across 7 inspection categories and produce graded reports",
    long_about = "Siteaudit turns raw probe payloads (JSON check results per category) into a \
weighted, graded audit report with prioritized recommendations.\n\n\
Categories that fail to produce data degrade to documented baseline estimates \
instead of failing the whole audit; degraded results are always flagged.\n\n\
Categories: technical, performance, mobile, trust, accessibility, security, crawl-health",
    after_help = "\
Examples:
  siteaudit audit https://example.com --probes probes.json     Full audit from probe file
  siteaudit audit example.com --probes - < probes.json         Read probes from stdin
  siteaudit audit https://example.com --probes probes.json --format json
  siteaudit audit https://example.com --probes probes.json -c security -c performance
  siteaudit checks                                             List every registered check
  siteaudit checks security                                    List checks for one category"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an audit over pre-collected probe payloads
    #[command(after_help = "\
Examples:
  siteaudit audit https://example.com --probes probes.json
  siteaudit audit https://example.com --probes probes.json --format markdown -o report.md
  siteaudit audit example.com -c technical -c security --timeout-ms 2000")]
    Audit {
        /// Target to audit: an http(s) URL or a site name
        target: String,

        /// JSON file with an array of probe payloads (use '-' for stdin).
        /// Categories without a payload degrade to baseline estimates.
        #[arg(long, short = 'p')]
        probes: Option<PathBuf>,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "markdown", "md"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Limit the audit to specific categories (repeatable; default: all)
        #[arg(long = "category", short = 'c')]
        categories: Vec<String>,

        /// Per-probe timeout in milliseconds (overrides siteaudit.toml)
        #[arg(long, value_parser = parse_timeout_ms)]
        timeout_ms: Option<u64>,
    },

    /// List registered checks and their weights
    Checks {
        /// Restrict the listing to one category
        category: Option<String>,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Audit {
            target,
            probes,
            format,
            output,
            categories,
            timeout_ms,
        } => audit::run(audit::AuditArgs {
            target,
            probes,
            format,
            output,
            categories,
            timeout_ms,
        }),

        Commands::Checks { category } => run_checks(category.as_deref()),
    }
}

fn run_checks(category: Option<&str>) -> Result<()> {
    let categories: Vec<Category> = match category {
        Some(name) => vec![Category::parse(name)?],
        None => Category::all().to_vec(),
    };

    for category in categories {
        println!("{} ({})", category.display_name(), category.as_str());
        for spec in catalog(category) {
            let critical = if spec.critical { "  [critical]" } else { "" };
            println!("  {:<24} weight {:>5.1}{critical}", spec.id, spec.weight);
        }
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout_bounds() {
        assert!(parse_timeout_ms("0").is_err());
        assert!(parse_timeout_ms("abc").is_err());
        assert!(parse_timeout_ms("600001").is_err());
        assert_eq!(parse_timeout_ms("5000").unwrap(), 5000);
    }

    #[test]
    fn test_cli_parses_audit_command() {
        let cli = Cli::try_parse_from([
            "siteaudit",
            "audit",
            "https://example.com",
            "--probes",
            "probes.json",
            "-c",
            "security",
            "-c",
            "performance",
        ])
        .expect("parse");
        match cli.command {
            Commands::Audit {
                target, categories, ..
            } => {
                assert_eq!(target, "https://example.com");
                assert_eq!(categories, vec!["security", "performance"]);
            }
            _ => panic!("expected audit command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from([
            "siteaudit",
            "audit",
            "https://example.com",
            "--format",
            "sarif",
        ])
        .is_err());
    }
}
