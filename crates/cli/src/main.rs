//! panscan CLI — recursive PAN discovery scans from the terminal.
//!
//! Calls `panscan-core` directly; the full CLI surface (config files,
//! exclusion lists, report writers) is out of scope, but this binary
//! exercises the engine end to end so the crate has a real entry point.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use panscan_core::config::Config;
use panscan_core::{Engine, PatternSet};

/// panscan — find primary account numbers hiding in a directory tree.
#[derive(Parser)]
#[command(name = "panscan", version, about)]
struct Cli {
    /// Directory (or single file) to scan
    path: PathBuf,

    /// Output as JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Maximum payload size, in bytes, considered for scanning
    #[arg(long)]
    size_limit_bytes: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();

    let mut config = Config::new(&cli.path);
    if let Some(limit) = cli.size_limit_bytes {
        config.size_limit_bytes = limit;
    }

    let engine = Engine::new(config, PatternSet::new());
    let report = match engine.run() {
        Ok(report) => report,
        Err(e) => {
            // Fatal per spec §4.8: a queue invariant was violated. Per-file
            // failures never reach this path — they're in report.failures.
            eprintln!("scan aborted: {e}");
            std::process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("failed to render report as JSON: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print_text_report(&report);
    }
}

fn print_text_report(report: &panscan_core::ScanReport) {
    println!(
        "scanned {} in {:.2?}: {} PAN(s) found, {} failure(s)",
        report.metadata.search_root.display(),
        report.metadata.elapsed,
        report.metadata.total_pan_count,
        report.failures.len(),
    );

    for finding in &report.successes {
        for pan in &finding.matches {
            println!("{}: {pan}", finding.abspath.display());
        }
    }

    for finding in &report.failures {
        for err in &finding.errors {
            eprintln!("{}: {err}", finding.abspath.display());
        }
    }
}
