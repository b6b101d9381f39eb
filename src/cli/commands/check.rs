//! Check command - scan paths and report findings.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;

use crate::config::Settings;
use crate::scanner::{ScanSummary, Scanner};
use crate::types::{FileReport, Severity};

/// Exit status when error findings were reported
pub const EXIT_FINDINGS: u8 = 1;
/// Exit status when at least one file could not be scanned
pub const EXIT_FAILURES: u8 = 2;

/// Run check command over `paths`.
pub fn run(
    mut config: Settings,
    paths: &[PathBuf],
    json: bool,
    threads: Option<usize>,
) -> anyhow::Result<ExitCode> {
    if let Some(t) = threads {
        config.scan.parallel_threads = t;
    }

    let scanner = Scanner::with_builtin_rules(Arc::new(config));
    if scanner.registry().is_empty() {
        eprintln!("Warning: all rules are disabled, nothing to check");
    }

    let summary = scanner.scan_paths(paths).context("Scan failed")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &summary).context("Failed to write JSON")?;
        writeln!(out)?;
    } else {
        for report in &summary.reports {
            write_report(&mut out, report)?;
        }
        for failure in &summary.failures {
            eprintln!("{}: {}", failure.path.display(), failure.error);
        }
        eprintln!("{}", summary_line(&summary));
    }

    Ok(ExitCode::from(exit_status(&summary)))
}

fn write_report(out: &mut impl Write, report: &FileReport) -> std::io::Result<()> {
    for finding in &report.findings {
        writeln!(
            out,
            "{}:{}:{}: {}: {} [{}]",
            report.path.display(),
            finding.line,
            finding.column,
            finding.severity,
            finding.message,
            finding.rule
        )?;
    }
    Ok(())
}

fn summary_line(summary: &ScanSummary) -> String {
    let count = |severity| -> usize { summary.reports.iter().map(|r| r.count(severity)).sum() };
    let mut line = format!(
        "Checked {} files: {} errors, {} warnings",
        summary.files_scanned(),
        count(Severity::Error),
        count(Severity::Warning)
    );
    if !summary.failures.is_empty() {
        line.push_str(&format!(", {} files failed", summary.failures.len()));
    }
    line
}

/// Scan failures outrank findings.
pub fn exit_status(summary: &ScanSummary) -> u8 {
    if !summary.failures.is_empty() {
        EXIT_FAILURES
    } else if summary.has_errors() {
        EXIT_FINDINGS
    } else {
        0
    }
}
