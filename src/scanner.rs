//! Scanning driver.
//!
//! Feeds every identifier of a token stream, in document order, to the
//! call-site detector. Files are independent: each one gets its own token
//! stream, call contexts and report, so several files can be scanned in
//! parallel against one shared, read-only listener registry.

use crate::calls::{CallSiteDetector, ListenerRegistry};
use crate::config::Settings;
use crate::error::{ScanError, ScanResult};
use crate::rules::builtin_registry;
use crate::tokens::{PhpTokenizer, TokenKind, TokenStream};
use crate::types::FileReport;
use crate::walker::FileWalker;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A file that could not be scanned.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Result of scanning a set of paths.
#[derive(Debug, Default, Serialize)]
pub struct ScanSummary {
    /// One report per scanned file, sorted by path
    pub reports: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

impl ScanSummary {
    pub fn files_scanned(&self) -> usize {
        self.reports.len()
    }

    pub fn total_findings(&self) -> usize {
        self.reports.iter().map(|r| r.findings.len()).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.reports.iter().any(FileReport::has_errors)
    }
}

pub struct Scanner {
    settings: Arc<Settings>,
    registry: Arc<ListenerRegistry>,
}

impl Scanner {
    pub fn new(settings: Arc<Settings>, registry: Arc<ListenerRegistry>) -> Self {
        Self { settings, registry }
    }

    /// Scanner with the built-in rules enabled in `settings`.
    pub fn with_builtin_rules(settings: Arc<Settings>) -> Self {
        let registry = Arc::new(builtin_registry(&settings.rules));
        Self::new(settings, registry)
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// Run the detector over one token stream.
    pub fn scan_tokens(&self, path: &Path, tokens: &TokenStream) -> FileReport {
        let mut report = FileReport::new(path);
        if self.registry.is_empty() {
            return report;
        }

        let detector = CallSiteDetector::new(&self.registry);
        for token in tokens.iter().filter(|t| t.kind == TokenKind::Identifier) {
            detector.process(tokens, token.position, &mut report);
        }

        crate::debug_event!(
            "scanner",
            "scanned",
            "{} ({} tokens, {} calls, {} findings)",
            path.display(),
            tokens.len(),
            report.calls,
            report.findings.len()
        );
        report
    }

    pub fn scan_source(&self, path: &Path, code: &str) -> ScanResult<FileReport> {
        let mut tokenizer = PhpTokenizer::new()?;
        let tokens = tokenizer.tokenize(code, path)?;
        Ok(self.scan_tokens(path, &tokens))
    }

    pub fn scan_file(&self, path: &Path) -> ScanResult<FileReport> {
        let code = std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        self.scan_source(path, &code)
    }

    /// Expand directories into the files to scan. Explicit file arguments
    /// are kept whatever their extension.
    pub fn collect_files(&self, paths: &[PathBuf]) -> ScanResult<Vec<PathBuf>> {
        let walker = FileWalker::new(self.settings.scan.clone());
        let mut files = Vec::new();

        for path in paths {
            if path.is_dir() {
                files.extend(walker.walk(path));
            } else if path.is_file() {
                files.push(path.clone());
            } else {
                return Err(ScanError::Walk {
                    path: path.clone(),
                    reason: "No such file or directory".to_string(),
                });
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Scan files and directories in parallel.
    ///
    /// A file that cannot be read or tokenized is recorded as a failure and
    /// does not stop the scan.
    pub fn scan_paths(&self, paths: &[PathBuf]) -> ScanResult<ScanSummary> {
        let files = self.collect_files(paths)?;
        let threads = self.settings.scan.parallel_threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| ScanError::ThreadPool {
                reason: e.to_string(),
            })?;

        let results: Vec<(PathBuf, ScanResult<FileReport>)> = pool.install(|| {
            files
                .par_iter()
                .map(|path| (path.clone(), self.scan_file(path)))
                .collect()
        });

        let mut summary = ScanSummary::default();
        for (path, result) in results {
            match result {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    tracing::warn!(target: "scanner", "Failed to scan {}: {e}", path.display());
                    summary.failures.push(FileFailure {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        }

        crate::log_event!(
            "scanner",
            "finished",
            "{} files, {} findings, {} failures on {threads} threads",
            summary.files_scanned(),
            summary.total_findings(),
            summary.failures.len()
        );
        Ok(summary)
    }
}
