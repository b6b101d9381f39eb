use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub type CompactString = Box<str>;

pub fn compact_string(s: &str) -> CompactString {
    s.into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single problem reported by a listener at a source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Identifier of the rule that produced this finding
    pub rule: String,
    pub severity: Severity,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
    pub message: String,
}

/// Findings collected while scanning one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub findings: Vec<Finding>,
    /// Number of call sites dispatched to listeners
    pub calls: usize,
}

impl FileReport {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            findings: Vec::new(),
            calls: 0,
        }
    }

    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> Finding {
        Finding {
            rule: "test".to_string(),
            severity,
            line: 1,
            column: 1,
            message: "message".to_string(),
        }
    }

    #[test]
    fn test_report_counts() {
        let mut report = FileReport::new("a.php");
        assert!(!report.has_errors());

        report.add(finding(Severity::Warning));
        assert!(!report.has_errors());

        report.add(finding(Severity::Error));
        report.add(finding(Severity::Error));
        assert!(report.has_errors());
        assert_eq!(report.count(Severity::Error), 2);
        assert_eq!(report.count(Severity::Warning), 1);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&finding(Severity::Error)).unwrap();
        assert!(json.contains("\"severity\":\"error\""));
    }

    #[test]
    fn test_compact_string() {
        let s = compact_string("hello world");
        assert_eq!(&*s, "hello world");
    }
}
