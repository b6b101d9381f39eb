//! File system walker for discovering PHP sources to scan.
//!
//! Directory traversal honors:
//! - .gitignore rules (also outside git repositories)
//! - `.callsniffignore` files
//! - Ignore patterns from configuration
//! - The configured extension list

use crate::config::ScanConfig;
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use std::path::{Path, PathBuf};

const IGNORE_FILENAME: &str = ".callsniffignore";

/// Walks directories to find files to scan
pub struct FileWalker {
    config: ScanConfig,
}

impl FileWalker {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Walk a directory and return an iterator of files to scan
    pub fn walk(&self, root: &Path) -> impl Iterator<Item = PathBuf> + '_ {
        let mut builder = WalkBuilder::new(root);

        builder
            .hidden(true) // Skip dotfiles and dot-directories
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .require_git(false) // Allow gitignore to work in non-git directories
            .add_custom_ignore_filename(IGNORE_FILENAME);

        // Ignore patterns become negated overrides
        let mut overrides = OverrideBuilder::new(root);
        for pattern in &self.config.ignore_patterns {
            if let Err(e) = overrides.add(&format!("!{pattern}")) {
                tracing::warn!(target: "walker", "Invalid ignore pattern '{pattern}': {e}");
            }
        }
        match overrides.build() {
            Ok(overrides) => {
                builder.overrides(overrides);
            }
            Err(e) => tracing::warn!(target: "walker", "Ignoring ignore patterns: {e}"),
        }

        builder
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(target: "walker", "Skipping entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(|entry| entry.into_path())
            .filter(move |path| self.has_scanned_extension(path))
    }

    /// True when the file extension is in the configured list
    pub fn has_scanned_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.config
                    .extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}
