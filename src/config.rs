//! Configuration module for callsniff.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file (`.callsniff/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `CALLSNIFF_` and use double
//! underscores to separate nested levels:
//! - `CALLSNIFF_SCAN__PARALLEL_THREADS=8` sets `scan.parallel_threads`
//! - `CALLSNIFF_LOGGING__DEFAULT=debug` sets `logging.default`
//! - `CALLSNIFF_RULES__WATCHDOG__ENABLED=false` sets `rules.watchdog.enabled`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".callsniff";
const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "CALLSNIFF_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// File discovery and scanning
    #[serde(default)]
    pub scan: ScanConfig,

    /// Built-in call listeners
    #[serde(default)]
    pub rules: RulesConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level for all modules: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module level overrides, e.g. `detector = "trace"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScanConfig {
    /// File extensions scanned when walking directories
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Patterns to ignore when walking directories
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    /// Number of files scanned in parallel
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RulesConfig {
    /// Literal-string check for translation functions
    #[serde(default = "default_translatable_strings")]
    pub translatable_strings: RuleConfig,

    /// Message check for logging functions
    #[serde(default = "default_watchdog")]
    pub watchdog: RuleConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RuleConfig {
    /// Whether the rule is registered
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Function names the rule listens for
    #[serde(default)]
    pub functions: Vec<String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}
fn default_extensions() -> Vec<String> {
    ["php", "module", "inc", "install", "theme", "profile", "test"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_ignore_patterns() -> Vec<String> {
    vec![
        "vendor/**".to_string(),
        "node_modules/**".to_string(),
        ".git/**".to_string(),
    ]
}
fn default_translatable_strings() -> RuleConfig {
    RuleConfig {
        enabled: true,
        functions: vec!["t".to_string()],
    }
}
fn default_watchdog() -> RuleConfig {
    RuleConfig {
        enabled: true,
        functions: vec!["watchdog".to_string()],
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            logging: LoggingConfig::default(),
            scan: ScanConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            translatable_strings: default_translatable_strings(),
            watchdog: default_watchdog(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore_patterns: default_ignore_patterns(),
            parallel_threads: default_parallel_threads(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still honoring environment
    /// overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels, single underscore
            // stays part of the field name
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find `.callsniff/settings.toml` searching from the current directory
    /// up to the root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join(CONFIG_FILE))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file under `root`
    pub fn init_config_file(
        root: impl AsRef<Path>,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = root.as_ref().join(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.logging.default, "warn");
        assert!(settings.scan.parallel_threads > 0);
        assert!(settings.scan.extensions.contains(&"module".to_string()));
        assert_eq!(settings.rules.translatable_strings.functions, vec!["t"]);
        assert!(settings.rules.watchdog.enabled);
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        let toml_content = r#"
version = 2

[scan]
parallel_threads = 4
extensions = ["php"]

[rules.translatable_strings]
functions = ["t", "st", "get_t"]

[rules.watchdog]
enabled = false
"#;

        fs::write(&config_path, toml_content).unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.version, 2);
        assert_eq!(settings.scan.parallel_threads, 4);
        assert_eq!(settings.scan.extensions, vec!["php"]);
        assert_eq!(
            settings.rules.translatable_strings.functions,
            vec!["t", "st", "get_t"]
        );
        assert!(settings.rules.translatable_strings.enabled);
        assert!(!settings.rules.watchdog.enabled);
        // Untouched sections keep their defaults
        assert!(!settings.scan.ignore_patterns.is_empty());
        assert_eq!(settings.logging.default, "warn");
    }

    #[test]
    fn test_save_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        let mut settings = Settings::default();
        settings.scan.parallel_threads = 2;
        settings.logging.modules.insert("detector".to_string(), "trace".to_string());

        settings.save(&config_path).unwrap();

        let loaded = Settings::load_from(&config_path).unwrap();
        assert_eq!(loaded.scan.parallel_threads, 2);
        assert_eq!(loaded.logging.modules["detector"], "trace");
    }

    #[test]
    fn test_init_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let path = Settings::init_config_file(temp_dir.path(), false).unwrap();
        assert!(path.ends_with(".callsniff/settings.toml"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[scan]"));
        assert!(content.contains("[rules.translatable_strings]"));

        assert!(Settings::init_config_file(temp_dir.path(), false).is_err());
        assert!(Settings::init_config_file(temp_dir.path(), true).is_ok());
    }
}
