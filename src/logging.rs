//! Logging setup for the scanner and CLI.
//!
//! Compact timestamped output on stderr with per-module levels. The
//! `RUST_LOG` environment variable overrides the configured filter.
//!
//! # Configuration
//!
//! ```toml
//! [logging]
//! default = "warn"     # quiet by default
//!
//! [logging.modules]
//! detector = "trace"   # show rejected call candidates
//! scanner = "debug"    # per-file results
//! ```
//!
//! # Environment Variable
//!
//! ```bash
//! RUST_LOG=debug callsniff check src
//! RUST_LOG=detector=trace callsniff check module.php
//! ```

use std::sync::Once;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Build the filter directive string from configuration.
fn filter_directives(config: &LoggingConfig) -> String {
    let mut modules: Vec<(&String, &String)> = config.modules.iter().collect();
    modules.sort();

    let mut directives = config.default.clone();
    for (module, level) in modules {
        directives.push_str(&format!(",{module}={level}"));
    }
    directives
}

/// Initialize logging with configuration.
///
/// Only the first call takes effect.
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_directives(config))
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter);

        tracing_subscriber::registry().with(fmt_layer).init();
    });
}

/// Log an event for a component. The component doubles as the tracing
/// target, so `[logging.modules]` entries filter by it.
///
/// # Examples
/// ```ignore
/// log_event!("scanner", "finished", "{} files", count);
/// ```
#[macro_export]
macro_rules! log_event {
    ($component:literal, $event:expr) => {
        tracing::info!(target: $component, "{}", $event)
    };
    ($component:literal, $event:expr, $($arg:tt)*) => {
        tracing::info!(target: $component, "{}: {}", $event, format!($($arg)*))
    };
}

/// Debug-only event logging.
///
/// # Examples
/// ```ignore
/// debug_event!("detector", "call", "{}() at {}", name, line);
/// ```
#[macro_export]
macro_rules! debug_event {
    ($component:literal, $event:expr) => {
        tracing::debug!(target: $component, "{}", $event)
    };
    ($component:literal, $event:expr, $($arg:tt)*) => {
        tracing::debug!(target: $component, "{}: {}", $event, format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        let mut config = LoggingConfig::default();
        assert_eq!(filter_directives(&config), "warn");

        config.modules.insert("scanner".to_string(), "debug".to_string());
        config.modules.insert("detector".to_string(), "trace".to_string());
        assert_eq!(
            filter_directives(&config),
            "warn,detector=trace,scanner=debug"
        );
    }
}
