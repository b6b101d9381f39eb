//! CLI argument parsing using clap.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// PHP function call checker
#[derive(Parser)]
#[command(
    name = "callsniff",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check PHP function calls against call-site rules",
    long_about = "Find plain function calls in PHP sources and run the configured rules on their arguments.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize project
    #[command(about = "Set up .callsniff directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings")]
    Config,

    /// Scan files or directories
    #[command(
        about = "Check function calls in PHP files",
        after_help = "Examples:\n  callsniff check .\n  callsniff check modules/node node.module --json\n  callsniff check src --threads 4\n\nExit status:\n  0  no errors\n  1  error findings reported\n  2  some files could not be scanned"
    )]
    Check {
        /// Paths to files or directories to scan (multiple paths allowed)
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Print the scan summary as JSON
        #[arg(long)]
        json: bool,

        /// Number of threads to use (overrides config)
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Dump the token stream of a file
    #[command(about = "Print the tokens the detector sees for a PHP file")]
    Tokens {
        /// PHP file to tokenize
        file: PathBuf,
    },
}
