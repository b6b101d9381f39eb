use std::path::Path;
use std::process::ExitCode;

use callsniff::cli::commands;
use callsniff::cli::{Cli, Commands};
use callsniff::{ScanError, ScanResult, Settings};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Commands::Init { force } = cli.command {
        return commands::init::run_init(Path::new("."), force);
    }

    let config = match load_settings(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(commands::check::EXIT_FAILURES);
        }
    };

    callsniff::logging::init_with_config(&config.logging);

    let result = match cli.command {
        Commands::Init { .. } => unreachable!("handled before loading settings"),
        Commands::Config => Ok(commands::init::run_config(&config)),
        Commands::Check {
            paths,
            json,
            threads,
        } => commands::check::run(config, &paths, json, threads),
        Commands::Tokens { file } => commands::tokens::run(&file),
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        ExitCode::from(commands::check::EXIT_FAILURES)
    })
}

fn load_settings(cli: &Cli) -> ScanResult<Settings> {
    match &cli.config {
        Some(path) if !path.is_file() => Err(ScanError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
        )),
        Some(path) => Ok(Settings::load_from(path)?),
        None => Ok(Settings::load()?),
    }
}
