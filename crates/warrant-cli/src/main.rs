//! Warrant CLI - fail-closed review of a project description.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use warrant_cli::commands;
use warrant_cli::{Cli, Command, Config, Formatter};

fn main() {
    match run() {
        Ok(true) => {}
        // A scan that found error-severity violations
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns false when the command ran but its check failed
fn run() -> anyhow::Result<bool> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config from the given path or ~/.warrant/config.toml
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Run(args) => {
            let input = args.input.display().to_string();
            commands::execute_run(args, &config, &formatter)
                .with_context(|| format!("review of {} failed", input))?;
        }
        Command::Classify(args) => {
            commands::execute_classify(args, &config, &formatter)?;
        }
        Command::Params(args) => {
            commands::execute_params(args, &formatter)?;
        }
        Command::Scan(args) => {
            return commands::execute_scan(args, &config, &formatter)
                .context("document scan failed");
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
    }

    Ok(true)
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
