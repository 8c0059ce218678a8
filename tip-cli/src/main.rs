use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use tip_cli::{AppConfig, Shell, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Bill and tip calculator.
///
/// Enter a bill amount the way you would on the phone screen, move the tip
/// slider, and read off the tip and total.
#[derive(Debug, Parser)]
#[command(name = "tip-calc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML settings file (labels, currency, slider range).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `tip_core=trace`. Overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Compute one result and exit.
    Calc {
        /// Bill amount as typed into the field, e.g. `45` or `12.5`.
        #[arg(short, long, allow_hyphen_values = true)]
        bill: String,

        /// Tip percentage; defaults to the configured slider position.
        #[arg(short, long)]
        percent: Option<i64>,
    },

    /// Read keystrokes and commands from stdin (the default).
    Interactive,
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    logging::init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }
    debug!("configuration:\n{}", config);

    let default_percent = i64::from(config.default_percent);
    let mut shell = Shell::new(config)?;

    match cli.mode.unwrap_or(Mode::Interactive) {
        Mode::Calc { bill, percent } => {
            let label = shell.calculate_once(&bill, percent.unwrap_or(default_percent))?;
            println!("{label}");
        }
        Mode::Interactive => {
            info!("reading commands from stdin; :help for a list");
            shell.run(io::stdin().lock(), io::stdout().lock())?;
        }
    }

    logging::disable_file_logging();
    Ok(())
}
