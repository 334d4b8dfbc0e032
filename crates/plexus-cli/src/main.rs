//! Plexus CLI - Filter and inspect graph element files
//!
//! Reads entities and edges from JSON (or JSON lines) files and runs the
//! Plexus filter operation over them.
//!
//! # Usage
//!
//! ```bash
//! # Keep only BasicEdge2 edges (entities pass, no entity group is registered)
//! plexus filter --input elements.json --edge BasicEdge2
//!
//! # Keep every element whose count is more than 2
//! plexus filter --input elements.json --more-than count=2
//!
//! # Count elements per group
//! plexus stats --input elements.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use plexus_config::{ConfigError, InputFormat, LogFormat, PlexusConfig};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;
mod input;

/// Plexus - graph element filtering
#[derive(Parser, Debug)]
#[command(name = "plexus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Args, Debug, Clone)]
struct GlobalOptions {
    /// Workspace directory holding `.plexus/config.toml`
    #[arg(long, short = 'w', global = true, env = "PLEXUS_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Element file format (json, json-lines)
    #[arg(long, global = true, env = "PLEXUS_INPUT_FORMAT", value_parser = parse_input_format)]
    format: Option<InputFormat>,
}

/// Parse input format from string
fn parse_input_format(s: &str) -> Result<InputFormat, String> {
    s.parse().map_err(|e: ConfigError| e.to_string())
}

impl GlobalOptions {
    /// Convert global options to config overrides
    pub fn to_config_overrides(&self) -> plexus_config::ConfigOverrides {
        let log_level = if self.quiet {
            Some("error".to_string())
        } else if self.verbose {
            Some("debug".to_string())
        } else {
            None
        };

        plexus_config::ConfigOverrides {
            log_level,
            input_format: self.format,
            ..Default::default()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Filter an element file by group allow-lists and property tests
    Filter(commands::filter::FilterArgs),

    /// Count the elements of a file per kind and group
    Stats(commands::stats::StatsArgs),

    /// View and manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

/// Install the stderr subscriber. `PLEXUS_LOG` takes precedence over the
/// configured level.
fn init_logging(config: &PlexusConfig) -> Result<()> {
    let filter = EnvFilter::try_from_env("PLEXUS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.to_lowercase()));

    match config.logging.format {
        LogFormat::Text => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Json => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let workspace = commands::resolve_workspace(&cli.global)?;
    let config = commands::load_config(&cli.global, &workspace)
        .context("Failed to load configuration")?;

    init_logging(&config)?;

    match cli.command {
        Commands::Filter(args) => commands::filter::execute(args, &cli.global, &config),
        Commands::Stats(args) => commands::stats::execute(args, &cli.global, &config),
        Commands::Config(cmd) => commands::config::execute(cmd, &workspace, &config),
    }
}
