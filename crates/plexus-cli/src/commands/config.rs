//! Config command - View and initialize configuration
//!
//! - Show configuration file paths
//! - Show the effective (merged) configuration
//! - Create a local configuration file with defaults

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use plexus_config::{ConfigLoader, PlexusConfig};
use serde::Serialize;

use super::print_json;

/// Config management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show configuration file paths
    Path(PathArgs),

    /// Show the effective configuration
    Show(ShowArgs),

    /// Create `.plexus/config.toml` in the workspace
    Init,
}

/// Arguments for the path command
#[derive(clap::Args, Debug)]
pub struct PathArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the show command
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Output as JSON instead of TOML
    #[arg(long)]
    json: bool,
}

/// Configuration paths
#[derive(Debug, Clone, Serialize)]
pub struct ConfigPaths {
    /// Global config file path
    pub global: Option<PathBuf>,
    /// Local config file path
    pub local: PathBuf,
    /// Whether global config exists
    pub global_exists: bool,
    /// Whether local config exists
    pub local_exists: bool,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, workspace: &Path, config: &PlexusConfig) -> Result<()> {
    match cmd {
        ConfigCommand::Path(args) => execute_path(args, workspace),
        ConfigCommand::Show(args) => execute_show(args, config),
        ConfigCommand::Init => execute_init(workspace),
    }
}

fn execute_path(args: PathArgs, workspace: &Path) -> Result<()> {
    let loader = ConfigLoader::new();
    let global_path = loader.global_config_path();
    let local_path = loader.local_config_path(workspace);

    let paths = ConfigPaths {
        global_exists: global_path.as_ref().is_some_and(|p| p.exists()),
        local_exists: local_path.exists(),
        global: global_path,
        local: local_path,
    };

    if args.json {
        return print_json(&paths, true);
    }

    println!("Configuration Paths");
    println!("===================\n");

    if let Some(ref gp) = paths.global {
        println!("Global: {} ({})", gp.display(), existence(paths.global_exists));
    } else {
        println!("Global: not available (no home directory)");
    }
    println!(
        "Local:  {} ({})",
        paths.local.display(),
        existence(paths.local_exists)
    );

    Ok(())
}

fn existence(exists: bool) -> &'static str {
    if exists {
        "exists"
    } else {
        "not found"
    }
}

fn execute_show(args: ShowArgs, config: &PlexusConfig) -> Result<()> {
    if args.json {
        return print_json(config, true);
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    print!("{}", content);
    Ok(())
}

fn execute_init(workspace: &Path) -> Result<()> {
    let loader = ConfigLoader::new();
    let local_path = loader.local_config_path(workspace);
    let existed = local_path.exists();

    let path = loader
        .init_local(workspace)
        .context("Failed to initialize local configuration")?;

    if existed {
        println!("Configuration already exists at {}", path.display());
    } else {
        println!("Created {}", path.display());
    }
    Ok(())
}
