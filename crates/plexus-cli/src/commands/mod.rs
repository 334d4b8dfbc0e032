//! CLI command implementations

pub mod config;
pub mod filter;
pub mod stats;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plexus_config::{ConfigLoader, PlexusConfig};
use serde::Serialize;

use crate::GlobalOptions;

/// Resolve the workspace path from options or current directory.
pub fn resolve_workspace(global: &GlobalOptions) -> Result<PathBuf> {
    if let Some(ref ws) = global.workspace {
        if !ws.is_dir() {
            anyhow::bail!("Workspace '{}' is not a directory", ws.display());
        }
        return ws
            .canonicalize()
            .with_context(|| format!("Failed to resolve workspace '{}'", ws.display()));
    }

    std::env::current_dir().context("Failed to get current directory")
}

/// Load merged configuration with CLI overrides applied.
pub fn load_config(global: &GlobalOptions, workspace: &Path) -> Result<PlexusConfig> {
    let overrides = global.to_config_overrides();
    let config = ConfigLoader::new().load(workspace, Some(&overrides))?;
    Ok(config)
}

/// Write `value` as JSON to stdout, followed by a newline.
pub fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Print an info message to stderr (respects quiet flag).
pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", message);
    }
}
