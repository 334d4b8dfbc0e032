//! Locating and reading config layers.
//!
//! Layers apply in order: defaults, `~/.plexus/config.toml`,
//! `<workspace>/.plexus/config.toml`, then CLI overrides. A missing file
//! is an empty layer.

use crate::error::{ConfigError, FileAction};
use crate::layer::{ConfigLayer, ConfigSource};
use crate::{ConfigOverrides, PlexusConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory holding the config file, both under home and in a workspace.
const CONFIG_DIR: &str = ".plexus";

/// Written by `init_local`. Every key is commented out so a fresh
/// workspace file does not mask the global one.
const LOCAL_TEMPLATE: &str = r#"# plexus workspace configuration
#
# Uncomment a key to override ~/.plexus/config.toml for this workspace.

[logging]
# level = "info"    # trace, debug, info, warn, error
# format = "text"   # text, json

[input]
# format = "json"   # json, json-lines

[output]
# pretty = false
"#;

/// Finds the global and workspace config files and folds them together.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Global config directory (e.g., `~/.plexus`); `None` without a home
    global_config_dir: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader using `~/.plexus` for the global layer.
    pub fn new() -> Self {
        Self {
            global_config_dir: dirs::home_dir().map(|h| h.join(CONFIG_DIR)),
        }
    }

    /// Loader with a custom global config directory.
    pub fn with_global_dir(global_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_config_dir: Some(global_dir.into()),
        }
    }

    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.global_config_dir
            .as_ref()
            .map(|d| d.join(CONFIG_FILE_NAME))
    }

    pub fn local_config_path(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(CONFIG_DIR).join(CONFIG_FILE_NAME)
    }

    /// The file layers that exist for `workspace_root`, global first.
    pub fn layers(
        &self,
        workspace_root: &Path,
    ) -> Result<Vec<(ConfigSource, ConfigLayer)>, ConfigError> {
        if self.global_config_dir.is_none() {
            debug!("No home directory found, skipping global config");
        }
        let candidates = self
            .global_config_path()
            .map(ConfigSource::Global)
            .into_iter()
            .chain(Some(ConfigSource::Local(self.local_config_path(workspace_root))));

        let mut layers = Vec::new();
        for origin in candidates {
            if let Some(layer) = read_layer(&origin)? {
                layers.push((origin, layer));
            }
        }
        Ok(layers)
    }

    /// Merge every layer for `workspace_root`, then `overrides`.
    pub fn load(
        &self,
        workspace_root: &Path,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<PlexusConfig, ConfigError> {
        let mut config = PlexusConfig::default();

        for (origin, layer) in self.layers(workspace_root)? {
            config.apply_layer(&layer, &origin)?;
        }

        if let Some(ovr) = overrides {
            config.apply_overrides(ovr)?;
        }

        Ok(config)
    }

    /// Create `.plexus/config.toml` in a workspace from the commented
    /// template. An existing file is left untouched. Returns the path.
    pub fn init_local(&self, workspace_root: &Path) -> Result<PathBuf, ConfigError> {
        let config_path = self.local_config_path(workspace_root);
        if config_path.exists() {
            debug!("Local config already exists at {:?}", config_path);
            return Ok(config_path);
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::io(FileAction::CreateDir, parent, e))?;
        }
        std::fs::write(&config_path, LOCAL_TEMPLATE)
            .map_err(|e| ConfigError::io(FileAction::Write, &config_path, e))?;
        debug!("Created local config at {:?}", config_path);
        Ok(config_path)
    }
}

/// Read the layer behind `origin`; `None` if its file does not exist.
fn read_layer(origin: &ConfigSource) -> Result<Option<ConfigLayer>, ConfigError> {
    let Some(path) = origin.path() else {
        return Ok(None);
    };
    if !path.exists() {
        trace!("No {}", origin);
        return Ok(None);
    }

    debug!("Reading {}", origin);
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::io(FileAction::Read, path, e))?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::parse(origin, e))
}
