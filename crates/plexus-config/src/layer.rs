//! Partial configuration read from one file.
//!
//! Every key is optional. A key present in a layer replaces whatever an
//! earlier layer said, even when it spells out the default value.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::LogFormat;

/// Where a layer, or a single value, came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `~/.plexus/config.toml`
    Global(PathBuf),
    /// `<workspace>/.plexus/config.toml`
    Local(PathBuf),
    /// Flags and environment variables
    CommandLine,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Global(path) | ConfigSource::Local(path) => Some(path),
            ConfigSource::CommandLine => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Global(path) => write!(f, "global config '{}'", path.display()),
            ConfigSource::Local(path) => write!(f, "local config '{}'", path.display()),
            ConfigSource::CommandLine => f.write_str("the command line"),
        }
    }
}

/// The keys one config file sets.
///
/// Unknown keys are rejected so a misspelt key does not silently fall
/// back to an earlier layer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub logging: LoggingLayer,
    pub input: InputLayer,
    pub output: OutputLayer,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingLayer {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

/// `input.format` stays a string until the layer is applied, so a bad
/// value is reported with its key and file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputLayer {
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputLayer {
    pub pretty: Option<bool>,
}

impl ConfigLayer {
    /// Whether the layer sets no key at all.
    pub fn is_empty(&self) -> bool {
        *self == ConfigLayer::default()
    }
}
