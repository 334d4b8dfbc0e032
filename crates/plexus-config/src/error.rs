//! Configuration error types.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::layer::ConfigSource;

/// File operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Read,
    CreateDir,
    Write,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileAction::Read => "read config file",
            FileAction::CreateDir => "create config directory",
            FileAction::Write => "write config file",
        })
    }
}

/// Errors raised while assembling the configuration.
///
/// Value errors name the layer the bad value came from, so a typo in the
/// global file is not blamed on the workspace.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to {action} '{path}': {source}")]
    Io {
        action: FileAction,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin} is not valid: {source}")]
    Parse {
        origin: ConfigSource,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {key} '{value}' from {origin}, expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: String,
        origin: ConfigSource,
    },
}

impl ConfigError {
    pub fn io(action: FileAction, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn parse(origin: &ConfigSource, source: toml::de::Error) -> Self {
        Self::Parse {
            origin: origin.clone(),
            source,
        }
    }

    pub fn invalid_value(
        key: &'static str,
        value: impl Into<String>,
        expected: impl Into<String>,
        origin: &ConfigSource,
    ) -> Self {
        Self::InvalidValue {
            key,
            value: value.into(),
            expected: expected.into(),
            origin: origin.clone(),
        }
    }
}
