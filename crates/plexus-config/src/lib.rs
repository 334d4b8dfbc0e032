//! Plexus Configuration Management
//!
//! Configuration is assembled from layers:
//! - Defaults
//! - Global config: `~/.plexus/config.toml`
//! - Local config: `.plexus/config.toml` (in workspace)
//! - CLI overrides via `ConfigOverrides`
//!
//! Each file is read as a [`ConfigLayer`] holding only the keys it sets.
//! A key set by a later layer wins, whatever its value.

mod error;
mod layer;
mod loader;

pub use error::{ConfigError, FileAction};
pub use layer::{ConfigLayer, ConfigSource, InputLayer, LoggingLayer, OutputLayer};
pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration for Plexus.
///
/// The fully merged result of every layer.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct PlexusConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// How element files are read
    pub input: InputConfig,

    /// How filtered elements are written
    pub output: OutputConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), always lower case
    pub level: String,

    /// Log format (text, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON structured logging
    Json,
}

/// Element input settings.
///
/// # Example TOML
///
/// ```toml
/// [input]
/// format = "json-lines"
/// ```
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct InputConfig {
    /// Layout of element files
    pub format: InputFormat,
}

/// Layout of an element file.
#[derive(Debug, Clone, Copy, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum InputFormat {
    /// A single JSON array of elements
    #[default]
    Json,
    /// One JSON element per line
    JsonLines,
}

impl InputFormat {
    /// Parse a format name, blaming `origin` for an unknown one.
    pub fn resolve(name: &str, origin: &ConfigSource) -> Result<Self, ConfigError> {
        match name.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "json-lines" | "jsonl" | "ndjson" => Ok(Self::JsonLines),
            _ => Err(ConfigError::invalid_value(
                "input.format",
                name,
                "json or json-lines",
                origin,
            )),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::JsonLines => write!(f, "json-lines"),
        }
    }
}

impl FromStr for InputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s, &ConfigSource::CommandLine)
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// CLI overrides for configuration values.
///
/// Applied last, over every file layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override log level
    pub log_level: Option<String>,

    /// Override input format
    pub input_format: Option<InputFormat>,

    /// Force pretty output
    pub pretty: Option<bool>,
}

/// Lower-case `level` if it is one of [`LOG_LEVELS`].
fn resolve_level(level: &str, origin: &ConfigSource) -> Result<String, ConfigError> {
    let lowered = level.to_lowercase();
    if LOG_LEVELS.contains(&lowered.as_str()) {
        Ok(lowered)
    } else {
        Err(ConfigError::invalid_value(
            "logging.level",
            level,
            format!("one of {}", LOG_LEVELS.join(", ")),
            origin,
        ))
    }
}

impl PlexusConfig {
    /// Apply every key `layer` sets. Nothing is changed if a value is
    /// rejected.
    pub fn apply_layer(
        &mut self,
        layer: &ConfigLayer,
        origin: &ConfigSource,
    ) -> Result<(), ConfigError> {
        let level = layer
            .logging
            .level
            .as_deref()
            .map(|level| resolve_level(level, origin))
            .transpose()?;
        let input_format = layer
            .input
            .format
            .as_deref()
            .map(|name| InputFormat::resolve(name, origin))
            .transpose()?;

        if let Some(level) = level {
            self.logging.level = level;
        }
        if let Some(format) = layer.logging.format {
            self.logging.format = format;
        }
        if let Some(format) = input_format {
            self.input.format = format;
        }
        if let Some(pretty) = layer.output.pretty {
            self.output.pretty = pretty;
        }
        Ok(())
    }

    /// Apply CLI overrides to this configuration.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(ref level) = overrides.log_level {
            self.logging.level = resolve_level(level, &ConfigSource::CommandLine)?;
        }

        if let Some(format) = overrides.input_format {
            self.input.format = format;
        }

        if let Some(pretty) = overrides.pretty {
            self.output.pretty = pretty;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn local() -> ConfigSource {
        ConfigSource::Local(PathBuf::from("/ws/.plexus/config.toml"))
    }

    #[test]
    fn test_default_config() {
        let config = PlexusConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.input.format, InputFormat::Json);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = PlexusConfig::default();
        let overrides = ConfigOverrides {
            log_level: Some("DEBUG".to_string()),
            input_format: Some(InputFormat::JsonLines),
            pretty: Some(true),
        };

        config.apply_overrides(&overrides).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.input.format, InputFormat::JsonLines);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_override_with_unknown_level_names_command_line() {
        let mut config = PlexusConfig::default();
        let overrides = ConfigOverrides {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };

        let err = config.apply_overrides(&overrides).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "logging.level", ref value, origin: ConfigSource::CommandLine, .. }
                if value == "loud"
        ));
    }

    #[test]
    fn test_apply_layer_sets_default_values_explicitly() {
        let mut config = PlexusConfig::default();
        config.logging.level = "debug".to_string();
        config.output.pretty = true;

        let layer: ConfigLayer =
            toml::from_str("[logging]\nlevel = \"info\"\n[output]\npretty = false\n").unwrap();
        config.apply_layer(&layer, &local()).unwrap();

        assert_eq!(config.logging.level, "info");
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_apply_layer_rejects_without_partial_update() {
        let mut config = PlexusConfig::default();
        let layer: ConfigLayer = toml::from_str(
            "[logging]\nlevel = \"warn\"\n[input]\nformat = \"csv\"\n",
        )
        .unwrap();

        let err = config.apply_layer(&layer, &local()).unwrap_err();

        match err {
            ConfigError::InvalidValue { key, value, origin, .. } => {
                assert_eq!(key, "input.format");
                assert_eq!(value, "csv");
                assert_eq!(origin, local());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(config, PlexusConfig::default());
    }

    #[test]
    fn test_input_format_from_str() {
        assert_eq!("json".parse::<InputFormat>().unwrap(), InputFormat::Json);
        assert_eq!(
            "JSON-LINES".parse::<InputFormat>().unwrap(),
            InputFormat::JsonLines
        );
        assert_eq!(
            "ndjson".parse::<InputFormat>().unwrap(),
            InputFormat::JsonLines
        );

        let err = "csv".parse::<InputFormat>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "input.format", .. }));
        assert!(err.to_string().contains("'csv'"));
    }

    #[test]
    fn test_input_format_display() {
        assert_eq!(InputFormat::Json.to_string(), "json");
        assert_eq!(InputFormat::JsonLines.to_string(), "json-lines");
    }

    #[test]
    fn test_serialized_config_reads_back_as_layer() {
        let mut config = PlexusConfig::default();
        config.logging.format = LogFormat::Json;
        config.input.format = InputFormat::JsonLines;

        let serialized = toml::to_string_pretty(&config).unwrap();
        let layer: ConfigLayer = toml::from_str(&serialized).unwrap();
        let mut reread = PlexusConfig::default();
        reread.apply_layer(&layer, &local()).unwrap();

        assert_eq!(reread, config);
    }
}
