use crate::error::{GeoschemaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable selecting the error mode
pub const ERROR_MODE_ENV: &str = "GEOSCHEMA_ERROR_MODE";

/// How a parse call reports independent failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Keep validating siblings and report every issue found
    #[default]
    Collect,
    /// Stop at the first issue
    FailFast,
}

/// Options consumed by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub error_mode: ErrorMode,
}

impl ParseOptions {
    pub fn fail_fast() -> Self {
        Self { error_mode: ErrorMode::FailFast }
    }
}

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Set programmatically by the embedding application
    Override,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Override => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for geoschema
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub error_mode: ConfigValue<ErrorMode>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            error_mode: ConfigValue::new(ErrorMode::default(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeoschemaError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeoschemaError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(error_mode) = file_config.error_mode {
            self.error_mode.update(error_mode, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(mode_str) = env::var(ERROR_MODE_ENV) {
            match parse_error_mode(&mode_str) {
                Ok(mode) => self.error_mode.update(mode, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid {} value '{}': expected collect or fail_fast",
                    ERROR_MODE_ENV,
                    mode_str
                ),
            }
        }

        self
    }

    /// Apply overrides supplied by the embedding application
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(error_mode) = overrides.error_mode {
            self.error_mode.update(error_mode, ConfigSource::Override);
        }
    }

    /// Options for the parser built from the resolved values
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions { error_mode: self.error_mode.value }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "error_mode".to_string(),
            (format!("{:?}", self.error_mode.value), self.error_mode.source),
        );

        map
    }
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    error_mode: Option<ErrorMode>,
}

/// Programmatic configuration overrides
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub error_mode: Option<ErrorMode>,
}

/// Parse error mode from string
pub fn parse_error_mode(s: &str) -> Result<ErrorMode> {
    match s.to_lowercase().replace('-', "_").as_str() {
        "collect" | "all" => Ok(ErrorMode::Collect),
        "fail_fast" | "first" => Ok(ErrorMode::FailFast),
        _ => Err(GeoschemaError::ConfigInvalid {
            key: "error_mode".to_string(),
            reason: format!("Invalid error mode: {}. Use collect or fail_fast", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.error_mode.value, ErrorMode::Collect);
        assert_eq!(config.error_mode.source, ConfigSource::Default);
        assert_eq!(config.parse_options(), ParseOptions::default());
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(ErrorMode::Collect, ConfigSource::Default);

        value.update(ErrorMode::FailFast, ConfigSource::File);
        assert_eq!(value.value, ErrorMode::FailFast);
        assert_eq!(value.source, ConfigSource::File);

        value.update(ErrorMode::Collect, ConfigSource::Override);
        assert_eq!(value.source, ConfigSource::Override);

        // Lower precedence should not override
        value.update(ErrorMode::FailFast, ConfigSource::Environment);
        assert_eq!(value.value, ErrorMode::Collect);
        assert_eq!(value.source, ConfigSource::Override);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"error_mode = "fail_fast""#).unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.error_mode.value, ErrorMode::FailFast);
        assert_eq!(config.error_mode.source, ConfigSource::File);
        assert_eq!(config.parse_options(), ParseOptions::fail_fast());
    }

    #[test]
    fn test_load_from_file_rejects_unknown_mode() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"error_mode = "sometimes""#).unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(GeoschemaError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_overrides() {
        let mut config = LayeredConfig::with_defaults();
        config.apply_overrides(ConfigOverrides { error_mode: Some(ErrorMode::FailFast) });

        assert_eq!(config.error_mode.value, ErrorMode::FailFast);
        assert_eq!(config.error_mode.source, ConfigSource::Override);
    }

    #[test]
    fn test_parse_error_mode() {
        assert_eq!(parse_error_mode("collect").unwrap(), ErrorMode::Collect);
        assert_eq!(parse_error_mode("FAIL_FAST").unwrap(), ErrorMode::FailFast);
        assert_eq!(parse_error_mode("fail-fast").unwrap(), ErrorMode::FailFast);
        assert!(parse_error_mode("invalid").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        let (value, source) = &map["error_mode"];
        assert_eq!(value, "Collect");
        assert_eq!(*source, ConfigSource::Default);
    }
}
