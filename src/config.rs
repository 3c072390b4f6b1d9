//! Configuration for the device information collector.
//!
//! The collector never writes configuration. Hosts hand it over as JSON,
//! typically from a bundled asset, or leave every field at its default.

use crate::core::classify::PC_FEATURE;
use crate::core::timestamp::TimestampStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Whether to probe the Facebook attribution provider
    pub facebook_attribution: bool,

    /// How install/update times are rendered
    pub timestamp_style: TimestampStyle,

    /// System feature that marks Google Play Games for PC
    pub pc_feature: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            facebook_attribution: true,
            timestamp_style: TimestampStyle::IsoOffset,
            pc_feature: PC_FEATURE.to_string(),
        }
    }
}

impl CollectorConfig {
    /// Parse configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration from a file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CollectorConfig::default();
        assert!(config.facebook_attribution);
        assert_eq!(config.timestamp_style, TimestampStyle::IsoOffset);
        assert_eq!(config.pc_feature, PC_FEATURE);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CollectorConfig::from_json(r#"{"timestamp_style": "utc_seconds"}"#).unwrap();
        assert_eq!(config.timestamp_style, TimestampStyle::UtcSeconds);
        assert!(config.facebook_attribution);
    }

    #[test]
    fn test_json_round_trip() {
        let config = CollectorConfig {
            facebook_attribution: false,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(CollectorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = CollectorConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("noctua-device-info-missing-config.json");
        let config = CollectorConfig::load(&path).unwrap();
        assert_eq!(config, CollectorConfig::default());
    }
}
