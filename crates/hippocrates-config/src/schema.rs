//! Configuration section types.

use hippocrates_telemetry::LogConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::ConfigError;

const BASE_URL_KEY: &str = "client.base_url";

/// Outbound client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL that built invocations are resolved against, e.g.
    /// `https://fhir.example.org/r4`.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ClientConfig {
    /// Parses and checks the base URL, if one is set.
    ///
    /// The base must be an absolute `http` or `https` URL with a host and
    /// without a query or fragment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming `client.base_url`.
    pub fn parsed_base_url(&self) -> Result<Option<Url>, ConfigError> {
        let Some(raw) = self.base_url.as_deref() else {
            return Ok(None);
        };

        let url = Url::parse(raw)
            .map_err(|e| ConfigError::invalid_value(BASE_URL_KEY, format!("{e}: {raw}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid_value(
                BASE_URL_KEY,
                format!("expected an http or https URL, got scheme {}", url.scheme()),
            ));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::invalid_value(
                BASE_URL_KEY,
                format!("missing host: {raw}"),
            ));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::invalid_value(
                BASE_URL_KEY,
                format!("must not carry a query or fragment: {raw}"),
            ));
        }

        Ok(Some(url))
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Converts this section into the subscriber settings used by
    /// [`hippocrates_telemetry::init_logging`].
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            json_format: self.format == LogFormat::Json,
            file_line_info: self.include_location,
            include_target: true,
        }
    }
}

/// Telemetry configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfigSection {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_deserialize() {
        let format: LogFormat = serde_json::from_str(r#""json""#).unwrap();
        assert_eq!(format, LogFormat::Json);

        let format: LogFormat = serde_json::from_str(r#""pretty""#).unwrap();
        assert_eq!(format, LogFormat::Pretty);
    }

    #[test]
    fn test_to_log_config() {
        let config = LoggingConfig {
            level: "hippocrates_server=debug".to_string(),
            format: LogFormat::Pretty,
            include_location: true,
            ..Default::default()
        };

        let log_config = config.to_log_config();
        assert!(!log_config.json_format);
        assert!(log_config.file_line_info);
        assert_eq!(log_config.level, "hippocrates_server=debug");
    }

    #[test]
    fn test_parsed_base_url() {
        let config = ClientConfig {
            base_url: Some("https://fhir.example.org/r4".to_string()),
        };
        let url = config.parsed_base_url().unwrap().unwrap();
        assert_eq!(url.host_str(), Some("fhir.example.org"));
        assert_eq!(url.path(), "/r4");

        assert!(ClientConfig::default().parsed_base_url().unwrap().is_none());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<ClientConfig, _> =
            serde_json::from_str(r#"{"base_url": "http://x", "timeout": 3}"#);
        assert!(result.is_err());
    }
}
