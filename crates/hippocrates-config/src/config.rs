//! Main configuration type.

use serde::{Deserialize, Serialize};

use crate::{ClientConfig, ConfigError, LogFormat, LoggingConfig, TelemetryConfigSection};

/// Complete Hippocrates configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use hippocrates_config::HippocratesConfig;
///
/// let config = HippocratesConfig::default();
/// assert!(config.client.base_url.is_none());
/// assert_eq!(config.telemetry.logging.level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct HippocratesConfig {
    /// Outbound client configuration.
    #[serde(default)]
    pub client: ClientConfig,

    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfigSection,
}

impl HippocratesConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - the client base URL is set but is not an absolute http(s) URL
    /// - the log level is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.client.parsed_base_url()?;

        if self.telemetry.logging.enabled {
            hippocrates_telemetry::create_env_filter(&self.telemetry.logging.level).map_err(
                |e| ConfigError::invalid_value("telemetry.logging.level", e.to_string()),
            )?;
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty output at debug level, with source locations.
    ///
    /// # Example
    ///
    /// ```
    /// use hippocrates_config::{HippocratesConfig, LogFormat};
    ///
    /// let config = HippocratesConfig::development();
    /// assert_eq!(config.telemetry.logging.format, LogFormat::Pretty);
    /// ```
    #[must_use]
    pub fn development() -> Self {
        Self {
            client: ClientConfig::default(),
            telemetry: TelemetryConfigSection {
                logging: LoggingConfig {
                    enabled: true,
                    level: "debug".to_string(),
                    format: LogFormat::Pretty,
                    include_location: true,
                },
            },
        }
    }

    /// Create a production configuration preset.
    ///
    /// JSON output at info level.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }
}
