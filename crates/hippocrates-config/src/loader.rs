//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, files, and environment variables.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use crate::{ConfigError, HippocratesConfig, LogFormat};

/// Configuration loader with layered approach.
///
/// Later layers override earlier ones:
/// 1. Default values (built into the code)
/// 2. Configuration file (TOML or JSON)
/// 3. Environment variables (`PREFIX__SECTION__KEY`)
///
/// # Example
///
/// ```no_run
/// use hippocrates_config::ConfigLoader;
///
/// # fn main() -> Result<(), hippocrates_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_file("hippocrates.toml")?
///     .with_env_prefix("HIPPOCRATES")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: HippocratesConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: HippocratesConfig::default(),
            env_prefix: None,
        }
    }

    /// Start with default configuration values.
    ///
    /// This is called automatically by `new()`, but can be chained for clarity.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = HippocratesConfig::default();
        self
    }

    /// Start with development preset configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use hippocrates_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_development()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.telemetry.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = HippocratesConfig::development();
        self
    }

    /// Start with production preset configuration.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = HippocratesConfig::production();
        self
    }

    /// Load configuration from a file.
    ///
    /// Supports TOML (.toml) and JSON (.json) formats, chosen by extension.
    ///
    /// # Errors
    ///
    /// `MissingFile` or `Unreadable` if the file cannot be read,
    /// `UnsupportedFormat` for any other extension, and `Toml` / `Json` for
    /// malformed content or unknown keys.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::missing_file(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::unreadable(path, e))?;

        self.config = Self::parse_file(&content, path)?;
        Ok(self)
    }

    /// Load configuration from an optional file.
    ///
    /// If the file exists, loads it. If not, silently continues.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails or `format` is not `toml` or
    /// `json`.
    ///
    /// # Example
    ///
    /// ```
    /// use hippocrates_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [client]
    ///     base_url = "https://fhir.example.org/r4"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.client.base_url.as_deref(), Some("https://fhir.example.org/r4"));
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => return Err(ConfigError::UnsupportedFormat(format.to_string())),
        };
        Ok(self)
    }

    /// Set environment variable prefix for overrides.
    ///
    /// Environment variables use the format `PREFIX__SECTION__KEY`.
    /// For example, with prefix "HIPPOCRATES":
    /// - `HIPPOCRATES__CLIENT__BASE_URL=https://fhir.example.org/r4`
    /// - `HIPPOCRATES__TELEMETRY__LOGGING__LEVEL=debug`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load a `.env` file into the process environment, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a `.env` file exists but cannot be parsed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(e.into()),
        }
    }

    /// Finalize and return the loaded configuration.
    ///
    /// Applies environment variable overrides (if a prefix was set) and
    /// validates the final configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an environment override cannot be parsed or
    /// validation fails.
    pub fn load(mut self) -> Result<HippocratesConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;

        Ok(self.config)
    }

    /// Finalize without validation.
    #[must_use]
    pub fn load_unvalidated(self) -> HippocratesConfig {
        self.config
    }

    fn parse_file(content: &str, path: &Path) -> Result<HippocratesConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let env_vars: HashMap<String, String> = env::vars()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect();

        for (key, value) in env_vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(key_without_prefix) = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
        else {
            // Shares the prefix but not the separator, e.g. HIPPOCRATES_HOME.
            return Ok(());
        };

        let parts: Vec<&str> = key_without_prefix.split("__").collect();

        match parts.as_slice() {
            ["CLIENT", "BASE_URL"] => {
                self.config.client.base_url = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }

            ["TELEMETRY", "LOGGING", "ENABLED"] => {
                self.config.telemetry.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_override(key, "expected boolean"))?;
            }
            ["TELEMETRY", "LOGGING", "LEVEL"] => {
                self.config.telemetry.logging.level = value.to_string();
            }
            ["TELEMETRY", "LOGGING", "FORMAT"] => {
                self.config.telemetry.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_override(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }
            ["TELEMETRY", "LOGGING", "INCLUDE_LOCATION"] => {
                self.config.telemetry.logging.include_location = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_override(key, "expected boolean"))?;
            }

            _ => {}
        }

        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loader_new() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, HippocratesConfig::default());
    }

    #[test]
    fn test_loader_with_development() {
        let config = ConfigLoader::new().with_development().load().unwrap();
        assert_eq!(config.telemetry.logging.level, "debug");
        assert_eq!(config.telemetry.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_loader_with_production() {
        let config = ConfigLoader::new().with_production().load().unwrap();
        assert_eq!(config.telemetry.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_loader_with_string_json() {
        let json = r#"{"client": {"base_url": "http://localhost:8080/fhir"}}"#;

        let config = ConfigLoader::new()
            .with_string(json, "json")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(
            config.client.base_url.as_deref(),
            Some("http://localhost:8080/fhir")
        );
    }

    #[test]
    fn test_loader_with_unsupported_format() {
        let result = ConfigLoader::new().with_string("client: {}", "yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_loader_rejects_unknown_fields() {
        let toml = r#"
            [client]
            base_url = "http://localhost"
            retries = 3
        "#;
        let result = ConfigLoader::new().with_string(toml, "toml");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_loader_validates_on_load() {
        let toml = r#"
            [client]
            base_url = "localhost:8080"
        "#;
        let result = ConfigLoader::new().with_string(toml, "toml").unwrap().load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_loader_with_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
            [client]
            base_url = "https://fhir.example.org/r4"

            [telemetry.logging]
            level = "warn"
            format = "pretty"
            "#
        )
        .unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert_eq!(
            config.client.base_url.as_deref(),
            Some("https://fhir.example.org/r4")
        );
        assert_eq!(config.telemetry.logging.level, "warn");
        assert_eq!(config.telemetry.logging.format, LogFormat::Pretty);
        assert!(config.telemetry.logging.enabled);
    }

    #[test]
    fn test_loader_with_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"telemetry": {{"logging": {{"enabled": false}}}}}}"#).unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert!(!config.telemetry.logging.enabled);
    }

    #[test]
    fn test_loader_with_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let result = ConfigLoader::new().with_file(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_loader_with_file_not_found() {
        let result = ConfigLoader::new().with_file("/nonexistent/hippocrates.toml");
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn test_loader_with_optional_file_not_found() {
        let config = ConfigLoader::new()
            .with_optional_file("/nonexistent/hippocrates.toml")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config, HippocratesConfig::default());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("No"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    // Overrides are exercised through apply_env_var directly: mutating the
    // process environment requires unsafe code, which this crate forbids.

    #[test]
    fn test_apply_env_var_client() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("TEST__CLIENT__BASE_URL", "http://fhir:8080", "TEST")
            .unwrap();
        assert_eq!(loader.config.client.base_url.as_deref(), Some("http://fhir:8080"));

        loader.apply_env_var("TEST__CLIENT__BASE_URL", "", "TEST").unwrap();
        assert!(loader.config.client.base_url.is_none());
    }

    #[test]
    fn test_apply_env_var_logging() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("TEST__TELEMETRY__LOGGING__LEVEL", "debug", "TEST")
            .unwrap();
        loader
            .apply_env_var("TEST__TELEMETRY__LOGGING__FORMAT", "Pretty", "TEST")
            .unwrap();
        loader
            .apply_env_var("TEST__TELEMETRY__LOGGING__INCLUDE_LOCATION", "yes", "TEST")
            .unwrap();

        let logging = &loader.config.telemetry.logging;
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Pretty);
        assert!(logging.include_location);
    }

    #[test]
    fn test_apply_env_var_invalid_values() {
        let mut loader = ConfigLoader::new();
        let err = loader
            .apply_env_var("TEST__TELEMETRY__LOGGING__ENABLED", "sometimes", "TEST")
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvOverride { .. }));

        let err = loader
            .apply_env_var("TEST__TELEMETRY__LOGGING__FORMAT", "xml", "TEST")
            .unwrap_err();
        assert!(err.to_string().contains("TEST__TELEMETRY__LOGGING__FORMAT"));
    }

    #[test]
    fn test_apply_env_var_ignores_unrelated_keys() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST_HOME", "/opt", "TEST").unwrap();
        loader.apply_env_var("TEST__SERVER__PORT", "8080", "TEST").unwrap();
        assert_eq!(loader.config, HippocratesConfig::default());
    }
}
