//! Errors raised while loading Hippocrates configuration.

use std::path::PathBuf;
use thiserror::Error;

/// A configuration layer could not be applied, or the result is invalid.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required config file does not exist.
    #[error("no config file at {}", path.display())]
    MissingFile {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// A config file exists but could not be read.
    #[error("cannot read config file {}", path.display())]
    Unreadable {
        /// Path of the file.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Config text is not a supported format.
    #[error("unsupported config format: {0} (expected toml or json)")]
    UnsupportedFormat(String),

    /// TOML config text is malformed or has unknown keys.
    #[error("malformed TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON config text is malformed or has unknown keys.
    #[error("malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A `.env` file exists but could not be parsed.
    #[error("cannot load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// An environment override has a value of the wrong type.
    #[error("bad environment override {var}: {reason}")]
    EnvOverride {
        /// Variable name, prefix included.
        var: String,
        /// What was expected.
        reason: String,
    },

    /// A loaded value failed validation.
    #[error("invalid {key}: {reason}")]
    InvalidValue {
        /// Dotted key, e.g. `client.base_url`.
        key: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn missing_file(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn env_override(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvOverride {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid value error for the dotted `key`.
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns the dotted key of an invalid value.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { key, .. } => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_culprit() {
        let err = ConfigError::missing_file("/etc/hippocrates/config.toml");
        assert_eq!(err.to_string(), "no config file at /etc/hippocrates/config.toml");

        let err = ConfigError::env_override("HIPPOCRATES__TELEMETRY__LOGGING__ENABLED", "expected boolean");
        assert_eq!(
            err.to_string(),
            "bad environment override HIPPOCRATES__TELEMETRY__LOGGING__ENABLED: expected boolean"
        );

        let err = ConfigError::UnsupportedFormat("yaml".to_string());
        assert!(err.to_string().contains("yaml"));
    }

    #[test]
    fn test_invalid_value_key() {
        let err = ConfigError::invalid_value("client.base_url", "missing host");
        assert_eq!(err.key(), Some("client.base_url"));
        assert_eq!(err.to_string(), "invalid client.base_url: missing host");

        assert_eq!(ConfigError::missing_file("x.toml").key(), None);
    }
}
