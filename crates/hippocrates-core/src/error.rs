//! Error types for Hippocrates.
//!
//! This module provides the [`HippocratesError`] type, the single error type
//! returned across crate boundaries by the binding engine.
//!
//! | Category | Raised by | Status |
//! |---|---|---|
//! | `Configuration` | descriptor resolution, registry construction | 500 |
//! | `InvalidRequest` | parameter coercion, outbound build validation | 400 |
//! | `NotFound` | dispatch with no matching descriptor | 404 |
//! | `Internal` | handler failure, descriptor invariant violated at dispatch | 500 |
//!
//! Configuration errors are fatal at startup; the others are per call and are
//! never retried by the engine.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`HippocratesError`].
pub type HippocratesResult<T> = Result<T, HippocratesError>;

/// Categories of errors for classification and handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Ambiguous or unresolvable binding detected at registration.
    Configuration,
    /// Malformed client input (bad parameter value, missing id).
    InvalidRequest,
    /// No bound operation matches the request.
    NotFound,
    /// Server defect or handler failure.
    Internal,
}

impl ErrorCategory {
    /// Returns the default HTTP status code for this error category.
    #[must_use]
    pub const fn default_status_code(&self) -> StatusCode {
        match self {
            Self::Configuration | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Returns true if the error is attributable to the caller.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest | Self::NotFound)
    }
}

/// Standard error type for Hippocrates.
///
/// # Example
///
/// ```
/// use hippocrates_core::{ErrorCategory, HippocratesError};
///
/// let err = HippocratesError::invalid_parameter("_count", "abc", "expected a non-negative integer");
/// assert_eq!(err.category(), ErrorCategory::InvalidRequest);
/// assert_eq!(err.parameter(), Some("_count"));
/// assert!(err.to_string().contains("abc"));
/// ```
#[derive(Error, Debug)]
pub enum HippocratesError {
    /// A binding could not be turned into a usable descriptor.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Human-readable error message.
        message: String,
        /// The binding (handler name) at fault, if known.
        binding: Option<String>,
    },

    /// The request (incoming or outbound) carries an invalid value.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Human-readable error message.
        message: String,
        /// Wire name of the offending parameter.
        parameter: Option<String>,
        /// Raw value that failed validation.
        value: Option<String>,
    },

    /// No registered operation matches the request.
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message.
        message: String,
    },

    /// Internal error.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
        /// The underlying error (not exposed to clients).
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl HippocratesError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            binding: None,
        }
    }

    /// Creates a configuration error attributed to a named binding.
    #[must_use]
    pub fn configuration_for(binding: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            binding: Some(binding.into()),
        }
    }

    /// Creates an invalid request error without parameter context.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            parameter: None,
            value: None,
        }
    }

    /// Creates an invalid request error for a malformed parameter value.
    #[must_use]
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl Into<String>,
        details: impl AsRef<str>,
    ) -> Self {
        let parameter = parameter.into();
        let value = value.into();
        Self::InvalidRequest {
            message: format!(
                "Invalid {parameter} parameter value: {value} ({})",
                details.as_ref()
            ),
            parameter: Some(parameter),
            value: Some(value),
        }
    }

    /// Creates an invalid request error for a required value that is missing.
    #[must_use]
    pub fn missing_parameter(parameter: impl Into<String>) -> Self {
        let parameter = parameter.into();
        Self::InvalidRequest {
            message: format!("{parameter} can not be null or blank"),
            parameter: Some(parameter),
            value: None,
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an internal error with a source error.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::InvalidRequest { .. } => ErrorCategory::InvalidRequest,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.category().default_status_code()
    }

    /// Returns the wire name of the offending parameter, if any.
    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::InvalidRequest { parameter, .. } => parameter.as_deref(),
            _ => None,
        }
    }

    /// Converts this error to a serializable error envelope.
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                category: self.category(),
                details: self.error_details(),
            },
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::InvalidRequest { .. } => "INVALID_REQUEST",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            Self::InvalidRequest {
                parameter: Some(parameter),
                value,
                ..
            } => Some(serde_json::json!({
                "parameter": parameter,
                "value": value,
            })),
            Self::Configuration {
                binding: Some(binding),
                ..
            } => Some(serde_json::json!({ "binding": binding })),
            _ => None,
        }
    }
}

/// Serializable error envelope for the transport boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The error details.
    pub error: ErrorDetail,
}

/// Error detail within an envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Error category.
    pub category: ErrorCategory,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
