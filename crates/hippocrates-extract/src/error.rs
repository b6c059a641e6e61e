//! Extraction error types.
//!
//! This module provides error types for extraction failures, including the
//! source and role of the parameter that could not be extracted.

use hippocrates_core::HippocratesError;
use hippocrates_router::SlotRole;
use http::StatusCode;
use std::fmt;

/// Source of extraction (where a slot's value comes from).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    /// Resource coordinates in the request path (id, version).
    Path,
    /// Query string parameters.
    Query,
}

impl ExtractionSource {
    /// Returns where values for `role` are taken from.
    #[must_use]
    pub const fn for_role(role: SlotRole) -> Self {
        match role {
            SlotRole::ResourceId | SlotRole::VersionId => Self::Path,
            SlotRole::Since | SlotRole::Count => Self::Query,
        }
    }
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Query => write!(f, "query"),
        }
    }
}

/// Error that occurs during extraction.
///
/// A malformed value supplied by the client maps to HTTP 400. A value the
/// matcher should have guaranteed but that is missing at extraction time is
/// a server defect and maps to HTTP 500.
///
/// # Example
///
/// ```rust
/// use hippocrates_extract::{ExtractionError, ExtractionSource};
/// use hippocrates_router::SlotRole;
/// use http::StatusCode;
///
/// let err = ExtractionError::invalid_value(SlotRole::Count, "_count", "ten", "expected a non-negative integer");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.extraction_source(), ExtractionSource::Query);
/// assert!(err.to_string().contains("ten"));
/// ```
#[derive(Debug)]
pub struct ExtractionError {
    extraction_source: ExtractionSource,
    kind: ExtractionErrorKind,
    role: SlotRole,
    field: String,
    value: Option<String>,
    message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtractionErrorKind {
    /// Value has invalid type or format
    InvalidValue,
    /// Required value is missing though the matcher accepted the request
    MissingRequired,
}

impl ExtractionError {
    /// Creates an error for a malformed client-supplied value.
    #[must_use]
    pub fn invalid_value(
        role: SlotRole,
        field: impl Into<String>,
        value: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let value = value.into();
        let details = details.into();
        Self {
            extraction_source: ExtractionSource::for_role(role),
            kind: ExtractionErrorKind::InvalidValue,
            message: format!("Invalid {field} parameter value: {value} ({role}: {details})"),
            role,
            field,
            value: Some(value),
        }
    }

    /// Creates an error for a required value that is missing or blank.
    #[must_use]
    pub fn missing_required(role: SlotRole, field: impl Into<String>) -> Self {
        let field = field.into();
        let source = ExtractionSource::for_role(role);
        Self {
            extraction_source: source,
            kind: ExtractionErrorKind::MissingRequired,
            message: format!("{role} slot bound but {source} value '{field}' is null or blank"),
            role,
            field,
            value: None,
        }
    }

    /// Returns the extraction source.
    #[must_use]
    pub fn extraction_source(&self) -> ExtractionSource {
        self.extraction_source
    }

    /// Returns the role of the slot being filled.
    #[must_use]
    pub fn role(&self) -> SlotRole {
        self.role
    }

    /// Returns the wire name of the parameter.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the raw value that failed, if one was supplied.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns true if the client is at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.kind == ExtractionErrorKind::InvalidValue
    }

    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ExtractionErrorKind::InvalidValue => StatusCode::BAD_REQUEST,
            ExtractionErrorKind::MissingRequired => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ExtractionErrorKind::InvalidValue => "INVALID_PARAMETER",
            ExtractionErrorKind::MissingRequired => "MISSING_BOUND_VALUE",
        }
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExtractionError {}

impl From<ExtractionError> for HippocratesError {
    fn from(err: ExtractionError) -> Self {
        match err.kind {
            ExtractionErrorKind::InvalidValue => Self::InvalidRequest {
                parameter: Some(err.field.clone()),
                value: err.value.clone(),
                message: err.message,
            },
            ExtractionErrorKind::MissingRequired => {
                let message = err.message.clone();
                Self::internal_with_source(message, err)
            }
        }
    }
}
