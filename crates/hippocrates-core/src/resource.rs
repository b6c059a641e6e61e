//! Minimal resource value.
//!
//! The resource data model is owned by the surrounding system. The engine
//! only needs to carry what handlers produce, so [`Resource`] keeps the
//! resource type, its logical and version ids, and opaque JSON content.

use serde::{Deserialize, Serialize};

/// A resource returned by a handler.
///
/// # Example
///
/// ```
/// use hippocrates_core::Resource;
/// use serde_json::json;
///
/// let patient = Resource::new("Patient")
///     .with_id("123")
///     .with_version_id("2")
///     .with_content(json!({ "active": true }));
///
/// assert_eq!(patient.resource_type(), "Patient");
/// assert_eq!(patient.id(), Some("123"));
/// assert_eq!(patient.version_id(), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version_id: Option<String>,
    #[serde(default)]
    content: serde_json::Value,
}

impl Resource {
    /// Creates an empty resource of the given type.
    #[must_use]
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: None,
            version_id: None,
            content: serde_json::Value::Null,
        }
    }

    /// Sets the logical id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the version id.
    #[must_use]
    pub fn with_version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    /// Sets the content.
    #[must_use]
    pub fn with_content(mut self, content: serde_json::Value) -> Self {
        self.content = content;
        self
    }

    /// Returns the resource type name.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the logical id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the version id.
    #[must_use]
    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    /// Returns the opaque content.
    #[must_use]
    pub fn content(&self) -> &serde_json::Value {
        &self.content
    }
}
