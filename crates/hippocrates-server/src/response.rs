//! Dispatch responses.

use hippocrates_core::Resource;
use hippocrates_router::ReturnShape;

/// Normalized handler result, shaped as the operation declares.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResponse {
    /// Exactly one resource (read, vread).
    Resource(Resource),
    /// A list of resources (history); may be empty.
    Bundle(Vec<Resource>),
}

impl DispatchResponse {
    /// Returns the shape of this response.
    #[must_use]
    pub const fn shape(&self) -> ReturnShape {
        match self {
            Self::Resource(_) => ReturnShape::Resource,
            Self::Bundle(_) => ReturnShape::Bundle,
        }
    }

    /// Returns the contained resources as a slice.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        match self {
            Self::Resource(resource) => std::slice::from_ref(resource),
            Self::Bundle(resources) => resources,
        }
    }

    /// Returns the single resource, if this is a single-resource response.
    #[must_use]
    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(resource) => Some(resource),
            Self::Bundle(_) => None,
        }
    }

    /// Consumes the response, returning its resources.
    #[must_use]
    pub fn into_resources(self) -> Vec<Resource> {
        match self {
            Self::Resource(resource) => vec![resource],
            Self::Bundle(resources) => resources,
        }
    }
}
