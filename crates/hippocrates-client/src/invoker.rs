//! Base-URL aware invocation building.

use hippocrates_core::{
    CallArguments, HippocratesError, HippocratesResult, OutboundInvocation, Url,
};
use hippocrates_router::OperationDescriptor;

use crate::builder::build;

/// Builds invocations against a configured server base.
///
/// # Example
///
/// ```rust
/// use hippocrates_client::InvocationBuilder;
/// use hippocrates_core::{CallArguments, Url};
/// use hippocrates_router::HandlerBinding;
///
/// let descriptor = HandlerBinding::history("systemHistory").resolve().unwrap();
/// let base = Url::parse("https://fhir.example.org/r4/").unwrap();
/// let client = InvocationBuilder::new().with_base_url(base);
///
/// let url = client.url(&descriptor, &CallArguments::new()).unwrap();
/// assert_eq!(url.as_str(), "https://fhir.example.org/r4/_history");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvocationBuilder {
    base_url: Option<Url>,
}

impl InvocationBuilder {
    /// Creates a builder with no base URL.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Returns the server base URL, if set.
    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Builds the relative invocation. See [`build`].
    pub fn build(
        &self,
        descriptor: &OperationDescriptor,
        args: &CallArguments,
    ) -> HippocratesResult<OutboundInvocation> {
        build(descriptor, args)
    }

    /// Builds the invocation and returns its absolute URL.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no base URL is set, and otherwise
    /// whatever [`build`] returns.
    pub fn url(
        &self,
        descriptor: &OperationDescriptor,
        args: &CallArguments,
    ) -> HippocratesResult<Url> {
        let base_url = self
            .base_url
            .as_ref()
            .ok_or_else(|| HippocratesError::configuration("client base URL is not configured"))?;
        self.build(descriptor, args)?.url(base_url)
    }
}
