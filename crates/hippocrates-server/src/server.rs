//! The request dispatch pipeline.
//!
//! A [`Server`] owns the descriptor registry and the handlers bound to it.
//! [`Server::handle`] runs one request through lookup, extraction and
//! dispatch.
//!
//! # Example
//!
//! ```rust
//! use hippocrates_core::{IncomingRequest, Resource};
//! use hippocrates_router::{HandlerBinding, SlotRole};
//! use hippocrates_server::{HandlerError, HandlerOutput, PositionalArguments, Server};
//!
//! async fn patient_history(args: PositionalArguments) -> Result<HandlerOutput, HandlerError> {
//!     let id = args.id(0).unwrap_or_default();
//!     Ok(vec![Resource::new("Patient").with_id(id).with_version_id("1")].into())
//! }
//!
//! # tokio_test::block_on(async {
//! let mut builder = Server::builder();
//! builder
//!     .bind(
//!         HandlerBinding::history("patientHistory")
//!             .provider("Patient")
//!             .slot(SlotRole::ResourceId),
//!         patient_history,
//!     )
//!     .unwrap();
//! let server = builder.build();
//!
//! let request = IncomingRequest::parse("Patient/123/_history").unwrap();
//! let response = server.handle(request).await.unwrap();
//! assert_eq!(response.resources()[0].id(), Some("123"));
//! # });
//! ```

use std::future::Future;
use std::sync::Arc;

use hippocrates_core::{
    ErrorCategory, HippocratesError, HippocratesResult, IncomingRequest,
};
use hippocrates_extract::extract;
use hippocrates_router::{
    DescriptorId, DescriptorRegistry, HandlerBinding, OperationDescriptor, RegistryBuilder,
};
use hippocrates_telemetry::metrics;

use crate::arguments::PositionalArguments;
use crate::dispatcher::dispatch;
use crate::handler::{HandlerError, HandlerOutput, HandlerRegistry};
use crate::response::DispatchResponse;

/// Binds handlers to operations.
///
/// Every binding is resolved and checked for ambiguity as it is added, so a
/// misconfigured server fails at startup rather than on some later request.
#[derive(Debug, Default)]
pub struct ServerBuilder {
    descriptors: RegistryBuilder,
    handlers: HandlerRegistry,
}

impl ServerBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `binding` and binds `handler` to the resulting operation.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the binding does not resolve or
    /// would match the same requests as an operation already bound.
    pub fn bind<F, Fut>(
        &mut self,
        binding: HandlerBinding,
        handler: F,
    ) -> HippocratesResult<DescriptorId>
    where
        F: Fn(PositionalArguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HandlerOutput, HandlerError>> + Send + 'static,
    {
        let id = self.descriptors.register(binding)?;
        self.handlers.register(id, handler);
        Ok(id)
    }

    /// Returns the number of bound operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if nothing is bound yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Builds the server.
    #[must_use]
    pub fn build(self) -> Server {
        let registry = self.descriptors.build();
        metrics::set_operations_registered(registry.len());
        tracing::info!(operations = registry.len(), "Server built");

        Server {
            registry: Arc::new(registry),
            handlers: Arc::new(self.handlers),
        }
    }
}

/// An immutable set of bound operations.
///
/// Cloning is cheap and clones share state, so a server can be handed to
/// any number of concurrent tasks.
#[derive(Debug, Clone)]
pub struct Server {
    registry: Arc<DescriptorRegistry>,
    handlers: Arc<HandlerRegistry>,
}

impl Server {
    /// Creates a new server builder.
    #[must_use]
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Returns the descriptor registry.
    #[must_use]
    pub fn registry(&self) -> &DescriptorRegistry {
        &self.registry
    }

    /// Returns the operation that would serve `request`, if any.
    #[must_use]
    pub fn route(&self, request: &IncomingRequest) -> Option<&OperationDescriptor> {
        self.registry.find(request).map(|(_, descriptor)| descriptor)
    }

    /// Handles one request.
    ///
    /// # Errors
    ///
    /// - not found if no bound operation matches the request
    /// - invalid request if `_count` or `_since` is malformed
    /// - whatever the handler returns, per [`dispatch`]
    pub async fn handle(&self, mut request: IncomingRequest) -> HippocratesResult<DispatchResponse> {
        let Some((id, descriptor)) = self.registry.find(&request) else {
            tracing::warn!(
                operation = request.operation().unwrap_or_default(),
                resource = request.resource_name().unwrap_or_default(),
                "No operation matches request"
            );
            metrics::record_dispatch(metrics::UNMATCHED, outcome(ErrorCategory::NotFound));
            return Err(unknown_operation(&request));
        };

        let interaction = descriptor.interaction().as_str();
        tracing::debug!(
            binding = descriptor.name(),
            interaction,
            resource_id = request.resource_id().unwrap_or_default(),
            "Matched operation"
        );

        let result = self.invoke(id, descriptor, &mut request).await;

        let label = match &result {
            Ok(_) => "ok",
            Err(err) => outcome(err.category()),
        };
        metrics::record_dispatch(interaction, label);

        result
    }

    async fn invoke(
        &self,
        id: DescriptorId,
        descriptor: &OperationDescriptor,
        request: &mut IncomingRequest,
    ) -> HippocratesResult<DispatchResponse> {
        let args = extract(descriptor, request).map_err(|err| {
            tracing::debug!(
                binding = descriptor.name(),
                parameter = err.field(),
                error = %err,
                "Extraction failed"
            );
            HippocratesError::from(err)
        })?;

        let handler = self.handlers.get(id).ok_or_else(|| {
            HippocratesError::internal(format!("No handler bound to {}", descriptor.name()))
        })?;

        dispatch(descriptor, handler, args).await
    }
}

fn unknown_operation(request: &IncomingRequest) -> HippocratesError {
    let target = match (request.resource_name(), request.operation()) {
        (Some(name), Some(operation)) => format!("{operation} on {name}"),
        (Some(name), None) => format!("read of {name}"),
        (None, Some(operation)) => operation.to_string(),
        (None, None) => "empty request".to_string(),
    };
    HippocratesError::not_found(format!("Unknown operation: {target}"))
}

const fn outcome(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Configuration => "configuration",
        ErrorCategory::InvalidRequest => "invalid_request",
        ErrorCategory::NotFound => "not_found",
        ErrorCategory::Internal => "internal",
    }
}
