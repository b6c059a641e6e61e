//! # Hippocrates
//!
//! A resource-interaction binding and dispatch engine for FHIR-style REST
//! servers and clients.
//!
//! Handlers are bound to interactions (history, read, vread) once at
//! startup. On the server side each incoming request is matched to exactly
//! one bound operation, its `_count` / `_since` parameters are extracted and
//! coerced, and the handler's result is shaped as the interaction requires.
//! On the client side the same descriptor builds the outbound call, so what
//! a client builds is what the server matches.
//!
//! ## Quick Start
//!
//! ```rust
//! use hippocrates::prelude::*;
//!
//! async fn patient_history(args: PositionalArguments) -> Result<HandlerOutput, HandlerError> {
//!     let id = args.id(0).unwrap_or_default();
//!     let limit = args.count(1).unwrap_or(10);
//!     let versions = (1..=limit.min(3))
//!         .map(|v| Resource::new("Patient").with_id(id).with_version_id(v.to_string()))
//!         .collect::<Vec<_>>();
//!     Ok(versions.into())
//! }
//!
//! # tokio_test::block_on(async {
//! let binding = HandlerBinding::history("patientHistory")
//!     .provider("Patient")
//!     .slot(SlotRole::ResourceId)
//!     .slot(SlotRole::Count);
//!
//! let mut builder = Server::builder();
//! builder.bind(binding, patient_history).unwrap();
//! let server = builder.build();
//!
//! let request = IncomingRequest::parse("Patient/123/_history?_count=2").unwrap();
//! let response = server.handle(request).await.unwrap();
//! assert_eq!(response.resources().len(), 2);
//! # });
//! ```
//!
//! ## Architecture
//!
//! ```text
//! IncomingRequest → DescriptorRegistry::find → extract → dispatch → DispatchResponse
//!                          ↑
//!                   HandlerBinding::resolve → OperationDescriptor → build → OutboundInvocation
//! ```
//!
//! | Crate | Role |
//! |-------|------|
//! | [`core`] | requests, invocations, resources, errors, wire constants |
//! | [`router`] | bindings, descriptors, matching, registry |
//! | [`extract`] | `_count` / `_since` extraction and coercion |
//! | [`server`] | positional arguments, handler registry, dispatch |
//! | [`client`] | outbound invocation building |
//! | [`config`] | layered configuration |
//! | [`telemetry`] | logging and metrics |

#![doc(html_root_url = "https://docs.rs/hippocrates/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use hippocrates_client as client;
pub use hippocrates_config as config;
pub use hippocrates_core as core;
pub use hippocrates_extract as extract;
pub use hippocrates_router as router;
pub use hippocrates_server as server;
pub use hippocrates_telemetry as telemetry;

use hippocrates_client::InvocationBuilder;
use hippocrates_config::{ConfigError, HippocratesConfig};
use hippocrates_telemetry::TelemetryResult;

/// Installs logging as configured and registers metric descriptions.
///
/// # Errors
///
/// Returns an error if the log filter is invalid or a global subscriber is
/// already installed.
pub fn init_telemetry(config: &HippocratesConfig) -> TelemetryResult<()> {
    hippocrates_telemetry::init_logging(&config.telemetry.logging.to_log_config())?;
    hippocrates_telemetry::metrics::describe_metrics();
    Ok(())
}

/// Creates an invocation builder for the configured server base URL.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if `client.base_url` is set but is not
/// a usable http(s) base.
///
/// # Example
///
/// ```rust
/// use hippocrates::config::{ClientConfig, HippocratesConfig};
///
/// let config = HippocratesConfig {
///     client: ClientConfig { base_url: Some("http://localhost:8080/fhir".to_string()) },
///     ..Default::default()
/// };
///
/// let builder = hippocrates::invocation_builder(&config).unwrap();
/// assert_eq!(builder.base_url().map(|url| url.as_str()), Some("http://localhost:8080/fhir"));
/// ```
pub fn invocation_builder(config: &HippocratesConfig) -> Result<InvocationBuilder, ConfigError> {
    Ok(match config.client.parsed_base_url()? {
        Some(base_url) => InvocationBuilder::new().with_base_url(base_url),
        None => InvocationBuilder::new(),
    })
}

/// Prelude module for convenient imports.
///
/// ```rust
/// use hippocrates::prelude::*;
/// ```
pub mod prelude {
    pub use hippocrates_core::{
        CallArguments, ErrorCategory, HippocratesError, HippocratesResult, IncomingRequest,
        OutboundInvocation, Resource, Url,
    };

    pub use hippocrates_router::{
        DescriptorRegistry, HandlerBinding, InteractionKind, OperationDescriptor, SlotRole,
    };

    pub use hippocrates_server::{
        DispatchResponse, HandlerError, HandlerOutput, PositionalArguments, Server,
        ServerBuilder,
    };

    pub use hippocrates_client::{build, InvocationBuilder};

    pub use hippocrates_config::{ConfigLoader, HippocratesConfig};
}
