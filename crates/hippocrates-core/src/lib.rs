//! # Hippocrates Core
//!
//! Core types and wire vocabulary for the Hippocrates binding engine.
//!
//! This crate provides the value objects shared by both directions of the
//! engine (server dispatch and client invocation building):
//!
//! - [`IncomingRequest`] - A parsed request as handed over by the transport
//! - [`CallArguments`] - Named parameter values for one call, in either direction
//! - [`QueryParameters`] - Ordered, destructively consumable query parameters
//! - [`OutboundInvocation`] - A client call ready for the transport
//! - [`Resource`] - The minimal resource value handlers return
//! - [`HippocratesError`] - The engine's error taxonomy
//! - [`wire`] - Reserved operation markers and parameter names

#![doc(html_root_url = "https://docs.rs/hippocrates-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod arguments;
mod error;
mod invocation;
mod request;
mod resource;
pub mod wire;

pub use arguments::CallArguments;
pub use error::{ErrorCategory, ErrorDetail, ErrorEnvelope, HippocratesError, HippocratesResult};
pub use invocation::OutboundInvocation;
pub use request::{IncomingRequest, QueryParameters};
pub use resource::Resource;
pub use url::Url;
