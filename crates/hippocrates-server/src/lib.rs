//! # Hippocrates Server
//!
//! Server-side dispatch for the Hippocrates binding engine.
//!
//! This crate turns an [`IncomingRequest`](hippocrates_core::IncomingRequest)
//! into a handler call:
//!
//! 1. **Lookup**: the [`DescriptorRegistry`](hippocrates_router::DescriptorRegistry)
//!    finds the one operation whose descriptor matches the request
//! 2. **Extraction**: [`hippocrates_extract::extract`] fills the named slots
//!    and consumes `_count` / `_since` from the query
//! 3. **Dispatch**: the slots are laid out as [`PositionalArguments`], the
//!    handler is awaited once, and its output is normalized to the
//!    operation's return shape
//!
//! ## Handlers
//!
//! A handler is any `Fn(PositionalArguments) -> impl Future<Output =
//! Result<HandlerOutput, HandlerError>>`. It may return one resource or a
//! list; the dispatcher shapes the result:
//!
//! | Interaction | Shape |
//! |-------------|-------|
//! | history (instance, type, system) | [`DispatchResponse::Bundle`] |
//! | read, vread | [`DispatchResponse::Resource`] |
//!
//! ## Errors
//!
//! Everything surfaces as [`HippocratesError`](hippocrates_core::HippocratesError):
//! not found when nothing matches, invalid request for a malformed query
//! value, and internal for handler failures. A handler that returns a
//! `HippocratesError` itself (through [`HandlerError::Engine`]) has it passed
//! to the caller unchanged.

#![doc(html_root_url = "https://docs.rs/hippocrates-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod arguments;
mod dispatcher;
mod handler;
mod response;
mod server;

pub use arguments::{ArgumentValue, PositionalArguments};
pub use dispatcher::{dispatch, normalize};
pub use handler::{BoxedHandlerResult, ErasedHandler, HandlerError, HandlerOutput, HandlerRegistry};
pub use response::DispatchResponse;
pub use server::{Server, ServerBuilder};
