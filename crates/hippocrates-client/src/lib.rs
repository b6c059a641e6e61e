//! # Hippocrates Client
//!
//! Builds outbound calls from the same [`OperationDescriptor`]s the server
//! dispatches on, so that a call built here is matched by the descriptor it
//! was built from.
//!
//! [`OperationDescriptor`]: hippocrates_router::OperationDescriptor
//!
//! ```rust
//! use hippocrates_client::build;
//! use hippocrates_core::{CallArguments, IncomingRequest};
//! use hippocrates_router::{HandlerBinding, SlotRole};
//!
//! let descriptor = HandlerBinding::history("patientHistory")
//!     .provider("Patient")
//!     .slot(SlotRole::ResourceId)
//!     .resolve()
//!     .unwrap();
//!
//! let invocation = build(&descriptor, &CallArguments::new().with_id("123")).unwrap();
//! let request = IncomingRequest::parse(&invocation.target().unwrap()).unwrap();
//! assert!(descriptor.matches(&request));
//! ```

#![doc(html_root_url = "https://docs.rs/hippocrates-client/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builder;
mod invoker;

pub use builder::build;
pub use invoker::InvocationBuilder;
