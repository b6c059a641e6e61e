//! Operation descriptors and request matching for Hippocrates.
//!
//! This crate decides which bound operation an incoming request belongs to.
//!
//! # Features
//!
//! - **Explicit bindings**: [`HandlerBinding`] values resolve once into
//!   immutable [`OperationDescriptor`]s
//! - **Four-condition matching**: operation marker, resource name, id
//!   presence, version rule (see [`matcher`])
//! - **Fail-fast registration**: [`RegistryBuilder`] rejects ambiguous
//!   bindings at startup, so lookup never has to rank candidates
//!
//! # Example
//!
//! ```rust
//! use hippocrates_core::IncomingRequest;
//! use hippocrates_router::{DescriptorRegistry, HandlerBinding, InteractionKind, SlotRole};
//!
//! let registry = DescriptorRegistry::from_bindings([
//!     HandlerBinding::history("patientHistory")
//!         .provider("Patient")
//!         .slot(SlotRole::ResourceId)
//!         .slot(SlotRole::Count),
//!     HandlerBinding::history("systemHistory").slot(SlotRole::Since),
//! ])
//! .unwrap();
//!
//! let request = IncomingRequest::parse("Patient/123/_history?_count=10").unwrap();
//! let (_, descriptor) = registry.find(&request).unwrap();
//! assert_eq!(descriptor.interaction(), InteractionKind::HistoryInstance);
//! ```
//!
//! # Path shapes
//!
//! ```text
//!   _history                      history-system
//!   Patient/_history              history-type
//!   Patient/123/_history          history-instance
//!   Patient/123                   read
//!   Patient/123/_history/2        vread
//! ```

#![doc(html_root_url = "https://docs.rs/hippocrates-router/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod binding;
mod descriptor;
pub mod matcher;
mod registry;

pub use binding::{HandlerBinding, InteractionFamily, ResourceBinding};
pub use descriptor::{
    InteractionKind, OperationDescriptor, ParameterSlot, ReturnShape, Scope, SlotRole,
};
pub use matcher::{check, matches, Mismatch};
pub use registry::{DescriptorId, DescriptorRegistry, RegistryBuilder};
