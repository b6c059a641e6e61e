//! # Hippocrates Extract
//!
//! Parameter extraction and type coercion for the Hippocrates binding engine.
//!
//! Once the router has matched a request to an
//! [`OperationDescriptor`](hippocrates_router::OperationDescriptor), [`extract`]
//! fills a [`CallArguments`](hippocrates_core::CallArguments) from it:
//!
//! | Role | Source | Target | Blank value |
//! |------|--------|--------|-------------|
//! | resource-id | request path | `String` | internal error |
//! | version-id | request path | `String` | internal error |
//! | count-limit | `_count` query parameter | `u32` | unset |
//! | since-timestamp | `_since` query parameter | RFC 3339 instant | unset |
//!
//! ## Error Handling
//!
//! Extraction returns [`ExtractionError`], which converts into
//! [`HippocratesError`](hippocrates_core::HippocratesError):
//!
//! - malformed `_count` / `_since` values become client request errors
//!   naming the parameter and the raw value
//! - a bound id or version that is missing becomes an internal error, since
//!   the matcher guarantees its presence
//!
//! ```rust
//! use hippocrates_core::{ErrorCategory, HippocratesError, IncomingRequest};
//! use hippocrates_extract::extract;
//! use hippocrates_router::{HandlerBinding, SlotRole};
//!
//! let descriptor = HandlerBinding::history("systemHistory")
//!     .slot(SlotRole::Count)
//!     .resolve()
//!     .unwrap();
//!
//! let mut request = IncomingRequest::parse("_history?_count=many").unwrap();
//! let err: HippocratesError = extract(&descriptor, &mut request).unwrap_err().into();
//!
//! assert_eq!(err.category(), ErrorCategory::InvalidRequest);
//! assert_eq!(err.parameter(), Some("_count"));
//! ```

#![doc(html_root_url = "https://docs.rs/hippocrates-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod coerce;
mod error;
mod extractor;

pub use error::{ExtractionError, ExtractionSource};
pub use extractor::extract;
