//! Observability for Hippocrates.
//!
//! - **Logging**: structured JSON or pretty output via `tracing-subscriber`
//! - **Metrics**: dispatch counters and latency via the `metrics` facade
//!
//! # Example
//!
//! ```rust,ignore
//! use hippocrates_telemetry::{init_logging, LogConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging(&LogConfig::production())?;
//!     hippocrates_telemetry::metrics::describe_metrics();
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/hippocrates-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
