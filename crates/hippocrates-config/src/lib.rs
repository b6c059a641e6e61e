//! Typed configuration for Hippocrates.
//!
//! Configuration is loaded in layers by [`ConfigLoader`]: built-in defaults,
//! then a TOML or JSON file, then `PREFIX__SECTION__KEY` environment
//! variables. Every section rejects unknown fields.
//!
//! ```toml
//! [client]
//! base_url = "https://fhir.example.org/r4"
//!
//! [telemetry.logging]
//! enabled = true
//! level = "info"
//! format = "json"          # or "pretty"
//! include_location = false
//! ```
//!
//! | Environment variable | Field |
//! |----------------------|-------|
//! | `HIPPOCRATES__CLIENT__BASE_URL` | `client.base_url` |
//! | `HIPPOCRATES__TELEMETRY__LOGGING__ENABLED` | `telemetry.logging.enabled` |
//! | `HIPPOCRATES__TELEMETRY__LOGGING__LEVEL` | `telemetry.logging.level` |
//! | `HIPPOCRATES__TELEMETRY__LOGGING__FORMAT` | `telemetry.logging.format` |
//! | `HIPPOCRATES__TELEMETRY__LOGGING__INCLUDE_LOCATION` | `telemetry.logging.include_location` |

#![doc(html_root_url = "https://docs.rs/hippocrates-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::HippocratesConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{ClientConfig, LogFormat, LoggingConfig, TelemetryConfigSection};
