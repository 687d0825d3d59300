//! Forky observability: one place to install `tracing` for the client crates.
//!
//! Console output through `tracing-subscriber`'s fmt layer, with optional
//! OTLP span export when an endpoint is configured.
//!
//! ```no_run
//! use forky_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("forky-cli").with_log_level("debug");
//! init(config)?;
//! tracing::info!("ready");
//! # Ok::<(), forky_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` or `SERVICE_NAME` - Service name
//! - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` - Service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint
//! - `OTEL_LOG_LEVEL` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env, shutdown};
pub use tracing::{record_duration, record_error};
