//! Error types for the observability crate

use thiserror::Error;

/// Errors raised while installing the tracing subscriber or the OTLP exporter
#[derive(Error, Debug)]
pub enum ObservabilityError {
    /// The OTLP exporter or the global subscriber could not be installed
    #[error("Failed to initialize observability: {0}")]
    InitFailed(String),

    /// Invalid filter directive or other bad setting
    #[error("Configuration error: {0}")]
    Config(String),
}
