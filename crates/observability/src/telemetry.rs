//! Subscriber installation: env filter + fmt layer, plus OTLP export when configured.

use once_cell::sync::OnceCell;
use opentelemetry::{global, trace::TracerProvider, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::ObservabilityConfig;
use crate::error::ObservabilityError;

// Kept so `shutdown` can flush pending spans.
static TRACER_PROVIDER: OnceCell<SdkTracerProvider> = OnceCell::new();

/// Build the event filter: explicit level first, then `RUST_LOG`, then "info".
fn env_filter(config: &ObservabilityConfig) -> Result<EnvFilter, ObservabilityError> {
    match &config.log_level {
        Some(level) => EnvFilter::try_new(level.as_str())
            .map_err(|e| ObservabilityError::Config(format!("invalid log level {level:?}: {e}"))),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}

/// Install the global subscriber.
///
/// Fails if the filter directive is invalid or a global subscriber is already set.
/// A broken OTLP endpoint only downgrades to console output.
pub fn init(config: ObservabilityConfig) -> Result<(), ObservabilityError> {
    let filter = env_filter(&config)?;

    let mut attributes = vec![KeyValue::new("service.name", config.service_name.clone())];
    if let Some(version) = &config.service_version {
        attributes.push(KeyValue::new("service.version", version.clone()));
    }
    let resource = Resource::builder().with_attributes(attributes).build();

    let fmt_layer = config
        .enable_console
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let mut otlp_failure = None;
    let otel_layer = match &config.otlp_endpoint {
        Some(endpoint) => match build_otlp_tracer_provider(&config.service_name, endpoint, resource) {
            Ok((tracer, provider)) => {
                global::set_tracer_provider(provider.clone());
                let _ = TRACER_PROVIDER.set(provider);
                Some(OpenTelemetryLayer::new(tracer))
            }
            Err(e) => {
                otlp_failure = Some(e);
                None
            }
        },
        None => None,
    };

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    // Logged only now that a subscriber exists to receive it.
    match (&config.otlp_endpoint, otlp_failure) {
        (Some(endpoint), Some(e)) => tracing::warn!(
            service.name = %config.service_name,
            endpoint = %endpoint,
            error = %e,
            "OTLP export unavailable, console only"
        ),
        (Some(endpoint), None) => tracing::info!(
            service.name = %config.service_name,
            otlp.endpoint = %endpoint,
            "OTLP tracing enabled"
        ),
        (None, _) => tracing::debug!(
            service.name = %config.service_name,
            "Tracing initialized (console only)"
        ),
    }

    Ok(())
}

/// Span exporter over tonic with a batch processor.
fn build_otlp_tracer_provider(
    service_name: &str,
    endpoint: &str,
    resource: Resource,
) -> Result<(opentelemetry_sdk::trace::SdkTracer, SdkTracerProvider), ObservabilityError> {
    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint.to_string())
        .build()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource)
        .build();

    let tracer = provider.tracer(service_name.to_string());
    Ok((tracer, provider))
}

/// Flush and stop the OTLP exporter, if one was installed.
pub fn shutdown() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        let _ = provider.shutdown();
        tracing::debug!("OpenTelemetry tracer provider shut down");
    }
}

/// Initialize from `ObservabilityConfig::from_env`.
pub fn init_from_env() -> Result<(), ObservabilityError> {
    init(ObservabilityConfig::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_is_config_error() {
        let config = ObservabilityConfig::new("test").with_log_level("forky=notalevel");
        let err = env_filter(&config).unwrap_err();
        assert!(matches!(err, ObservabilityError::Config(_)));
    }

    #[test]
    fn explicit_level_is_accepted() {
        let config = ObservabilityConfig::new("test").with_log_level("forky_client=debug,warn");
        assert!(env_filter(&config).is_ok());
    }
}
