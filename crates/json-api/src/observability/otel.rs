//! OTLP span export.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig as _};
use opentelemetry_sdk::{
    Resource,
    trace::{Sampler, SdkTracerProvider},
};

use crate::config::{AppEnv, logging::TracingConfig};

use super::ObservabilityError;

pub(super) fn build_tracer_provider(
    config: &TracingConfig,
    app_env: AppEnv,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otel_exporter_otlp_endpoint.as_str())
        .with_timeout(Duration::from_secs(config.otel_exporter_otlp_timeout_seconds))
        .build()?;

    let resource = Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("deployment.environment.name", app_env.as_str()),
        ])
        .build();

    let sampler = Sampler::TraceIdRatioBased(sample_ratio(config.otel_trace_sample_ratio));

    Ok(SdkTracerProvider::builder()
        .with_sampler(Sampler::ParentBased(Box::new(sampler)))
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}

/// Out-of-range ratios are clamped; NaN samples everything.
fn sample_ratio(configured: f64) -> f64 {
    if configured.is_nan() {
        1.0
    } else {
        configured.clamp(0.0, 1.0)
    }
}
