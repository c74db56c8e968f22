//! Logging, trace export and Prometheus metrics for the storefront API.

use thiserror::Error;

mod init;
mod metrics;
mod otel;
mod request;
mod settings;

pub(crate) use init::Observability;
pub(crate) use metrics::{metrics_handler, record_order_placed};
pub(crate) use request::request_logging;

#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    #[error("OTLP span exporter could not be built")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("a global tracing subscriber is already installed")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
