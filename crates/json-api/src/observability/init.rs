//! Subscriber installation and exporter shutdown.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::error;
use tracing_subscriber::{
    EnvFilter, Layer as _, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::config::{LogFormat, ServerConfig};

use super::{ObservabilityError, otel, settings};

/// Levels for chatty dependencies when `RUST_LOG` is unset.
const DEPENDENCY_LEVELS: &str =
    "sqlx=warn,reqwest=warn,hyper=warn,h2=warn,tonic=warn,opentelemetry=warn";

/// Keeps the span exporter alive for the life of the server.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    /// Install the global subscriber: a compact or JSON formatter, an
    /// `EnvFilter`, and an OpenTelemetry layer when export is enabled.
    ///
    /// # Errors
    ///
    /// Fails when the OTLP exporter cannot be built or a subscriber is
    /// already installed.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        settings::install(settings::RequestLogSettings::from(config));

        let tracer_provider = config
            .tracing
            .otel_enabled
            .then(|| otel::build_tracer_provider(&config.tracing, config.server.app_env))
            .transpose()?;

        let fmt_layer = match config.logging.log_format {
            LogFormat::Compact => tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_line_number(true)
                .boxed(),
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .boxed(),
        };

        let otel_layer = tracer_provider.as_ref().map(|provider| {
            tracing_opentelemetry::layer()
                .with_tracer(provider.tracer(config.tracing.otel_service_name.clone()))
        });

        tracing_subscriber::registry()
            .with(fmt_layer)
            .with(otel_layer)
            .with(env_filter(&config.logging.log_level))
            .try_init()?;

        Ok(Self { tracer_provider })
    }

    /// Flush buffered spans.
    pub(crate) fn shutdown(self) {
        if let Some(provider) = self.tracer_provider
            && let Err(source) = provider.shutdown()
        {
            error!("span exporter did not shut down cleanly: {source}");
        }
    }
}

/// `RUST_LOG` wins when set; otherwise the configured level plus quiet
/// dependency levels.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_unset| EnvFilter::new(format!("{level},{DEPENDENCY_LEVELS}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_levels_follow_the_configured_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }

        let filter = env_filter("debug").to_string();

        assert!(filter.contains("debug"), "got {filter}");
        assert!(filter.contains("sqlx=warn"), "got {filter}");
    }
}
