//! Request logging settings shared with the middleware.

use std::{sync::OnceLock, time::Duration};

use crate::config::ServerConfig;

static SETTINGS: OnceLock<RequestLogSettings> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RequestLogSettings {
    pub(super) slow_request: Duration,
    pub(super) honour_traceparent: bool,
}

impl Default for RequestLogSettings {
    fn default() -> Self {
        Self {
            slow_request: Duration::from_secs(1),
            honour_traceparent: false,
        }
    }
}

impl From<&ServerConfig> for RequestLogSettings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            slow_request: Duration::from_millis(config.logging.slow_request_threshold_ms),
            // Inbound parents are only useful when spans are exported.
            honour_traceparent: config.tracing.otel_enabled
                && config.tracing.otel_parent_propagation_enabled,
        }
    }
}

/// First call wins; later calls keep the installed settings.
pub(super) fn install(settings: RequestLogSettings) {
    if SETTINGS.set(settings).is_err() {
        tracing::debug!("request log settings already installed");
    }
}

pub(super) fn current() -> RequestLogSettings {
    SETTINGS.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;
    use testresult::TestResult;

    use super::*;

    fn parse(args: &[&str]) -> Result<ServerConfig, clap::Error> {
        let base = ["shopease-json", "--database-url", "postgres://localhost/shopease"];

        ServerConfig::try_parse_from(base.iter().chain(args).copied())
    }

    #[test]
    fn traceparent_needs_export_enabled() -> TestResult {
        let settings = RequestLogSettings::from(&parse(&["--otel-parent-propagation-enabled"])?);

        assert!(!settings.honour_traceparent);

        let settings = RequestLogSettings::from(&parse(&[
            "--otel-enabled",
            "--otel-parent-propagation-enabled",
        ])?);

        assert!(settings.honour_traceparent);

        Ok(())
    }

    #[test]
    fn slow_request_threshold_is_read_in_milliseconds() -> TestResult {
        let settings = RequestLogSettings::from(&parse(&["--slow-request-threshold-ms", "250"])?);

        assert_eq!(settings.slow_request, Duration::from_millis(250));

        Ok(())
    }
}
