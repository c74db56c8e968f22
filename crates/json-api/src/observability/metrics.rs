//! Prometheus metrics for HTTP traffic and checkout.

use std::{sync::LazyLock, time::Duration};

use prometheus::{
    Encoder as _, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use salvo::{
    handler,
    http::{StatusCode, header::CONTENT_TYPE},
    prelude::{Response, StatusError},
};
use tracing::error;

use crate::extensions::*;

const LATENCY_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

#[derive(Debug)]
struct StoreMetrics {
    registry: Registry,
    requests: IntCounterVec,
    latency: HistogramVec,
    in_flight: IntGauge,
    orders_placed: IntCounter,
}

impl StoreMetrics {
    fn register() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("shopease_json".to_owned()), None)?;

        let requests = IntCounterVec::new(
            Opts::new(
                "http_requests_total",
                "HTTP requests by method, route template and status code.",
            ),
            &["method", "route", "status"],
        )?;

        let latency = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latency by method and route template.",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "route"],
        )?;

        let in_flight = IntGauge::new(
            "http_requests_in_flight",
            "HTTP requests currently being served.",
        )?;

        let orders_placed = IntCounter::new("orders_placed_total", "Orders placed at checkout.")?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(latency.clone()))?;
        registry.register(Box::new(in_flight.clone()))?;
        registry.register(Box::new(orders_placed.clone()))?;

        Ok(Self {
            registry,
            requests,
            latency,
            in_flight,
            orders_placed,
        })
    }
}

static METRICS: LazyLock<Option<StoreMetrics>> =
    LazyLock::new(|| match StoreMetrics::register() {
        Ok(metrics) => Some(metrics),
        Err(source) => {
            error!("metrics disabled: {source}");
            None
        }
    });

fn metrics() -> Option<&'static StoreMetrics> {
    METRICS.as_ref()
}

/// Counts a request as in flight until dropped.
#[derive(Debug)]
pub(super) struct InFlight(());

impl InFlight {
    pub(super) fn start() -> Self {
        if let Some(metrics) = metrics() {
            metrics.in_flight.inc();
        }

        Self(())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(metrics) = metrics() {
            metrics.in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status: StatusCode, elapsed: Duration) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .requests
        .with_label_values(&[method, route, status.as_str()])
        .inc();

    metrics
        .latency
        .with_label_values(&[method, route])
        .observe(elapsed.as_secs_f64());
}

/// Count a successful checkout.
pub(crate) fn record_order_placed() {
    if let Some(metrics) = metrics() {
        metrics.orders_placed.inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(res: &mut Response) -> Result<(), StatusError> {
    let metrics = metrics().ok_or_else(StatusError::service_unavailable)?;

    let encoder = TextEncoder::new();

    let body = encoder
        .encode_to_string(&metrics.registry.gather())
        .map_err(|source| internal_error("failed to encode metrics", &source))?;

    res.add_header(CONTENT_TYPE, encoder.format_type(), true)
        .or_500("failed to set metrics content type")?;

    res.render(body);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn exposition_lists_request_and_checkout_metrics() -> TestResult {
        observe_request(
            "POST",
            "/cart/items",
            StatusCode::CREATED,
            Duration::from_millis(12),
        );
        record_order_placed();

        let _guard = InFlight::start();

        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let body = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await?;

        assert!(
            body.contains(r#"shopease_json_http_requests_total{method="POST",route="/cart/items",status="201"}"#),
            "missing request counter in {body}"
        );
        assert!(
            body.contains("shopease_json_http_request_duration_seconds_bucket"),
            "missing latency histogram"
        );
        assert!(
            body.contains("shopease_json_http_requests_in_flight"),
            "missing in-flight gauge"
        );
        assert!(
            body.contains("shopease_json_orders_placed_total"),
            "missing checkout counter"
        );

        Ok(())
    }
}
