//! Request logging middleware.

mod request_ids;
mod spans;
mod traceparent;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, field, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use crate::extensions::*;

use super::{metrics, settings};

use request_ids::{REQUEST_ID_HEADER, RequestId};

/// Paths scraped by infrastructure; logging them only adds noise.
const UNLOGGED_PATHS: &[&str] = &["/metrics", "/healthcheck"];

/// One storefront request as it appears in logs and metrics.
#[derive(Debug)]
struct RequestLog {
    id: RequestId,
    method: String,
    route: String,
    span: Span,
}

impl RequestLog {
    fn open(req: &Request) -> Self {
        let id = RequestId::from_header(
            req.headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
        );

        let method = req.method().as_str().to_owned();
        let route = spans::route_template(req.uri().path());

        let span = tracing::info_span!(
            parent: None,
            "http.request",
            otel.name = %spans::span_name(&method, &route),
            otel.kind = "server",
            request_id = %id,
            method = %method,
            route = %route,
            path = %req.uri().path(),
            remote_addr = %req.remote_addr(),
            user_uuid = field::Empty,
            status = field::Empty,
            duration_ms = field::Empty,
        );

        if settings::current().honour_traceparent
            && let Some(parent) = traceparent::remote_parent(req.headers())
            && let Err(source) = span.set_parent(parent)
        {
            warn!("could not attach remote trace parent: {source}");
        }

        Self {
            id,
            method,
            route,
            span,
        }
    }

    fn close(&self, status: StatusCode, elapsed: Duration, depot: &Depot) {
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

        metrics::observe_request(&self.method, &self.route, status, elapsed);

        if let Some(identity) = depot.identity() {
            self.span
                .record("user_uuid", field::display(identity.user_id));
        }

        self.span.record("status", status.as_u16());
        self.span.record("duration_ms", duration_ms);

        let _entered = self.span.enter();

        match status {
            status if status.is_server_error() => {
                error!(status = status.as_u16(), duration_ms, "request failed");
            }
            status if status.is_client_error() => {
                warn!(status = status.as_u16(), duration_ms, "request rejected");
            }
            status => {
                info!(status = status.as_u16(), duration_ms, "request completed");
            }
        }

        let slow_request = settings::current().slow_request;

        if elapsed > slow_request {
            warn!(
                duration_ms,
                threshold_ms = u64::try_from(slow_request.as_millis()).unwrap_or(u64::MAX),
                "slow request"
            );
        }
    }
}

/// Assign a request id, open the `http.request` span and record the outcome.
#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let path = req.uri().path();

    if UNLOGGED_PATHS.iter().any(|unlogged| *unlogged == path) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let _in_flight = metrics::InFlight::start();

    let log = RequestLog::open(req);

    match log.id.header_value() {
        Some(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        None => warn!(request_id = %log.id, "request id is not a valid header value"),
    }

    ctrl.call_next(req, depot, res)
        .instrument(log.span.clone())
        .await;

    log.close(
        res.status_code.unwrap_or(StatusCode::OK),
        started.elapsed(),
        depot,
    );
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn ok() -> &'static str {
        "ok"
    }

    fn service() -> Service {
        Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("cart").get(ok))
                .push(Router::with_path("healthcheck").get(ok)),
        )
    }

    #[tokio::test]
    async fn caller_request_id_is_echoed() {
        let response = TestClient::get("http://example.com/cart")
            .add_header(REQUEST_ID_HEADER, "checkout-42", true)
            .send(&service())
            .await;

        let echoed = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        assert_eq!(echoed, Some("checkout-42"));
    }

    #[tokio::test]
    async fn request_id_is_minted_when_missing() -> TestResult {
        let response = TestClient::get("http://example.com/cart")
            .send(&service())
            .await;

        let minted = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .ok_or("missing request id header")?
            .to_str()?;

        assert!(uuid::Uuid::parse_str(minted).is_ok(), "got {minted}");

        Ok(())
    }

    #[tokio::test]
    async fn healthcheck_is_not_tagged() -> TestResult {
        let mut response = TestClient::get("http://example.com/healthcheck")
            .send(&service())
            .await;

        assert!(response.headers().get(REQUEST_ID_HEADER).is_none());
        assert_eq!(response.take_string().await?, "ok");

        Ok(())
    }
}
