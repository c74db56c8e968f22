//! W3C `traceparent` extraction for inbound requests.

use opentelemetry::{
    Context,
    propagation::{Extractor, TextMapPropagator as _},
    trace::TraceContextExt as _,
};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use salvo::http::{HeaderMap, HeaderName};

struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

/// The caller's span context, when the request carries a valid one.
pub(super) fn remote_parent(headers: &HeaderMap) -> Option<Context> {
    // Extract onto an empty context so a missing header never links the
    // request to whatever span is current in this process.
    let context =
        TraceContextPropagator::new().extract_with_context(&Context::new(), &Headers(headers));

    let valid = context.span().span_context().is_valid();

    valid.then_some(context)
}

#[cfg(test)]
mod tests {
    use salvo::http::HeaderValue;

    use super::*;

    #[test]
    fn valid_traceparent_yields_a_remote_parent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "traceparent",
            HeaderValue::from_static("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"),
        );

        let parent = remote_parent(&headers);

        assert!(parent.is_some(), "expected a parent context");
    }

    #[test]
    fn missing_or_garbled_traceparent_is_ignored() {
        let mut headers = HeaderMap::new();

        assert!(remote_parent(&headers).is_none(), "no header");

        headers.insert("traceparent", HeaderValue::from_static("not-a-trace"));

        assert!(remote_parent(&headers).is_none(), "garbled header");
    }
}
