//! W3C Trace Context and request-id propagation for outbound HTTP calls.
//!
//! Inbound requests get their `x-request-id` pinned to the handling task by
//! [`crate::middleware::request_id_middleware`]; requests sent through
//! [`TracedClientExt`] copy it (and the current span's `traceparent`) onto
//! the outgoing headers so backend logs can be correlated with ours.
//!
//! See: https://www.w3.org/TR/trace-context/

use opentelemetry::trace::TraceContextExt;
use reqwest::header::HeaderMap;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Header name for W3C traceparent
pub const TRACEPARENT_HEADER: &str = "traceparent";

/// Header name for W3C tracestate
pub const TRACESTATE_HEADER: &str = "tracestate";

/// Header name for request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
    pub(crate) static REQUEST_ID: String;
}

/// Request ID of the inbound request currently being handled, if any.
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

/// Inject current trace context into HTTP request headers.
///
/// Does nothing when the current span is not part of an exported trace.
pub fn inject_trace_context(headers: &mut HeaderMap) {
    let span = Span::current();
    let context = span.context();
    let otel_span = context.span();
    let span_context = otel_span.span_context();

    if span_context.is_valid() {
        // version-trace_id-span_id-trace_flags
        let traceparent = format!(
            "00-{}-{}-{:02x}",
            span_context.trace_id(),
            span_context.span_id(),
            span_context.trace_flags().to_u8()
        );

        if let Ok(value) = traceparent.parse() {
            headers.insert(TRACEPARENT_HEADER, value);
        }

        let tracestate_str = span_context.trace_state().header();
        if !tracestate_str.is_empty()
            && let Ok(value) = tracestate_str.parse()
        {
            headers.insert(TRACESTATE_HEADER, value);
        }
    }
}

/// Inject trace context and optional request ID into headers.
pub fn inject_trace_headers(headers: &mut HeaderMap, request_id: Option<&str>) {
    inject_trace_context(headers);

    if let Some(id) = request_id
        && let Ok(value) = id.parse()
    {
        headers.insert(REQUEST_ID_HEADER, value);
    }
}

/// Extract request ID from incoming request headers.
///
/// Empty or non-ASCII values count as absent.
pub fn extract_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// A reqwest `RequestBuilder` that injects trace headers when sent.
pub struct TracedRequest {
    request: reqwest::RequestBuilder,
}

impl TracedRequest {
    pub fn new(request: reqwest::RequestBuilder) -> Self {
        Self { request }
    }

    pub fn multipart(self, form: reqwest::multipart::Form) -> Self {
        Self {
            request: self.request.multipart(form),
        }
    }

    /// Send the request with trace context and the current request ID.
    pub async fn send(self) -> Result<reqwest::Response, reqwest::Error> {
        let mut headers = HeaderMap::new();
        inject_trace_headers(&mut headers, current_request_id().as_deref());

        self.request.headers(headers).send().await
    }
}

/// Extension trait for reqwest::Client to create traced requests.
pub trait TracedClientExt {
    fn traced_get(&self, url: &str) -> TracedRequest;
    fn traced_post(&self, url: &str) -> TracedRequest;
}

impl TracedClientExt for reqwest::Client {
    fn traced_get(&self, url: &str) -> TracedRequest {
        TracedRequest::new(self.get(url))
    }

    fn traced_post(&self, url: &str) -> TracedRequest {
        TracedRequest::new(self.post(url))
    }
}
