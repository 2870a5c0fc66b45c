use crate::observability::trace_context::{REQUEST_ID, extract_request_id};
use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub use crate::observability::trace_context::REQUEST_ID_HEADER;

/// Assigns an `x-request-id` (or keeps the caller's), echoes it on the
/// response and makes it visible to outbound calls made while handling the
/// request.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let request_id =
        extract_request_id(req.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        req.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    let mut response = REQUEST_ID.scope(request_id.clone(), next.run(req)).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
    }

    response
}
