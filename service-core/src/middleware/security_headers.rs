use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse};

pub async fn security_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let is_api_route = req.uri().path().starts_with("/api/");

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        header::HeaderValue::from_static("same-origin"),
    );

    if is_api_route {
        // JSON responses are never rendered as documents.
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        );
    } else {
        // Pages load their stylesheet from /static and post forms back to us.
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static(
                "default-src 'self'; \
                 style-src 'self'; \
                 img-src 'self' data:; \
                 form-action 'self'; \
                 frame-ancestors 'none'",
            ),
        );
    }
    headers.insert(
        header::X_FRAME_OPTIONS,
        header::HeaderValue::from_static("DENY"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, middleware::from_fn, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "page" }))
            .route("/api/documents", get(|| async { "[]" }))
            .layer(from_fn(security_headers_middleware))
    }

    async fn csp_for(uri: &str) -> String {
        let response = app()
            .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
        response.headers()[header::CONTENT_SECURITY_POLICY]
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn api_routes_get_strict_policy() {
        assert!(csp_for("/api/documents").await.starts_with("default-src 'none'"));
    }

    #[tokio::test]
    async fn pages_may_load_own_assets() {
        let csp = csp_for("/").await;
        assert!(csp.starts_with("default-src 'self'"));
        assert!(csp.contains("form-action 'self'"));
    }
}
