#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use document_assistant::config::BackendSettings;
use document_assistant::services::{BackendClient, DocumentBackend};
use document_assistant::startup::build_router;
use document_assistant::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BOUNDARY: &str = "----document-assistant-test";

pub struct TestApp {
    pub backend: MockServer,
    pub state: AppState,
}

impl TestApp {
    /// App state wired to a fresh mock backend. Nothing is fetched yet.
    pub async fn spawn() -> Self {
        let backend = MockServer::start().await;
        let client = BackendClient::new(&BackendSettings::new(backend.uri()))
            .expect("Failed to build backend client");
        let client: Arc<dyn DocumentBackend> = Arc::new(client);

        TestApp {
            state: AppState::new(client),
            backend,
        }
    }

    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        build_router(self.state.clone())
            .oneshot(request)
            .await
            .expect("Router failed")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Serve `documents` from `GET /documents/` and load them into the directory.
    pub async fn with_documents(&self, documents: Value) {
        Mock::given(method("GET"))
            .and(path("/documents/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(documents))
            .mount(&self.backend)
            .await;
        self.state
            .directory
            .refresh()
            .await
            .expect("Initial refresh failed");
    }

    pub async fn backend_request_count(&self) -> usize {
        self.backend
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

pub fn sample_documents() -> Value {
    json!([
        { "id": 1, "filename": "a.pdf", "category": "Finance" },
        { "id": 2, "filename": "b.pdf", "category": "HR" }
    ])
}

/// Multipart body as the home page form submits it.
pub fn operation_form(operation: &str, file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"operation\"\r\n\r\n{operation}\r\n"
        )
        .as_bytes(),
    );

    let (filename, content) = file.unwrap_or(("", b""));
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    body
}

pub fn multipart_post(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).expect("Body is not JSON")
}
