use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware,
};
use service_core::error::AppError;
use service_core::observability::extract_request_id;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::services::{BackendClient, DocumentBackend};
use crate::handlers::{
    actions::{refresh_action, run_operation_action},
    api,
    app::{health_check, home, metrics},
    category::{category_page, strip_trailing_slash},
};
use crate::AppState;

/// Axum's own default, kept for callers that do not configure one.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    build_router_with_limit(state, DEFAULT_MAX_UPLOAD_BYTES)
}

pub fn build_router_with_limit(state: AppState, max_upload_bytes: usize) -> Router {
    // Static paths win over the `/:category` capture.
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/actions/run", post(run_operation_action))
        .route("/actions/refresh", post(refresh_action))
        .route("/api/documents", get(api::list_documents))
        .route("/api/documents/:category", get(api::documents_in_category))
        .route("/api/result", get(api::current_result))
        .route("/api/refresh", post(api::refresh))
        .route("/api/operations/:operation", post(api::run_operation))
        .route("/:category", get(category_page))
        .route("/:category/", get(strip_trailing_slash))
        .route_layer(from_fn(metrics_middleware))
        .nest_service("/static", ServeDir::new(static_dir()))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id =
                    extract_request_id(request.headers()).unwrap_or_else(|| "-".to_string());

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost, so the trace span already sees the request id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

fn static_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("static")
}

/// A bound, ready-to-run server with its directory already loaded once.
pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(settings: &Settings) -> Result<Self, AppError> {
        let backend = BackendClient::new(&settings.backend).map_err(AppError::ConfigError)?;
        Self::build_with_backend(settings, Arc::new(backend)).await
    }

    pub async fn build_with_backend(
        settings: &Settings,
        backend: Arc<dyn DocumentBackend>,
    ) -> Result<Self, AppError> {
        let state = AppState::new(backend);

        // Initial directory load; the page still works if the backend is down.
        if let Err(e) = state.directory.refresh().await {
            tracing::warn!(error = %e, "Initial document fetch failed, starting with an empty list");
        }

        let app = build_router_with_limit(state.clone(), settings.server.max_upload_bytes);

        let address = format!("{}:{}", settings.server.host, settings.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}:{}", settings.server.host, port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
