use crate::models::Operation;
use crate::services::get_metrics;
use crate::state::{category_counts, CategoryCount};
use crate::AppState;
use askama::Template;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub selected_name: Option<String>,
    pub operations: [Operation; 3],
    pub output: Option<String>,
    pub output_caption: Option<String>,
    pub notice: Option<String>,
    pub tiles: Vec<CategoryCount>,
    pub total_documents: usize,
}

/// Build the home view from the current client state.
pub async fn render_home(state: &AppState, notice: Option<String>) -> HomeTemplate {
    let selected_name = state.uploads.selected_file().await.map(|file| file.filename);
    let result = state.uploads.result().await;
    let documents = state.directory.snapshot().await;

    HomeTemplate {
        selected_name,
        operations: Operation::ALL,
        output_caption: result
            .as_ref()
            .map(|r| format!("{} · HTTP {}", r.operation.label(), r.status)),
        output: result.as_ref().map(|r| r.pretty()),
        notice,
        tiles: category_counts(&documents),
        total_documents: documents.len(),
    }
}

pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    render_home(&state, None).await
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
