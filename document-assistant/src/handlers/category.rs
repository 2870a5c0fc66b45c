use crate::models::Document;
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, State},
    http::Uri,
    response::{IntoResponse, Redirect},
};

#[derive(Template)]
#[template(path = "category.html")]
pub struct CategoryTemplate {
    pub category: String,
    pub documents: Vec<Document>,
}

/// Any single path segment is accepted; unknown categories list nothing.
pub async fn category_page(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> impl IntoResponse {
    let documents = state.directory.by_category(&category).await;

    tracing::debug!(category = %category, count = documents.len(), "Rendering category");

    CategoryTemplate {
        category,
        documents,
    }
}

/// `/{category}/` is the same page as `/{category}`.
pub async fn strip_trailing_slash(uri: Uri) -> Redirect {
    let path = uri.path().trim_end_matches('/');
    Redirect::permanent(if path.is_empty() { "/" } else { path })
}
