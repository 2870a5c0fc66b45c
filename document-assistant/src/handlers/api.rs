//! JSON views of the client state, for scripts and tests.

use crate::handlers::actions::{parse_operation, read_operation_form};
use crate::models::{Document, OperationResult};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde_json::{json, Value};
use service_core::error::AppError;

pub async fn list_documents(State(state): State<AppState>) -> Json<Vec<Document>> {
    Json(state.directory.snapshot().await.as_ref().clone())
}

pub async fn documents_in_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<Vec<Document>> {
    Json(state.directory.by_category(&category).await)
}

pub async fn current_result(State(state): State<AppState>) -> Json<Option<OperationResult>> {
    Json(state.uploads.result().await)
}

pub async fn refresh(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let count = state.directory.refresh().await?;
    Ok(Json(json!({ "documents": count })))
}

pub async fn run_operation(
    State(state): State<AppState>,
    Path(operation): Path<String>,
    multipart: Multipart,
) -> Result<Json<OperationResult>, AppError> {
    let operation = parse_operation(Some(&operation))?;
    let form = read_operation_form(multipart).await?;

    if let Some(file) = form.file {
        state.uploads.select_file(file).await;
    }

    Ok(Json(state.uploads.run_operation(operation).await?))
}
