//! Form posts from the home page.

use crate::error::ClientError;
use crate::handlers::app::render_home;
use crate::models::{Operation, SelectedFile};
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use service_core::error::AppError;

/// Fields of the home page's upload form.
#[derive(Debug, Default)]
pub struct OperationForm {
    pub operation: Option<String>,
    pub file: Option<SelectedFile>,
}

pub async fn read_operation_form(mut multipart: Multipart) -> Result<OperationForm, AppError> {
    let mut form = OperationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Malformed form: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("operation") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Malformed form: {}", e)))?;
                form.operation = Some(value);
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::error!(filename = %filename, error = %e, "Failed to read upload");
                    AppError::BadRequest(anyhow::anyhow!("Failed to read file {}", filename))
                })?;

                // An empty file input is still submitted, with no file name.
                if !filename.is_empty() {
                    form.file = Some(SelectedFile::new(filename, content_type, data));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

pub fn parse_operation(value: Option<&str>) -> Result<Operation, AppError> {
    let value = value.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Missing operation")))?;
    value
        .parse()
        .map_err(|e: String| AppError::BadRequest(anyhow::anyhow!(e)))
}

/// Select the posted file (if any) and run the chosen operation on the
/// current selection.
pub async fn run_operation_action(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_operation_form(multipart).await?;
    let operation = parse_operation(form.operation.as_deref())?;

    if let Some(file) = form.file {
        state.uploads.select_file(file).await;
    }

    match state.uploads.run_operation(operation).await {
        Ok(result) => {
            tracing::info!(operation = %operation, status = result.status, "Operation completed");
            Ok(Redirect::to("/").into_response())
        }
        Err(ClientError::NoFileSelected) => Ok((
            StatusCode::BAD_REQUEST,
            render_home(&state, Some(ClientError::NoFileSelected.to_string())).await,
        )
            .into_response()),
        Err(e) => {
            tracing::error!(operation = %operation, error = %e, "Operation failed");
            Ok((
                StatusCode::BAD_GATEWAY,
                render_home(&state, Some(e.to_string())).await,
            )
                .into_response())
        }
    }
}

pub async fn refresh_action(State(state): State<AppState>) -> Response {
    match state.directory.refresh().await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Document refresh failed");
            (
                StatusCode::BAD_GATEWAY,
                render_home(&state, Some(format!("Could not fetch documents: {}", e))).await,
            )
                .into_response()
        }
    }
}
