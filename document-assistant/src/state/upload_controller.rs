use crate::error::ClientError;
use crate::models::{Operation, OperationResult, SelectedFile};
use crate::services::DocumentBackend;
use crate::state::DocumentDirectory;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Owns the selected file and the result of the last processing request.
pub struct UploadController {
    backend: Arc<dyn DocumentBackend>,
    directory: Arc<DocumentDirectory>,
    selected: RwLock<Option<SelectedFile>>,
    result: RwLock<Option<OperationResult>>,
}

impl UploadController {
    pub fn new(backend: Arc<dyn DocumentBackend>, directory: Arc<DocumentDirectory>) -> Self {
        Self {
            backend,
            directory,
            selected: RwLock::new(None),
            result: RwLock::new(None),
        }
    }

    /// Replace the current selection. No type or size checks.
    pub async fn select_file(&self, file: SelectedFile) {
        tracing::debug!(filename = %file.filename, size = file.size(), "File selected");
        *self.selected.write().await = Some(file);
    }

    pub async fn selected_file(&self) -> Option<SelectedFile> {
        self.selected.read().await.clone()
    }

    pub async fn result(&self) -> Option<OperationResult> {
        self.result.read().await.clone()
    }

    /// Send the selected file to the backend for `operation`.
    ///
    /// Without a selection this fails with [`ClientError::NoFileSelected`]
    /// and touches nothing. Otherwise a decoded body becomes the current
    /// result whatever its HTTP status, and the directory is refreshed once
    /// whenever the backend answered at all.
    pub async fn run_operation(&self, operation: Operation) -> Result<OperationResult, ClientError> {
        let file = self
            .selected
            .read()
            .await
            .clone()
            .ok_or(ClientError::NoFileSelected)?;

        let outcome = self.backend.run_operation(operation, &file).await;

        if let Ok(result) = &outcome {
            *self.result.write().await = Some(result.clone());
        }

        let answered = match &outcome {
            Ok(_) => true,
            Err(e) => e.response_received(),
        };
        if answered {
            if let Err(e) = self.directory.refresh().await {
                tracing::warn!(error = %e, "Directory refresh after operation failed");
            }
        }

        outcome
    }
}
