//! HTTP client for the document processing backend.
//!
//! The backend exposes three multipart processing endpoints (`/upload/`,
//! `/summarize/`, `/extract_entities/`) and a JSON listing at `/documents/`.

use crate::config::BackendSettings;
use crate::error::ClientError;
use crate::models::{Document, Operation, OperationResult, SelectedFile};
use crate::services::metrics::record_backend_call;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use service_core::observability::TracedClientExt;

/// Everything the client needs from the backend.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// POST the file as multipart field `file` to the operation's endpoint.
    async fn run_operation(
        &self,
        operation: Operation,
        file: &SelectedFile,
    ) -> Result<OperationResult, ClientError>;

    /// GET the full document list.
    async fn list_documents(&self) -> Result<Vec<Document>, ClientError>;

    /// GET the backend's own category listing (`/documents/{category}`).
    async fn list_documents_in(&self, category: &str) -> Result<Vec<Document>, ClientError>;
}

pub struct BackendClient {
    client: Client,
    base: Url,
}

impl BackendClient {
    pub fn new(settings: &BackendSettings) -> Result<Self> {
        let base = Url::parse(&settings.url)
            .map_err(|e| anyhow::anyhow!("Invalid backend url {}: {}", settings.url, e))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("Backend url {} cannot carry a path", settings.url);
        }

        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        tracing::info!(backend = %base, "Configured document backend");

        Ok(Self { client, base })
    }

    fn endpoint_url(&self, segments: &[&str], trailing_slash: bool) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
            if trailing_slash {
                path.push("");
            }
        }
        url
    }

    async fn get_documents(&self, url: Url, metric: &'static str) -> Result<Vec<Document>, ClientError> {
        let response = self.client.traced_get(url.as_str()).send().await.map_err(|e| {
            record_backend_call(metric, "network_error");
            tracing::error!(url = %url, error = %e, "Failed to fetch documents");
            ClientError::Network(e)
        })?;

        let (status, documents): (u16, Vec<Document>) =
            read_json(response).await.inspect_err(|e| {
                record_backend_call(metric, "decode_error");
                tracing::error!(url = %url, error = %e, "Unexpected document list");
            })?;

        record_backend_call(metric, "ok");
        tracing::debug!(url = %url, status, count = documents.len(), "Fetched documents");
        Ok(documents)
    }
}

#[async_trait]
impl DocumentBackend for BackendClient {
    async fn run_operation(
        &self,
        operation: Operation,
        file: &SelectedFile,
    ) -> Result<OperationResult, ClientError> {
        let url = self.endpoint_url(&[operation.endpoint()], true);
        let form = Form::new().part("file", file_part(file));

        tracing::info!(
            operation = %operation,
            filename = %file.filename,
            size = file.size(),
            "Sending file to backend"
        );

        let response = self
            .client
            .traced_post(url.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                record_backend_call(operation.endpoint(), "network_error");
                tracing::error!(operation = %operation, error = %e, "Backend request failed");
                ClientError::Network(e)
            })?;

        let (status, body) = read_json(response).await.inspect_err(|e| {
            record_backend_call(operation.endpoint(), "decode_error");
            tracing::error!(operation = %operation, error = %e, "Backend response unreadable");
        })?;

        if (200..300).contains(&status) {
            record_backend_call(operation.endpoint(), "ok");
        } else {
            // Shown to the user as-is; the body usually carries the reason.
            record_backend_call(operation.endpoint(), "http_error");
            tracing::warn!(operation = %operation, status, "Backend answered with an error status");
        }

        Ok(OperationResult {
            operation,
            status,
            body,
        })
    }

    async fn list_documents(&self) -> Result<Vec<Document>, ClientError> {
        let url = self.endpoint_url(&["documents"], true);
        self.get_documents(url, "documents").await
    }

    async fn list_documents_in(&self, category: &str) -> Result<Vec<Document>, ClientError> {
        let url = self.endpoint_url(&["documents", category], false);
        self.get_documents(url, "documents_by_category").await
    }
}

fn file_part(file: &SelectedFile) -> Part {
    let part = || {
        Part::stream_with_length(file.data.clone(), file.size() as u64)
            .file_name(file.filename.clone())
    };

    // Browsers occasionally send content types reqwest refuses to parse.
    part()
        .mime_str(&file.content_type)
        .unwrap_or_else(|_| part())
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<(u16, T), ClientError> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    let value = serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { status, source })?;
    Ok((status, value))
}
