//! In-memory backend that records every call.

use crate::error::ClientError;
use crate::models::{by_category, Document, Operation, OperationResult, SelectedFile};
use crate::services::DocumentBackend;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// What the fake answers to processing requests.
#[derive(Clone)]
pub enum Reply {
    Json(u16, serde_json::Value),
    Undecodable(u16),
    Unreachable,
}

pub struct FakeBackend {
    documents: Mutex<Vec<Document>>,
    listing_fails: AtomicBool,
    list_calls: AtomicUsize,
    reply: Mutex<Reply>,
    runs: Mutex<Vec<(Operation, SelectedFile)>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            listing_fails: AtomicBool::new(false),
            list_calls: AtomicUsize::new(0),
            reply: Mutex::new(Reply::Json(200, serde_json::json!({ "status": "success" }))),
            runs: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        let backend = Self::default();
        backend.set_documents(documents);
        backend
    }

    pub fn set_documents(&self, documents: Vec<Document>) {
        *self.documents.lock().unwrap() = documents;
    }

    pub fn fail_listing(&self) {
        self.listing_fails.store(true, Ordering::SeqCst);
    }

    pub fn reply_with(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn runs(&self) -> Vec<(Operation, SelectedFile)> {
        self.runs.lock().unwrap().clone()
    }
}

pub fn network_error() -> ClientError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();
    ClientError::Network(err)
}

pub fn decode_error(status: u16) -> ClientError {
    let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
    ClientError::Decode { status, source }
}

#[async_trait]
impl DocumentBackend for FakeBackend {
    async fn run_operation(
        &self,
        operation: Operation,
        file: &SelectedFile,
    ) -> Result<OperationResult, ClientError> {
        self.runs.lock().unwrap().push((operation, file.clone()));

        let reply = self.reply.lock().unwrap().clone();
        match reply {
            Reply::Json(status, body) => Ok(OperationResult {
                operation,
                status,
                body,
            }),
            Reply::Undecodable(status) => Err(decode_error(status)),
            Reply::Unreachable => Err(network_error()),
        }
    }

    async fn list_documents(&self) -> Result<Vec<Document>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.listing_fails.load(Ordering::SeqCst) {
            return Err(network_error());
        }
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn list_documents_in(&self, category: &str) -> Result<Vec<Document>, ClientError> {
        let documents = self.list_documents().await?;
        Ok(by_category(&documents, category).into_iter().cloned().collect())
    }
}
