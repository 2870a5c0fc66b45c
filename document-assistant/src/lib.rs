pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod state;

use services::DocumentBackend;
use state::{DocumentDirectory, UploadController};
use std::sync::Arc;

/// Shared application state: the two client state holders.
#[derive(Clone)]
pub struct AppState {
    pub uploads: Arc<UploadController>,
    pub directory: Arc<DocumentDirectory>,
}

impl AppState {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        let directory = Arc::new(DocumentDirectory::new(backend.clone()));
        let uploads = Arc::new(UploadController::new(backend, directory.clone()));
        Self { uploads, directory }
    }
}
