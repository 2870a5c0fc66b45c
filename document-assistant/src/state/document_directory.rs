use crate::error::ClientError;
use crate::models::{by_category, Category, Document};
use crate::services::DocumentBackend;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The list of known documents, as of the last successful fetch.
pub struct DocumentDirectory {
    backend: Arc<dyn DocumentBackend>,
    documents: RwLock<Arc<Vec<Document>>>,
}

/// Number of documents in one of the home page categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

impl DocumentDirectory {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            backend,
            documents: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Replace the whole list with the backend's current one.
    ///
    /// On failure the previous list is kept untouched.
    pub async fn refresh(&self) -> Result<usize, ClientError> {
        let fetched = self.backend.list_documents().await?;
        let count = fetched.len();

        *self.documents.write().await = Arc::new(fetched);

        tracing::info!(count, "Document directory refreshed");
        Ok(count)
    }

    /// The current list. Later refreshes swap in a new list and leave this
    /// one as it is.
    pub async fn snapshot(&self) -> Arc<Vec<Document>> {
        self.documents.read().await.clone()
    }

    /// Documents whose category is exactly `category`, in listing order.
    pub async fn by_category(&self, category: &str) -> Vec<Document> {
        let snapshot = self.snapshot().await;
        by_category(&snapshot, category)
            .into_iter()
            .cloned()
            .collect()
    }
}

/// Per-category counts over one list, in home page order.
pub fn category_counts(documents: &[Document]) -> Vec<CategoryCount> {
    Category::ALL
        .into_iter()
        .map(|category| CategoryCount {
            category,
            count: by_category(documents, category.as_str()).len(),
        })
        .collect()
}
