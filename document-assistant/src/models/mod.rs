pub mod document;
pub mod operation;

pub use document::{by_category, Category, Document, DocumentId};
pub use operation::{Operation, OperationResult, SelectedFile};
