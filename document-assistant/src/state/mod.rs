//! Client state holders.
//!
//! Each holder owns one piece of client state and exposes its operations
//! directly, so it can be driven without the router. Locks are only held to
//! copy state in or out, never across a backend call: overlapping requests
//! are not serialized and the last response to arrive wins.

pub mod document_directory;
pub mod upload_controller;

pub use document_directory::{category_counts, CategoryCount, DocumentDirectory};
pub use upload_controller::UploadController;

#[cfg(test)]
pub(crate) mod testing;
