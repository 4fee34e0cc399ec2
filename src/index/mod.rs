//! Tantivy index of activities
//!
//! Defines the activity schema, the dataset-to-document projection and the
//! `IndexManager` that opens the index and hands out scoped read handles.

mod document;
mod manager;
pub mod schema;

pub use document::ActivityDocument;
pub use manager::{IndexHandle, IndexManager};
pub use schema::{activity_schema, ActivityFields};

/// Errors that can occur during index operations
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Index error: {0}")]
    Tantivy(#[from] tantivy::TantivyError),
    #[error("Failed to open index directory: {0}")]
    OpenDirectory(#[from] tantivy::directory::error::OpenDirectoryError),
    #[error("Index I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),
}
