use thiserror::Error;

/// Errors produced while flattening a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlattenError {
    /// The document root must be a JSON object.
    #[error("expected a JSON object at the document root, found {found}")]
    NotAnObject { found: &'static str },
}

/// Result type for flattening operations.
pub type Result<T> = std::result::Result<T, FlattenError>;
