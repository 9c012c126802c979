use crate::document::DocumentId;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors returned by the search core. Every failing operation leaves the
/// server untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Malformed stop words, query or document text, or a bad document id.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The document id is not stored.
    #[error("document not found: {0}")]
    NotFound(DocumentId),
    /// Positional lookup past the end of the insertion order.
    #[error("index {index} is out of range for {len} documents")]
    OutOfRange { index: usize, len: usize },
}

impl SearchError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SearchError::InvalidArgument(reason.into())
    }
}
