//! In-memory TF-IDF document search.
//!
//! [`SearchServer`] owns the stop words, the inverted index and the document
//! store. It is single-threaded: wrap it in a lock to share it across threads.

pub mod document;
pub mod error;
pub mod index;
pub mod input;
pub mod query;
pub mod ranking;
pub mod relevance;
pub mod server;
pub mod stop_words;
pub mod tokenizer;

pub use document::{Document, DocumentId, DocumentStatus};
pub use error::{Result, SearchError};
pub use server::{MatchOutcome, SearchServer};

/// Maximum number of documents returned by a search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance values closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;
