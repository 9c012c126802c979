use crate::document::DocumentId;
use std::collections::BTreeMap;

/// Term frequencies of one term, keyed by document.
pub type Postings = BTreeMap<DocumentId, f64>;

/// Term to per-document term frequency. Terms only appear once a document
/// containing them has been added.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Postings>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the (stop-word filtered) words of a document. Each occurrence
    /// adds `1 / words.len()` to the term frequency.
    pub fn add_document(&mut self, id: DocumentId, words: &[&str]) {
        if words.is_empty() {
            return;
        }
        let inv_word_count = 1.0 / words.len() as f64;
        for &word in words {
            *self
                .postings
                .entry(word.to_string())
                .or_default()
                .entry(id)
                .or_insert(0.0) += inv_word_count;
        }
    }

    pub fn postings(&self, term: &str) -> Option<&Postings> {
        self.postings.get(term)
    }

    /// Number of documents containing the term.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, BTreeMap::len)
    }

    pub fn contains(&self, term: &str, id: DocumentId) -> bool {
        self.postings.get(term).is_some_and(|p| p.contains_key(&id))
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }
}
