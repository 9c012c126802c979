use crate::document::{
    compute_average_rating, Document, DocumentData, DocumentId, DocumentStatus, DocumentStore,
};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::ranking::top_documents;
use crate::relevance::{find_all_documents, DocumentPredicate};
use crate::stop_words::StopWords;
use crate::tokenizer::{check_text, tokenize};
use crate::MAX_RESULT_DOCUMENT_COUNT;
use tracing::trace;

/// Result of matching a query against one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Plus terms found in the document, in term order. May be empty.
    Matched(Vec<String>),
    /// The document holds a minus term.
    Excluded,
}

impl MatchOutcome {
    /// Matched words, with an exclusion reported as no words at all.
    pub fn into_words(self) -> Vec<String> {
        match self {
            MatchOutcome::Matched(words) => words,
            MatchOutcome::Excluded => Vec::new(),
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, MatchOutcome::Excluded)
    }
}

/// In-memory search engine. Not thread-safe; callers sharing one instance
/// across threads must lock it.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: DocumentStore,
}

impl SearchServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stop_words(stop_words: StopWords) -> Self {
        Self { stop_words, ..Self::default() }
    }

    /// Server with the given stop words. Fails on any word holding a control character.
    pub fn with_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StopWords::from_words(words).map(Self::from_stop_words)
    }

    /// Server with stop words taken from a space separated text.
    pub fn with_stop_words_text(text: &str) -> Result<Self> {
        StopWords::from_text(text).map(Self::from_stop_words)
    }

    /// Index a document.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidArgument` for a negative or already stored
    /// id and for text that fails validation. Nothing is stored on error.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(SearchError::invalid(format!("document id {id} is negative")));
        }
        if self.documents.contains(id) {
            return Err(SearchError::invalid(format!("document id {id} already exists")));
        }
        check_text(text)?;

        let words: Vec<&str> = tokenize(text).filter(|w| !self.stop_words.contains(w)).collect();
        self.index.add_document(id, &words);
        let rating = compute_average_rating(ratings);
        self.documents.insert(id, DocumentData { rating, status });
        trace!(id, words = words.len(), rating, %status, "document added");
        Ok(())
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top(raw_query, &DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top(raw_query, &status)
    }

    /// Top documents accepted by `predicate(id, status, rating)`, at most
    /// [`MAX_RESULT_DOCUMENT_COUNT`], best first.
    pub fn find_top_documents_with<F>(&self, raw_query: &str, predicate: F) -> Result<Vec<Document>>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        self.find_top(raw_query, &predicate)
    }

    fn find_top<P>(&self, raw_query: &str, predicate: &P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate + ?Sized,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let matched = find_all_documents(&query, &self.index, &self.documents, predicate);
        let total_hits = matched.len();
        let top = top_documents(matched, MAX_RESULT_DOCUMENT_COUNT);
        trace!(raw_query, total_hits, returned = top.len(), "query evaluated");
        Ok(top)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Plus terms of the query present in the document, together with its
    /// status. Any minus term present in the document empties the word list.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let (outcome, status) = self.match_document_outcome(raw_query, id)?;
        Ok((outcome.into_words(), status))
    }

    /// Like [`match_document`](Self::match_document) but reports a minus term
    /// hit as [`MatchOutcome::Excluded`].
    pub fn match_document_outcome(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(MatchOutcome, DocumentStatus)> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let status = self.documents.get(id).ok_or(SearchError::NotFound(id))?.status;

        if query.minus_terms.iter().any(|term| self.index.contains(term, id)) {
            return Ok((MatchOutcome::Excluded, status));
        }
        let words = query
            .plus_terms
            .into_iter()
            .filter(|term| self.index.contains(term, id))
            .collect();
        Ok((MatchOutcome::Matched(words), status))
    }

    /// Id of the document added at position `index`.
    pub fn document_id(&self, index: usize) -> Result<DocumentId> {
        self.documents.id_at(index)
    }

    /// Stored ids in insertion order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.ids()
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_document_leaves_no_trace() {
        let mut server = SearchServer::new();
        server.add_document(1, "cat", DocumentStatus::Actual, &[1]).unwrap();
        assert!(server.add_document(1, "dog", DocumentStatus::Actual, &[1]).is_err());
        assert!(server.add_document(-1, "dog", DocumentStatus::Actual, &[1]).is_err());
        assert!(server.add_document(2, "do\x07g", DocumentStatus::Actual, &[1]).is_err());
        assert_eq!(server.document_count(), 1);
        assert!(server.find_top_documents("dog").unwrap().is_empty());
        assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn document_of_only_stop_words_is_stored() {
        let mut server = SearchServer::with_stop_words(["in", "the"]).unwrap();
        server.add_document(3, "in the", DocumentStatus::Actual, &[4, 5]).unwrap();
        assert_eq!(server.document_count(), 1);
        let (words, status) = server.match_document("in the", 3).unwrap();
        assert!(words.is_empty());
        assert_eq!(status, DocumentStatus::Actual);
    }

    #[test]
    fn match_outcome_distinguishes_exclusion() {
        let mut server = SearchServer::new();
        server.add_document(0, "cat with hat", DocumentStatus::Banned, &[]).unwrap();
        let (outcome, status) = server.match_document_outcome("cat -hat", 0).unwrap();
        assert_eq!(outcome, MatchOutcome::Excluded);
        assert_eq!(status, DocumentStatus::Banned);
        let (outcome, _) = server.match_document_outcome("dog", 0).unwrap();
        assert_eq!(outcome, MatchOutcome::Matched(Vec::new()));
    }

    #[test]
    fn match_unknown_document_fails() {
        let server = SearchServer::new();
        assert_eq!(server.match_document("cat", 7), Err(SearchError::NotFound(7)));
    }
}
