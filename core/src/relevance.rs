//! TF-IDF scoring of a parsed query.

use crate::document::{Document, DocumentId, DocumentStatus, DocumentStore};
use crate::index::InvertedIndex;
use crate::query::Query;
use std::collections::BTreeMap;

/// Filter applied to every scored document.
pub trait DocumentPredicate {
    fn accepts(&self, id: DocumentId, status: DocumentStatus, rating: i32) -> bool;
}

impl<F> DocumentPredicate for F
where
    F: Fn(DocumentId, DocumentStatus, i32) -> bool,
{
    fn accepts(&self, id: DocumentId, status: DocumentStatus, rating: i32) -> bool {
        self(id, status, rating)
    }
}

/// A bare status keeps documents with exactly that status.
impl DocumentPredicate for DocumentStatus {
    fn accepts(&self, _id: DocumentId, status: DocumentStatus, _rating: i32) -> bool {
        *self == status
    }
}

/// `ln(total documents / documents containing the term)`. The term must be indexed.
pub fn inverse_document_freq(index: &InvertedIndex, store: &DocumentStore, term: &str) -> f64 {
    (store.len() as f64 / index.document_frequency(term) as f64).ln()
}

/// Score every document matching a plus term and accepted by the predicate,
/// then drop every document holding a minus term. Unordered.
pub fn find_all_documents<P>(
    query: &Query,
    index: &InvertedIndex,
    store: &DocumentStore,
    predicate: &P,
) -> Vec<Document>
where
    P: DocumentPredicate + ?Sized,
{
    let mut document_to_relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
    for term in &query.plus_terms {
        let Some(postings) = index.postings(term) else {
            continue;
        };
        let idf = inverse_document_freq(index, store, term);
        for (&id, &term_freq) in postings {
            let Some(data) = store.get(id) else {
                continue;
            };
            if predicate.accepts(id, data.status, data.rating) {
                *document_to_relevance.entry(id).or_insert(0.0) += term_freq * idf;
            }
        }
    }

    for term in &query.minus_terms {
        if let Some(postings) = index.postings(term) {
            for id in postings.keys() {
                document_to_relevance.remove(id);
            }
        }
    }

    document_to_relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            store.get(id).map(|data| Document { id, relevance, rating: data.rating })
        })
        .collect()
}
