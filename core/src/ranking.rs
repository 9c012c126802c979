use crate::document::Document;
use crate::RELEVANCE_EPSILON;
use std::cmp::Ordering;

/// Ranking order: higher relevance first; relevance within
/// [`RELEVANCE_EPSILON`] counts as equal and falls back to higher rating.
pub fn compare_documents(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance.total_cmp(&lhs.relevance)
    }
}

/// Keep the best `limit` documents in ranking order.
///
/// The epsilon comparison is not transitive, so this picks the best remaining
/// document `limit` times instead of handing the comparator to a sort.
/// Earlier documents win exact ties.
pub fn top_documents(mut documents: Vec<Document>, limit: usize) -> Vec<Document> {
    let mut top = Vec::with_capacity(limit.min(documents.len()));
    while top.len() < limit && !documents.is_empty() {
        let mut best = 0;
        for candidate in 1..documents.len() {
            if compare_documents(&documents[candidate], &documents[best]) == Ordering::Less {
                best = candidate;
            }
        }
        top.push(documents.remove(best));
    }
    top
}
