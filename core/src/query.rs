use crate::error::Result;
use crate::stop_words::StopWords;
use crate::tokenizer::{check_text, tokenize};
use std::collections::BTreeSet;

/// A parsed query: terms that score and terms that exclude.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_terms: BTreeSet<String>,
    pub minus_terms: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueryTerm<'a> {
    text: &'a str,
    is_minus: bool,
}

fn parse_term(word: &str) -> QueryTerm<'_> {
    match word.strip_prefix('-') {
        Some(text) => QueryTerm { text, is_minus: true },
        None => QueryTerm { text: word, is_minus: false },
    }
}

impl Query {
    /// Validate and parse a raw query. Stop words are dropped from both sets.
    pub fn parse(raw_query: &str, stop_words: &StopWords) -> Result<Self> {
        check_text(raw_query)?;
        let mut query = Query::default();
        for term in tokenize(raw_query).map(parse_term) {
            if stop_words.contains(term.text) {
                continue;
            }
            if term.is_minus {
                query.minus_terms.insert(term.text.to_string());
            } else {
                query.plus_terms.insert(term.text.to_string());
            }
        }
        Ok(query)
    }
}
