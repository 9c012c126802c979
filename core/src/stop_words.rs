use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, tokenize};
use std::collections::BTreeSet;

/// Words excluded from indexing and from query matching. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a collection of candidate words, deduplicating them.
    ///
    /// Fails without building anything if any word holds a control character.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if !is_valid_word(word) {
                return Err(SearchError::invalid(format!(
                    "stop word {word:?} contains a control character"
                )));
            }
            unique.insert(word.to_string());
        }
        Ok(Self { words: unique })
    }

    /// Build from a space separated text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_words(tokenize(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }
}
