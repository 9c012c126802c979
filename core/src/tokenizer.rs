use crate::error::{Result, SearchError};

/// Split text into words on the ASCII space only.
///
/// Consecutive spaces produce empty words and an empty text produces a single
/// empty word; both are kept as-is.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(' ')
}

/// A word is valid when it holds no control character below the ASCII space.
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|b| b < b' ')
}

/// Validate query or document text word by word.
///
/// Rejects a dangling `-`, words starting with `--` and control characters.
pub fn check_text(text: &str) -> Result<()> {
    for word in tokenize(text) {
        if word == "-" {
            return Err(SearchError::invalid(format!("dangling minus in {text:?}")));
        }
        if word.starts_with("--") {
            return Err(SearchError::invalid(format!("double minus in word {word:?}")));
        }
        if !is_valid_word(word) {
            return Err(SearchError::invalid(format!("control character in word {word:?}")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_empty_words() {
        let words: Vec<&str> = tokenize("cat  dog ").collect();
        assert_eq!(words, vec!["cat", "", "dog", ""]);
        assert_eq!(tokenize("").collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn splits_on_space_only() {
        let words: Vec<&str> = tokenize("a\tb c").collect();
        assert_eq!(words, vec!["a\tb", "c"]);
    }

    #[test]
    fn rejects_malformed_words() {
        assert!(check_text("пушистый --кот").is_err());
        assert!(check_text("пушистый -").is_err());
        assert!(check_text("скво\x12рец").is_err());
        assert!(check_text("пушистый -пёс").is_ok());
        assert!(check_text("").is_ok());
    }

    #[test]
    fn minus_inside_word_is_fine() {
        assert!(check_text("well-known a-").is_ok());
    }
}
