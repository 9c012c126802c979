//! JSONL document records accepted by the command line and HTTP surfaces.

use crate::document::{DocumentId, DocumentStatus};
use crate::error::Result;
use crate::server::SearchServer;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDocument {
    pub id: DocumentId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

impl InputDocument {
    pub fn add_to(&self, server: &mut SearchServer) -> Result<()> {
        server.add_document(self.id, &self.text, self.status, &self.ratings)
    }
}

/// Parse one JSON document per line, skipping blank lines.
pub fn parse_jsonl<R: BufRead>(reader: R) -> anyhow::Result<Vec<InputDocument>> {
    let mut docs = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDocument = serde_json::from_str(&line)
            .with_context(|| format!("invalid document on line {}", line_no + 1))?;
        docs.push(doc);
    }
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_defaults() {
        let data = concat!(
            r#"{"id": 5, "text": "пушистый кот", "status": "banned", "ratings": [7, 2]}"#,
            "\n\n",
            r#"{"id": 1, "text": "пёс"}"#,
            "\n",
        );
        let docs = parse_jsonl(data.as_bytes()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].status, DocumentStatus::Banned);
        assert_eq!(docs[0].ratings, vec![7, 2]);
        assert_eq!(docs[1].status, DocumentStatus::Actual);
        assert!(docs[1].ratings.is_empty());
    }

    #[test]
    fn reports_bad_line() {
        let err = parse_jsonl("{\"id\": 1, \"text\": \"a\"}\nnot json\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
