//! Core data types
//!
//! Records are what the collaborator loads; sentences are what the tokenizer
//! makes of their titles.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::errors::ErrorCode;

/// A single token. Never empty, never contains whitespace.
pub type Token = String;

// ─── Record ─────────────────────────────────────────────────────────────────

/// The raw title value of a record, as delivered by the source.
///
/// Sources are not trusted to hand over text: scraped dumps sometimes carry
/// byte arrays, numbers or nulls where a title should be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TitleValue {
    Text(String),
    Bytes(Vec<u8>),
    Other(serde_json::Value),
}

impl Default for TitleValue {
    fn default() -> Self {
        TitleValue::Other(serde_json::Value::Null)
    }
}

/// Why a title could not be read as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeIssue {
    /// Bytes were not valid UTF-8; invalid sequences became U+FFFD.
    InvalidUtf8,
    /// A non-text JSON value was rendered as text.
    NonText,
    /// The title was null or absent.
    Missing,
}

impl DecodeIssue {
    /// Every recovered title is reported as a malformed record
    pub fn code(self) -> ErrorCode {
        ErrorCode::MalformedRecord
    }
}

impl TitleValue {
    /// Best-effort text decoding.
    pub fn decode(&self) -> (Cow<'_, str>, Option<DecodeIssue>) {
        match self {
            TitleValue::Text(text) => (Cow::Borrowed(text.as_str()), None),
            TitleValue::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => (Cow::Borrowed(text), None),
                Err(_) => (
                    String::from_utf8_lossy(bytes),
                    Some(DecodeIssue::InvalidUtf8),
                ),
            },
            TitleValue::Other(serde_json::Value::Null) => {
                (Cow::Borrowed(""), Some(DecodeIssue::Missing))
            }
            TitleValue::Other(value) => (Cow::Owned(value.to_string()), Some(DecodeIssue::NonText)),
        }
    }
}

/// One corpus item. Only the title matters here; everything else the source
/// delivered is kept as opaque metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub title: TitleValue,

    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    /// Create a record from a text title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: TitleValue::Text(title.into()),
            metadata: serde_json::Map::new(),
        }
    }

    /// Create a record whose title arrived as raw bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            title: TitleValue::Bytes(bytes.into()),
            metadata: serde_json::Map::new(),
        }
    }

    /// Attach a metadata field
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

// ─── Sentence ───────────────────────────────────────────────────────────────

/// The tokenized form of one title.
///
/// Equality and hashing are by token sequence; this is what deduplication
/// keys on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sentence(Vec<Token>);

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<Token>> for Sentence {
    fn from(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_json() {
        let json = r#"{"title": "Show HN: A thing", "score": 42, "by": "pg"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, TitleValue::Text("Show HN: A thing".into()));
        assert_eq!(record.metadata["score"], 42);
        assert_eq!(record.metadata.len(), 2);
    }

    #[test]
    fn test_record_without_title() {
        let record: Record = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        let (text, issue) = record.title.decode();
        assert_eq!(text, "");
        assert_eq!(issue, Some(DecodeIssue::Missing));
    }

    #[test]
    fn test_byte_titles() {
        let record: Record = serde_json::from_str(r#"{"title": [72, 105]}"#).unwrap();
        assert_eq!(record.title.decode(), (Cow::Borrowed("Hi"), None));

        let broken = Record::from_bytes(vec![b'o', b'k', 0xFF]);
        let (text, issue) = broken.title.decode();
        assert_eq!(text, "ok\u{FFFD}");
        assert_eq!(issue, Some(DecodeIssue::InvalidUtf8));
    }

    #[test]
    fn test_non_text_title() {
        let record: Record = serde_json::from_str(r#"{"title": 1984}"#).unwrap();
        let (text, issue) = record.title.decode();
        assert_eq!(text, "1984");
        assert_eq!(issue, Some(DecodeIssue::NonText));
        assert_eq!(issue.map(DecodeIssue::code), Some(ErrorCode::MalformedRecord));
    }

    #[test]
    fn test_sentence_equality_is_by_tokens() {
        let a = Sentence::new(vec!["Show".into(), "HN".into()]);
        let b: Sentence = vec!["Show".to_string(), "HN".to_string()].into();
        let c = Sentence::new(vec!["SHOW".into(), "HN".into()]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec!["Show", "HN"]);
    }
}
