//! Corpus readers
//!
//! A corpus reader turns a record source into the containers the metrics
//! need: titles, tokenized sentences, the flat token stream, and the
//! deduplicated sentence set. Metrics only ever see the [`CorpusReader`]
//! capability set, never a concrete source.

pub mod casing;
pub mod story;

use crate::errors::CorpusError;
use crate::types::{Record, Sentence};

pub use casing::{is_uppercase_title, uppercase_runs};
pub use story::StoryCorpus;

/// Capability set every corpus exposes.
///
/// Implementations compute their containers once; calling any accessor twice
/// returns the same data.
pub trait CorpusReader {
    /// Plural noun for the corpus items, used in report descriptions
    fn item_kind(&self) -> &str;

    /// One title per record, in source order
    fn titles(&self) -> &[String];

    /// One sentence per record, in source order, duplicates included
    fn sentences(&self) -> &[Sentence];

    /// All tokens of all sentences, in source order
    fn words(&self) -> &[String];

    /// Index of the first occurrence of each distinct sentence
    fn unique_indices(&self) -> &[usize];

    /// Distinct sentences by token-sequence equality
    fn unique_sentences(&self) -> Vec<&Sentence> {
        let sentences = self.sentences();
        self.unique_indices().iter().map(|&i| &sentences[i]).collect()
    }

    /// The source title of each distinct sentence's first occurrence
    fn unique_titles(&self) -> Vec<&str> {
        let titles = self.titles();
        self.unique_indices()
            .iter()
            .map(|&i| titles[i].as_str())
            .collect()
    }

    /// Distinct sentences whose source title has no lowercase ASCII letter
    fn uppercase_sentences(&self) -> Vec<&Sentence> {
        let titles = self.titles();
        let sentences = self.sentences();
        self.unique_indices()
            .iter()
            .filter(|&&i| is_uppercase_title(&titles[i]))
            .map(|&i| &sentences[i])
            .collect()
    }
}

/// Supplies the records a corpus is built from.
pub trait RecordSource {
    fn records(&self) -> Result<Vec<Record>, CorpusError>;
}

impl RecordSource for [Record] {
    fn records(&self) -> Result<Vec<Record>, CorpusError> {
        Ok(self.to_vec())
    }
}

impl RecordSource for Vec<Record> {
    fn records(&self) -> Result<Vec<Record>, CorpusError> {
        Ok(self.clone())
    }
}

impl RecordSource for [&str] {
    fn records(&self) -> Result<Vec<Record>, CorpusError> {
        Ok(self.iter().map(|title| Record::new(*title)).collect())
    }
}

/// An absent source is a construction error, not an empty corpus.
impl<S: RecordSource> RecordSource for Option<S> {
    fn records(&self) -> Result<Vec<Record>, CorpusError> {
        match self {
            Some(source) => source.records(),
            None => Err(CorpusError::Unavailable("no record source".into())),
        }
    }
}
