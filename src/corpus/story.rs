//! Story corpus
//!
//! The concrete reader for story-title corpora. Everything is computed once
//! at construction: titles are decoded, tokenized in parallel, flattened and
//! deduplicated. After that the corpus is immutable and every accessor is a
//! plain borrow.

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use super::{CorpusReader, RecordSource};
use crate::errors::CorpusError;
use crate::nlp::tokenizer::StoryTokenizer;
use crate::types::{Record, Sentence};

/// Default item kind for story corpora
pub const DEFAULT_ITEM_KIND: &str = "titles";

/// A corpus of story records
#[derive(Debug, Clone)]
pub struct StoryCorpus {
    item_kind: String,
    records: Vec<Record>,
    titles: Vec<String>,
    sentences: Vec<Sentence>,
    words: Vec<String>,
    unique: Vec<usize>,
    malformed: usize,
}

impl StoryCorpus {
    /// Build a corpus from records.
    ///
    /// Fails with [`CorpusError::Unavailable`] when there are no records.
    /// Titles that are not clean text are decoded best-effort and counted
    /// in [`malformed_records`](Self::malformed_records).
    pub fn new(records: Vec<Record>, tokenizer: &StoryTokenizer) -> Result<Self, CorpusError> {
        trace_stage!("corpus");

        if records.is_empty() {
            return Err(CorpusError::Unavailable("record source is empty".into()));
        }

        let mut malformed = 0;
        let titles: Vec<String> = records
            .iter()
            .enumerate()
            .map(|(_idx, record)| {
                let (text, issue) = record.title.decode();
                if let Some(_issue) = issue {
                    malformed += 1;
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        record = _idx,
                        code = %_issue.code(),
                        issue = ?_issue,
                        "recovered malformed title"
                    );
                }
                text.into_owned()
            })
            .collect();

        let sentences: Vec<Sentence> = titles
            .par_iter()
            .map(|title| Sentence::new(tokenizer.tokenize(title)))
            .collect();

        let words: Vec<String> = sentences
            .iter()
            .flat_map(|sentence| sentence.tokens().iter().cloned())
            .collect();

        let mut seen: FxHashSet<&Sentence> = FxHashSet::default();
        let unique: Vec<usize> = sentences
            .iter()
            .enumerate()
            .filter(|(_, sentence)| seen.insert(*sentence))
            .map(|(idx, _)| idx)
            .collect();

        #[cfg(feature = "tracing")]
        tracing::info!(
            records = records.len(),
            unique = unique.len(),
            tokens = words.len(),
            malformed,
            "corpus loaded"
        );

        Ok(Self {
            item_kind: DEFAULT_ITEM_KIND.to_string(),
            records,
            titles,
            sentences,
            words,
            unique,
            malformed,
        })
    }

    /// Build a corpus from any record source
    pub fn from_source<S>(source: &S, tokenizer: &StoryTokenizer) -> Result<Self, CorpusError>
    where
        S: RecordSource + ?Sized,
    {
        Self::new(source.records()?, tokenizer)
    }

    /// Build a corpus from plain titles with the default tokenizer
    pub fn from_titles<I, S>(titles: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = titles.into_iter().map(Record::new).collect();
        Self::new(records, &StoryTokenizer::default())
    }

    /// Set the plural noun used for items in report descriptions
    pub fn with_item_kind(mut self, item_kind: impl Into<String>) -> Self {
        self.item_kind = item_kind.into();
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records whose title needed best-effort decoding
    pub fn malformed_records(&self) -> usize {
        self.malformed
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CorpusReader for StoryCorpus {
    fn item_kind(&self) -> &str {
        &self.item_kind
    }

    fn titles(&self) -> &[String] {
        &self.titles
    }

    fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    fn words(&self) -> &[String] {
        &self.words
    }

    fn unique_indices(&self) -> &[usize] {
        &self.unique
    }
}
