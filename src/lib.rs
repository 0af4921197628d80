//! # story-metrics
//!
//! Descriptive linguistic metrics over corpora of short, title-like texts
//! such as news-story headlines.
//!
//! The pipeline has four stages:
//!
//! 1. **Tokenization** ([`nlp::tokenizer::StoryTokenizer`]): HTML entities are
//!    decoded, then an ordered alternation of lexical patterns keeps URLs,
//!    tags, arrows, emails, joined words and numbers whole. Pure punctuation
//!    tokens are dropped.
//! 2. **Corpus** ([`corpus::StoryCorpus`]): titles, sentences, the flat
//!    token stream and the deduplicated sentence set, all computed once.
//! 3. **Vocabulary** ([`vocab::VocabularyClassifier`]): stopword filtering,
//!    noun/verb lemmatization and the in-vocabulary / out-of-vocabulary /
//!    numeric partition, plus collocation finders and a concordance index
//!    over the token stream.
//! 4. **Metrics** ([`metrics::MetricsEngine`]): a registry of self-describing
//!    metrics evaluated into an ordered report.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use story_metrics::{MetricsEngine, StoryCorpus, WordList};
//!
//! let wordlist = Arc::new(WordList::from_reader(std::io::BufReader::new(file))?);
//! let corpus = StoryCorpus::from_titles(["Show HN: My cool project"])?;
//! let report = MetricsEngine::with_defaults(wordlist).run(&corpus);
//!
//! for row in &report.rows {
//!     println!("{}: {:?}", row.name, row.outcome);
//! }
//! ```

/// Enter a tracing span for a processing stage (when the `tracing` feature
/// is enabled). When disabled, this is a no-op.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("story_stage", stage = $name).entered();
    };
}

pub mod config;
pub mod corpus;
pub mod errors;
pub mod metrics;
pub mod nlp;
pub mod types;
pub mod vocab;

pub use config::{CoverageDenominator, ReportSpec};
pub use corpus::{CorpusReader, RecordSource, StoryCorpus};
pub use errors::{ConfigError, CorpusError, ErrorCode, MetricError, SpecError};
pub use metrics::{MetricDescriptor, MetricRegistry, MetricValue, MetricsEngine, MetricsReport};
pub use nlp::lemmatizer::{Lemmatizer, MorphyLemmatizer, PartOfSpeech};
pub use nlp::stopwords::StopwordFilter;
pub use nlp::tokenizer::StoryTokenizer;
pub use nlp::wordlist::WordList;
pub use types::{Record, Sentence, TitleValue, Token};
pub use vocab::{
    AssocMeasure, BigramCollocations, CollocationFinder, ConcordanceIndex, FrequencyDistribution,
    TrigramCollocations, VocabularyClassifier, VocabularyProfile,
};
