//! Vocabulary analysis
//!
//! Frequency counting over meaningful tokens, lemmatization of the resulting
//! dictionary, and the in-vocabulary / out-of-vocabulary / numeric partition
//! of the lemma set. Collocation finders and a concordance index work over
//! the same token stream.

pub mod classifier;
pub mod collocations;
pub mod frequency;

pub use classifier::{
    is_numeric_token, VocabularyClass, VocabularyClassifier, VocabularyPartition,
    VocabularyProfile,
};
pub use collocations::{
    collocations, trigram_collocations, AssocMeasure, BigramCollocations, CollocationFinder,
    ConcordanceIndex, ConcordanceLine, TrigramCollocations,
};
pub use frequency::FrequencyDistribution;
