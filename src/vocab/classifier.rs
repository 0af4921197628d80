//! Vocabulary classification
//!
//! Turns a token stream into a [`VocabularyProfile`]:
//!
//! 1. Stopwords are dropped; the survivors are case-folded and counted into
//!    the dictionary.
//! 2. Each dictionary key is lemmatized: the noun lemma is kept if it differs
//!    from the key, otherwise the verb lemma is kept. Every key maps to
//!    exactly one lemma, so the lemma set is never larger than the
//!    dictionary.
//! 3. Each lemma lands in exactly one partition set. The numeric check runs
//!    first, so numbers never count as in-vocabulary.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use super::frequency::FrequencyDistribution;
use crate::nlp::casefold::case_fold;
use crate::nlp::lemmatizer::{Lemmatizer, MorphyLemmatizer, PartOfSpeech};
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::wordlist::WordList;

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*(?:[.,][0-9]*)?$").expect("numeric pattern is valid"));

/// Digits, optionally with one `.` or `,` separator (`42`, `3.14`, `.5`, `5,`).
/// At least one digit is required.
pub fn is_numeric_token(token: &str) -> bool {
    token.bytes().any(|b| b.is_ascii_digit()) && NUMERIC_RE.is_match(token)
}

/// Which partition set a lemma belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyClass {
    InVocabulary,
    OutOfVocabulary,
    Numeric,
}

/// Three disjoint lemma sets whose union is the lemma set
#[derive(Debug, Clone, Default)]
pub struct VocabularyPartition {
    in_vocabulary: FxHashSet<String>,
    out_of_vocabulary: FxHashSet<String>,
    numeric: FxHashSet<String>,
}

impl VocabularyPartition {
    fn insert(&mut self, class: VocabularyClass, lemma: String) {
        match class {
            VocabularyClass::InVocabulary => self.in_vocabulary.insert(lemma),
            VocabularyClass::OutOfVocabulary => self.out_of_vocabulary.insert(lemma),
            VocabularyClass::Numeric => self.numeric.insert(lemma),
        };
    }

    pub fn in_vocabulary(&self) -> &FxHashSet<String> {
        &self.in_vocabulary
    }

    pub fn out_of_vocabulary(&self) -> &FxHashSet<String> {
        &self.out_of_vocabulary
    }

    pub fn numeric(&self) -> &FxHashSet<String> {
        &self.numeric
    }

    pub fn sorted_in_vocabulary(&self) -> Vec<&str> {
        sorted(&self.in_vocabulary)
    }

    pub fn sorted_out_of_vocabulary(&self) -> Vec<&str> {
        sorted(&self.out_of_vocabulary)
    }

    pub fn sorted_numeric(&self) -> Vec<&str> {
        sorted(&self.numeric)
    }

    pub fn len(&self) -> usize {
        self.in_vocabulary.len() + self.out_of_vocabulary.len() + self.numeric.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn sorted(set: &FxHashSet<String>) -> Vec<&str> {
    let mut items: Vec<&str> = set.iter().map(String::as_str).collect();
    items.sort_unstable();
    items
}

/// Dictionary, lemma mapping and partition for one token stream
#[derive(Debug, Clone, Default)]
pub struct VocabularyProfile {
    dictionary: FrequencyDistribution,
    lemma_of: FxHashMap<String, String>,
    lemmas: FxHashSet<String>,
    partition: VocabularyPartition,
}

impl VocabularyProfile {
    /// Case-folded meaningful tokens and their counts
    pub fn dictionary(&self) -> &FrequencyDistribution {
        &self.dictionary
    }

    /// The lemma a dictionary key was mapped to
    pub fn lemma_of(&self, key: &str) -> Option<&str> {
        self.lemma_of.get(key).map(String::as_str)
    }

    pub fn lemmas(&self) -> &FxHashSet<String> {
        &self.lemmas
    }

    pub fn partition(&self) -> &VocabularyPartition {
        &self.partition
    }

    pub fn lemma_count(&self) -> usize {
        self.lemmas.len()
    }

    /// Lemmas that are not numeric
    pub fn alpha_lemma_count(&self) -> usize {
        self.lemmas.len() - self.partition.numeric.len()
    }

    /// Occurrences of numeric dictionary entries
    pub fn numeric_occurrences(&self) -> usize {
        self.dictionary
            .iter()
            .filter(|(token, _)| is_numeric_token(token))
            .map(|(_, count)| count)
            .sum()
    }
}

/// Builds vocabulary profiles against a reference word list
#[derive(Clone)]
pub struct VocabularyClassifier {
    stopwords: StopwordFilter,
    lemmatizer: Arc<dyn Lemmatizer>,
    wordlist: Arc<WordList>,
}

impl std::fmt::Debug for VocabularyClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VocabularyClassifier")
            .field("stopwords", &self.stopwords.len())
            .field("wordlist", &self.wordlist.len())
            .finish_non_exhaustive()
    }
}

impl VocabularyClassifier {
    pub fn new(
        stopwords: StopwordFilter,
        lemmatizer: Arc<dyn Lemmatizer>,
        wordlist: Arc<WordList>,
    ) -> Self {
        Self {
            stopwords,
            lemmatizer,
            wordlist,
        }
    }

    /// English stopwords and a morphological lemmatizer over `wordlist`
    pub fn with_wordlist(wordlist: Arc<WordList>) -> Self {
        let lemmatizer = Arc::new(MorphyLemmatizer::new(Arc::clone(&wordlist)));
        Self::new(StopwordFilter::english(), lemmatizer, wordlist)
    }

    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn with_lemmatizer(mut self, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    pub fn wordlist(&self) -> &WordList {
        &self.wordlist
    }

    /// Count the case-folded meaningful tokens
    pub fn build_dictionary<'a, I>(&self, tokens: I) -> FrequencyDistribution
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut dictionary = FrequencyDistribution::new();
        for token in tokens {
            if self.stopwords.is_meaningful(token) {
                dictionary.add(&case_fold(token));
            }
        }
        dictionary
    }

    /// Noun lemma if it changes the word, verb lemma otherwise
    pub fn lemmatize(&self, key: &str) -> String {
        let folded = case_fold(key);
        let noun = self.lemmatizer.lemmatize(&folded, PartOfSpeech::Noun);
        if noun != folded {
            return noun;
        }
        self.lemmatizer.lemmatize(&folded, PartOfSpeech::Verb)
    }

    /// Numeric first, then word list membership
    pub fn classify_lemma(&self, lemma: &str) -> VocabularyClass {
        if is_numeric_token(lemma) {
            VocabularyClass::Numeric
        } else if self.wordlist.contains(lemma) {
            VocabularyClass::InVocabulary
        } else {
            VocabularyClass::OutOfVocabulary
        }
    }

    /// Build the full profile for a token stream
    pub fn classify<'a, I>(&self, tokens: I) -> VocabularyProfile
    where
        I: IntoIterator<Item = &'a str>,
    {
        trace_stage!("vocabulary");

        let dictionary = self.build_dictionary(tokens);

        let mut lemma_of = FxHashMap::default();
        let mut lemmas = FxHashSet::default();
        let mut partition = VocabularyPartition::default();

        for key in dictionary.keys() {
            let lemma = self.lemmatize(key);
            if lemmas.insert(lemma.clone()) {
                partition.insert(self.classify_lemma(&lemma), lemma.clone());
            }
            lemma_of.insert(key.to_string(), lemma);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            dictionary = dictionary.len(),
            lemmas = lemmas.len(),
            in_vocabulary = partition.in_vocabulary.len(),
            out_of_vocabulary = partition.out_of_vocabulary.len(),
            numeric = partition.numeric.len(),
            "vocabulary classified"
        );

        VocabularyProfile {
            dictionary,
            lemma_of,
            lemmas,
            partition,
        }
    }
}
