//! Reference word list
//!
//! A large set of known words queried by case-folded membership. It decides
//! in-vocabulary versus out-of-vocabulary, and doubles as the lexicon the
//! morphological lemmatizer validates its candidates against.

use std::io::{self, BufRead};

use rustc_hash::FxHashSet;

use super::casefold::case_fold;

/// A set of known words, stored case-folded
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: FxHashSet<String>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any sequence of words
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for word in words {
            list.insert(word.as_ref());
        }
        list
    }

    /// Read one word per line. Blank lines and `#` comments are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut list = Self::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            list.insert(word);
        }
        Ok(list)
    }

    pub fn insert(&mut self, word: &str) {
        let word = word.trim();
        if !word.is_empty() {
            self.words.insert(case_fold(word).into_owned());
        }
    }

    /// Case-insensitive membership
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(case_fold(word).as_ref())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
