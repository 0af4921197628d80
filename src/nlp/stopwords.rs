//! Stopword filtering
//!
//! Decides which tokens are "meaningful": a token is meaningful when its
//! case-folded form is not in the stopword list. Lists come from the
//! `stop-words` crate; custom lists can be supplied for tests or other
//! corpora.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use super::casefold::case_fold;

/// Language codes accepted by [`StopwordFilter::new`].
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "de", "fr", "es", "it", "pt", "nl", "ru", "sv", "no", "da", "fi", "hu", "tr", "pl",
    "ar",
];

/// A case-insensitive stopword filter
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Case-folded stopwords
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// English stopwords
    pub fn english() -> Self {
        Self::from_language(LANGUAGE::English)
    }

    /// Stopwords for a language code or name.
    ///
    /// Returns `None` for languages the `stop-words` crate does not ship.
    pub fn new(language: &str) -> Option<Self> {
        Self::language(language).map(Self::from_language)
    }

    /// Create an empty filter (every token is meaningful)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| case_fold(w).into_owned()).collect(),
        }
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(case_fold(word).into_owned());
        }
    }

    /// Check if a token is a stopword, ignoring case
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(case_fold(token).as_ref())
    }

    /// Check if a token survives the filter
    pub fn is_meaningful(&self, token: &str) -> bool {
        !self.is_stopword(token)
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    /// Whether `language` names a supported stopword list
    pub fn is_supported(language: &str) -> bool {
        Self::language(language).is_some()
    }

    fn from_language(lang: LANGUAGE) -> Self {
        Self {
            stopwords: get(lang).iter().map(|s| case_fold(s).into_owned()).collect(),
        }
    }

    fn language(language: &str) -> Option<LANGUAGE> {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            "hu" | "hungarian" => LANGUAGE::Hungarian,
            "tr" | "turkish" => LANGUAGE::Turkish,
            "pl" | "polish" => LANGUAGE::Polish,
            "ar" | "arabic" => LANGUAGE::Arabic,
            _ => return None,
        };
        Some(lang)
    }
}
