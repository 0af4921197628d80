//! Lemmatization
//!
//! [`Lemmatizer`] is the seam: anything mapping `(word, part of speech)` to a
//! base form can be plugged into the vocabulary classifier.
//!
//! [`MorphyLemmatizer`] is the built-in implementation. It follows WordNet's
//! morphy procedure: look the word up in an exception table of irregular
//! forms, otherwise strip inflectional suffixes by rule and keep the
//! candidates the lexicon knows. Verb stems ending in a doubled consonant
//! (`runn`, `shipp`) also try the undoubled form. The shortest known
//! candidate wins; when nothing is known the word comes back unchanged.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::casefold::case_fold;
use super::wordlist::WordList;

/// Part-of-speech hint for lemmatization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
}

/// Maps a word to its canonical form for a part of speech.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String;
}

/// Identity lemmatizer: every word is its own lemma.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLemmatizer;

impl Lemmatizer for NoopLemmatizer {
    fn lemmatize(&self, word: &str, _pos: PartOfSpeech) -> String {
        word.to_string()
    }
}

const NOUN_SUFFIXES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_SUFFIXES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("children", "child"),
    ("criteria", "criterion"),
    ("dice", "die"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("indices", "index"),
    ("lice", "louse"),
    ("matrices", "matrix"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("vertices", "vertex"),
];

const VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("am", "be"),
    ("are", "be"),
    ("ate", "eat"),
    ("been", "be"),
    ("began", "begin"),
    ("begun", "begin"),
    ("bought", "buy"),
    ("broke", "break"),
    ("broken", "break"),
    ("brought", "bring"),
    ("built", "build"),
    ("came", "come"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("did", "do"),
    ("does", "do"),
    ("done", "do"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("eaten", "eat"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("flew", "fly"),
    ("flown", "fly"),
    ("forgot", "forget"),
    ("forgotten", "forget"),
    ("found", "find"),
    ("gave", "give"),
    ("given", "give"),
    ("gone", "go"),
    ("got", "get"),
    ("gotten", "get"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("had", "have"),
    ("has", "have"),
    ("held", "hold"),
    ("hid", "hide"),
    ("hidden", "hide"),
    ("is", "be"),
    ("kept", "keep"),
    ("knew", "know"),
    ("known", "know"),
    ("led", "lead"),
    ("left", "leave"),
    ("lost", "lose"),
    ("made", "make"),
    ("meant", "mean"),
    ("paid", "pay"),
    ("ran", "run"),
    ("said", "say"),
    ("saw", "see"),
    ("seen", "see"),
    ("sent", "send"),
    ("sold", "sell"),
    ("spent", "spend"),
    ("stood", "stand"),
    ("taken", "take"),
    ("thought", "think"),
    ("told", "tell"),
    ("took", "take"),
    ("was", "be"),
    ("went", "go"),
    ("were", "be"),
    ("won", "win"),
    ("wrote", "write"),
    ("written", "write"),
];

/// Rule-based lemmatizer validated against a lexicon
#[derive(Debug, Clone)]
pub struct MorphyLemmatizer {
    nouns: Arc<WordList>,
    verbs: Arc<WordList>,
    noun_exceptions: FxHashMap<String, String>,
    verb_exceptions: FxHashMap<String, String>,
}

impl MorphyLemmatizer {
    /// Use one lexicon for both parts of speech
    pub fn new(lexicon: Arc<WordList>) -> Self {
        Self::with_pos_lexicons(Arc::clone(&lexicon), lexicon)
    }

    /// Use separate noun and verb lexicons
    pub fn with_pos_lexicons(nouns: Arc<WordList>, verbs: Arc<WordList>) -> Self {
        Self {
            nouns,
            verbs,
            noun_exceptions: exception_map(NOUN_EXCEPTIONS),
            verb_exceptions: exception_map(VERB_EXCEPTIONS),
        }
    }

    /// Add an irregular form
    pub fn add_exception(&mut self, pos: PartOfSpeech, form: &str, lemma: &str) {
        let map = match pos {
            PartOfSpeech::Noun => &mut self.noun_exceptions,
            PartOfSpeech::Verb => &mut self.verb_exceptions,
        };
        map.insert(case_fold(form).into_owned(), case_fold(lemma).into_owned());
    }

    /// All known base forms of `word`, in candidate order.
    pub fn candidates(&self, word: &str, pos: PartOfSpeech) -> Vec<String> {
        let (lexicon, exceptions, rules) = match pos {
            PartOfSpeech::Noun => (&self.nouns, &self.noun_exceptions, NOUN_SUFFIXES),
            PartOfSpeech::Verb => (&self.verbs, &self.verb_exceptions, VERB_SUFFIXES),
        };

        if let Some(lemma) = exceptions.get(word) {
            return vec![lemma.clone()];
        }

        let mut forms = vec![word.to_string()];
        for (suffix, replacement) in rules {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.is_empty() {
                    continue;
                }
                forms.push(format!("{stem}{replacement}"));
                // running -> runn -> run, shipped -> shipp -> ship
                let strips_inflection = matches!(*suffix, "ing" | "ed") && replacement.is_empty();
                if pos == PartOfSpeech::Verb && strips_inflection {
                    if let Some(undoubled) = undouble_final_consonant(stem) {
                        forms.push(undoubled.to_string());
                    }
                }
            }
        }

        let mut known: Vec<String> = Vec::with_capacity(forms.len());
        for form in forms {
            if lexicon.contains(&form) && !known.contains(&form) {
                known.push(form);
            }
        }
        known
    }
}

impl Lemmatizer for MorphyLemmatizer {
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String {
        self.candidates(word, pos)
            .into_iter()
            .min_by_key(|form| form.chars().count())
            .unwrap_or_else(|| word.to_string())
    }
}

/// `stem` without its last char when it ends in a doubled consonant
fn undouble_final_consonant(stem: &str) -> Option<&str> {
    let mut chars = stem.char_indices().rev();
    let (last_idx, last) = chars.next()?;
    let (_, prev) = chars.next()?;
    let doubled =
        last == prev && last.is_alphabetic() && !matches!(last, 'a' | 'e' | 'i' | 'o' | 'u');
    doubled.then(|| &stem[..last_idx])
}

fn exception_map(pairs: &[(&str, &str)]) -> FxHashMap<String, String> {
    pairs
        .iter()
        .map(|(form, lemma)| (form.to_string(), lemma.to_string()))
        .collect()
}
