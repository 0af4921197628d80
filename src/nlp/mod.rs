//! Natural Language Processing components
//!
//! This module provides case folding, entity decoding, tokenization, stopword filtering,
//! lemmatization and the reference word list.

pub mod casefold;
pub mod html;
pub mod lemmatizer;
pub mod stopwords;
pub mod tokenizer;
pub mod wordlist;
