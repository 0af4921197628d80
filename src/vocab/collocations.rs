//! Collocations and concordance
//!
//! Word pairs and triples that occur together more often than their parts
//! would suggest. Finders count n-grams over the flat token stream, drop rare
//! or noisy ones, and rank the rest by an association measure.
//!
//! Bigram finders accept a window wider than 2, in which case a pair is any
//! two words at most `window_size - 1` positions apart (Church and Hanks's
//! association ratio). Trigram finders are always contiguous.
//!
//! [`ConcordanceIndex`] answers the complementary question: where does a
//! word occur, and what surrounds it.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::frequency::FrequencyDistribution;
use crate::corpus::CorpusReader;
use crate::nlp::casefold::case_fold;
use crate::nlp::stopwords::StopwordFilter;

/// N-grams seen fewer times than this are dropped by the corpus helpers
pub const DEFAULT_MIN_FREQ: usize = 2;

pub type Bigram = [String; 2];
pub type Trigram = [String; 3];

/// How strongly the words of an n-gram are associated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssocMeasure {
    /// N-gram count over the word total
    RawFreq,
    /// Dunning's log-likelihood ratio over the contingency table
    LikelihoodRatio,
    /// Pointwise mutual information, in bits
    Pmi,
}

impl AssocMeasure {
    fn score(self, n_ngram: f64, unigrams: &[f64], total: f64, contingency: &[f64]) -> f64 {
        let order = unigrams.len() as i32;
        match self {
            Self::RawFreq => n_ngram / total,
            Self::Pmi => {
                (n_ngram * total.powi(order - 1)).log2()
                    - unigrams.iter().product::<f64>().log2()
            }
            Self::LikelihoodRatio => likelihood_ratio(contingency, order),
        }
    }
}

// ─── Contingency scoring ────────────────────────────────────────────────────

/// Expected cell counts under independence.
///
/// Cell `i` has bit `j` set when word `j` is absent from it, so cell 0 is the
/// n-gram itself and the last cell is "none of the words".
fn expected_values(cont: &[f64], order: i32) -> Vec<f64> {
    let total: f64 = cont.iter().sum();
    let scale = total.powi(order - 1);
    (0..cont.len())
        .map(|i| {
            (0..order)
                .map(|bit| {
                    let j = 1usize << bit;
                    cont.iter()
                        .enumerate()
                        .filter(|(x, _)| (x & j) == (i & j))
                        .map(|(_, count)| count)
                        .sum::<f64>()
                })
                .product::<f64>()
                / scale
        })
        .collect()
}

fn likelihood_ratio(cont: &[f64], order: i32) -> f64 {
    let expected = expected_values(cont, order);
    2.0 * cont
        .iter()
        .zip(&expected)
        .filter(|(obs, exp)| **obs > 0.0 && **exp > 0.0)
        .map(|(obs, exp)| obs * (obs / exp).ln())
        .sum::<f64>()
}

fn pair_count(counts: &FxHashMap<Bigram, usize>, a: &str, b: &str) -> f64 {
    counts
        .get(&[a.to_string(), b.to_string()])
        .copied()
        .unwrap_or(0) as f64
}

fn bump<const N: usize>(counts: &mut FxHashMap<[String; N], usize>, words: [&str; N]) {
    *counts.entry(words.map(str::to_string)).or_insert(0) += 1;
}

// ─── Finders ────────────────────────────────────────────────────────────────

/// Shared filtering and ranking over an n-gram count table
pub trait CollocationFinder {
    type Ngram: Ord + Hash + AsRef<[String]>;

    fn ngram_counts(&self) -> &FxHashMap<Self::Ngram, usize>;

    fn ngram_counts_mut(&mut self) -> &mut FxHashMap<Self::Ngram, usize>;

    /// Association score of one counted n-gram, `None` if it was never seen
    fn score(&self, measure: AssocMeasure, ngram: &Self::Ngram) -> Option<f64>;

    fn len(&self) -> usize {
        self.ngram_counts().len()
    }

    fn is_empty(&self) -> bool {
        self.ngram_counts().is_empty()
    }

    /// Drop n-grams seen fewer than `min_freq` times
    fn apply_freq_filter(&mut self, min_freq: usize) {
        self.ngram_counts_mut().retain(|_, count| *count >= min_freq);
    }

    /// Drop n-grams containing any word for which `is_noise` holds
    fn apply_word_filter<F>(&mut self, is_noise: F)
    where
        F: Fn(&str) -> bool,
    {
        self.ngram_counts_mut()
            .retain(|ngram, _| !ngram.as_ref().iter().any(|w| is_noise(w)));
    }

    /// Every n-gram with its score, best first; ties in n-gram order
    fn score_ngrams(&self, measure: AssocMeasure) -> Vec<(&Self::Ngram, f64)> {
        let mut scored: Vec<(&Self::Ngram, f64)> = self
            .ngram_counts()
            .keys()
            .filter_map(|ngram| self.score(measure, ngram).map(|s| (ngram, s)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        scored
    }

    fn nbest(&self, measure: AssocMeasure, n: usize) -> Vec<&Self::Ngram> {
        self.score_ngrams(measure)
            .into_iter()
            .take(n)
            .map(|(ngram, _)| ngram)
            .collect()
    }

    /// Spearman correlation between the rankings of two measures
    fn rank_correlation(&self, a: AssocMeasure, b: AssocMeasure) -> Option<f64> {
        spearman_correlation(
            &ranks_from_scores(&self.score_ngrams(a)),
            &ranks_from_scores(&self.score_ngrams(b)),
        )
    }
}

/// Word pairs within a sliding window
#[derive(Debug, Clone)]
pub struct BigramCollocations {
    word_fd: FrequencyDistribution,
    ngram_fd: FxHashMap<Bigram, usize>,
    window_size: usize,
}

impl BigramCollocations {
    /// Count pairs over `words`. `None` when `window_size < 2`.
    pub fn from_words<S: AsRef<str>>(words: &[S], window_size: usize) -> Option<Self> {
        if window_size < 2 {
            return None;
        }

        let mut word_fd = FrequencyDistribution::new();
        let mut ngram_fd = FxHashMap::default();
        for (i, w1) in words.iter().enumerate() {
            let w1 = w1.as_ref();
            word_fd.add(w1);
            for w2 in words.iter().skip(i + 1).take(window_size - 1) {
                bump(&mut ngram_fd, [w1, w2.as_ref()]);
            }
        }

        Some(Self {
            word_fd,
            ngram_fd,
            window_size,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn word_counts(&self) -> &FrequencyDistribution {
        &self.word_fd
    }
}

impl CollocationFinder for BigramCollocations {
    type Ngram = Bigram;

    fn ngram_counts(&self) -> &FxHashMap<Bigram, usize> {
        &self.ngram_fd
    }

    fn ngram_counts_mut(&mut self) -> &mut FxHashMap<Bigram, usize> {
        &mut self.ngram_fd
    }

    fn score(&self, measure: AssocMeasure, ngram: &Bigram) -> Option<f64> {
        let count = *self.ngram_fd.get(ngram)?;
        // normalized by the partner slots in each window
        let n_ii = count as f64 / (self.window_size - 1) as f64;
        let n_ix = self.word_fd.count(&ngram[0]) as f64;
        let n_xi = self.word_fd.count(&ngram[1]) as f64;
        let n_xx = self.word_fd.total() as f64;

        let n_oi = n_xi - n_ii;
        let n_io = n_ix - n_ii;
        let cont = [n_ii, n_oi, n_io, n_xx - n_ii - n_oi - n_io];
        Some(measure.score(n_ii, &[n_ix, n_xi], n_xx, &cont))
    }
}

/// Contiguous word triples
#[derive(Debug, Clone, Default)]
pub struct TrigramCollocations {
    word_fd: FrequencyDistribution,
    bigram_fd: FxHashMap<Bigram, usize>,
    wildcard_fd: FxHashMap<Bigram, usize>,
    ngram_fd: FxHashMap<Trigram, usize>,
}

impl TrigramCollocations {
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        let mut finder = Self::default();
        for (i, w1) in words.iter().enumerate() {
            let w1 = w1.as_ref();
            finder.word_fd.add(w1);
            let Some(w2) = words.get(i + 1).map(|w| w.as_ref()) else {
                continue;
            };
            bump(&mut finder.bigram_fd, [w1, w2]);
            let Some(w3) = words.get(i + 2).map(|w| w.as_ref()) else {
                continue;
            };
            bump(&mut finder.wildcard_fd, [w1, w3]);
            bump(&mut finder.ngram_fd, [w1, w2, w3]);
        }
        finder
    }

    pub fn word_counts(&self) -> &FrequencyDistribution {
        &self.word_fd
    }
}

impl CollocationFinder for TrigramCollocations {
    type Ngram = Trigram;

    fn ngram_counts(&self) -> &FxHashMap<Trigram, usize> {
        &self.ngram_fd
    }

    fn ngram_counts_mut(&mut self) -> &mut FxHashMap<Trigram, usize> {
        &mut self.ngram_fd
    }

    fn score(&self, measure: AssocMeasure, ngram: &Trigram) -> Option<f64> {
        let n_iii = *self.ngram_fd.get(ngram)? as f64;
        let [w1, w2, w3] = ngram;
        let n_iix = pair_count(&self.bigram_fd, w1, w2);
        let n_ixi = pair_count(&self.wildcard_fd, w1, w3);
        let n_xii = pair_count(&self.bigram_fd, w2, w3);
        let n_ixx = self.word_fd.count(w1) as f64;
        let n_xix = self.word_fd.count(w2) as f64;
        let n_xxi = self.word_fd.count(w3) as f64;
        let n_xxx = self.word_fd.total() as f64;

        let n_oii = n_xii - n_iii;
        let n_ioi = n_ixi - n_iii;
        let n_iio = n_iix - n_iii;
        let n_ooi = n_xxi - n_iii - n_oii - n_ioi;
        let n_oio = n_xix - n_iii - n_oii - n_iio;
        let n_ioo = n_ixx - n_iii - n_ioi - n_iio;
        let n_ooo = n_xxx - n_iii - n_oii - n_ioi - n_iio - n_ooi - n_oio - n_ioo;
        let cont = [n_iii, n_oii, n_ioi, n_ooi, n_iio, n_oio, n_ioo, n_ooo];

        Some(measure.score(n_iii, &[n_ixx, n_xix, n_xxi], n_xxx, &cont))
    }
}

// ─── Rank correlation ───────────────────────────────────────────────────────

/// Rank positions for a best-first score list; equal scores share a rank
pub fn ranks_from_scores<K: Clone>(scored: &[(K, f64)]) -> Vec<(K, usize)> {
    let mut ranks = Vec::with_capacity(scored.len());
    let mut rank = 0;
    let mut prev: Option<f64> = None;
    for (i, (key, score)) in scored.iter().enumerate() {
        if prev.is_some_and(|p| (score - p).abs() > 1e-15) {
            rank = i;
        }
        prev = Some(*score);
        ranks.push((key.clone(), rank));
    }
    ranks
}

/// Spearman's rho over the keys both rankings share.
///
/// `None` with fewer than two shared keys.
pub fn spearman_correlation<K: Hash + Eq>(a: &[(K, usize)], b: &[(K, usize)]) -> Option<f64> {
    let b_ranks: FxHashMap<&K, usize> = b.iter().map(|(key, rank)| (key, *rank)).collect();
    let mut sum = 0.0;
    let mut n = 0usize;
    for (key, rank_a) in a {
        if let Some(rank_b) = b_ranks.get(key) {
            let d = *rank_a as f64 - *rank_b as f64;
            sum += d * d;
            n += 1;
        }
    }
    if n < 2 {
        return None;
    }
    let n = n as f64;
    Some(1.0 - 6.0 * sum / (n * (n * n - 1.0)))
}

// ─── Corpus helpers ─────────────────────────────────────────────────────────

/// Words too short or too common to anchor a collocation
pub fn is_collocation_noise(word: &str, stopwords: &StopwordFilter) -> bool {
    word.chars().count() < 3 || stopwords.is_stopword(word)
}

/// Top `n` bigram collocations of the corpus by likelihood ratio, as
/// space-joined strings. Empty when `window_size < 2`.
pub fn collocations<C>(
    corpus: &C,
    stopwords: &StopwordFilter,
    window_size: usize,
    n: usize,
) -> Vec<String>
where
    C: CorpusReader + ?Sized,
{
    trace_stage!("collocations");

    let Some(mut finder) = BigramCollocations::from_words(corpus.words(), window_size) else {
        return Vec::new();
    };
    finder.apply_freq_filter(DEFAULT_MIN_FREQ);
    finder.apply_word_filter(|w| is_collocation_noise(w, stopwords));

    #[cfg(feature = "tracing")]
    tracing::debug!(window_size, candidates = finder.len(), "bigram collocations counted");

    finder
        .nbest(AssocMeasure::LikelihoodRatio, n)
        .into_iter()
        .map(|ngram| ngram.join(" "))
        .collect()
}

/// Top `n` trigram collocations of the case-folded corpus by `measure`,
/// with the Spearman correlation of that ranking to raw frequency.
pub fn trigram_collocations<C>(
    corpus: &C,
    stopwords: &StopwordFilter,
    measure: AssocMeasure,
    n: usize,
) -> (Vec<String>, Option<f64>)
where
    C: CorpusReader + ?Sized,
{
    trace_stage!("trigram_collocations");

    let words: Vec<String> = corpus
        .words()
        .iter()
        .map(|w| case_fold(w).into_owned())
        .collect();
    let mut finder = TrigramCollocations::from_words(&words);
    finder.apply_freq_filter(DEFAULT_MIN_FREQ);
    finder.apply_word_filter(|w| is_collocation_noise(w, stopwords));

    let best = finder
        .nbest(measure, n)
        .into_iter()
        .map(|ngram| ngram.join(" "))
        .collect();
    let correlation = finder.rank_correlation(measure, AssocMeasure::RawFreq);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        measure = ?measure,
        candidates = finder.len(),
        correlation = ?correlation,
        "trigram collocations ranked"
    );

    (best, correlation)
}

// ─── Concordance ────────────────────────────────────────────────────────────

/// One occurrence of a word with its surrounding text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcordanceLine {
    /// Position of the keyword in the token stream
    pub offset: usize,
    pub left: String,
    pub keyword: String,
    pub right: String,
}

impl ConcordanceLine {
    pub fn line(&self) -> String {
        [self.left.as_str(), self.keyword.as_str(), self.right.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Case-insensitive word positions over a token stream
#[derive(Debug, Clone)]
pub struct ConcordanceIndex<'a> {
    tokens: &'a [String],
    offsets: FxHashMap<String, Vec<usize>>,
}

impl<'a> ConcordanceIndex<'a> {
    pub fn new(tokens: &'a [String]) -> Self {
        let mut offsets: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for (i, token) in tokens.iter().enumerate() {
            offsets.entry(case_fold(token).into_owned()).or_default().push(i);
        }
        Self { tokens, offsets }
    }

    pub fn tokens(&self) -> &'a [String] {
        self.tokens
    }

    pub fn offsets(&self, word: &str) -> &[usize] {
        self.offsets
            .get(case_fold(word).as_ref())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// At most `limit` occurrences of `word`, each fitted to about `width`
    /// characters: a quarter of `width` in tokens on either side, each side
    /// clipped to half of what the keyword leaves over.
    pub fn lines(&self, word: &str, width: usize, limit: usize) -> Vec<ConcordanceLine> {
        let half_width = width.saturating_sub(word.chars().count() + 2) / 2;
        let context = width / 4;

        self.offsets(word)
            .iter()
            .take(limit)
            .map(|&i| {
                let left = self.tokens[i.saturating_sub(context)..i].join(" ");
                let right_end = (i + context).min(self.tokens.len()).max(i + 1);
                let right = self.tokens[i + 1..right_end].join(" ");
                ConcordanceLine {
                    offset: i,
                    left: last_chars(&left, half_width).trim_start().to_string(),
                    keyword: self.tokens[i].clone(),
                    right: first_chars(&right, half_width).trim_end().to_string(),
                }
            })
            .collect()
    }
}

fn first_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn last_chars(text: &str, n: usize) -> &str {
    let count = text.chars().count();
    if count <= n {
        return text;
    }
    match text.char_indices().nth(count - n) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::StoryCorpus;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn bigram(a: &str, b: &str) -> Bigram {
        [a.to_string(), b.to_string()]
    }

    #[test]
    fn test_window_counts() {
        let tokens = words("a b c");
        let adjacent = BigramCollocations::from_words(&tokens, 2).unwrap();
        assert_eq!(adjacent.len(), 2);
        assert_eq!(adjacent.word_counts().total(), 3);

        let wide = BigramCollocations::from_words(&tokens, 3).unwrap();
        assert_eq!(wide.ngram_counts().get(&bigram("a", "c")), Some(&1));
        assert_eq!(wide.len(), 3);

        assert!(BigramCollocations::from_words(&tokens, 1).is_none());
    }

    #[test]
    fn test_freq_filter_drops_rare_ngrams() {
        let tokens = words("a b a b a b c d");
        let mut finder = BigramCollocations::from_words(&tokens, 2).unwrap();
        assert_eq!(finder.ngram_counts().get(&bigram("a", "b")), Some(&3));
        assert_eq!(finder.ngram_counts().get(&bigram("b", "a")), Some(&2));
        assert_eq!(finder.len(), 4);

        finder.apply_freq_filter(2);
        assert_eq!(finder.len(), 2);
        assert!(finder.ngram_counts().values().all(|&count| count >= 2));
        assert!(!finder.ngram_counts().contains_key(&bigram("c", "d")));
    }

    #[test]
    fn test_word_filter() {
        let stopwords = StopwordFilter::from_list(&["the"]);
        let tokens = words("the rust compiler of rust compiler");
        let mut finder = BigramCollocations::from_words(&tokens, 2).unwrap();
        finder.apply_word_filter(|w| is_collocation_noise(w, &stopwords));

        let kept: Vec<&Bigram> = finder.ngram_counts().keys().collect();
        assert_eq!(kept, vec![&bigram("rust", "compiler")]);
        assert!(is_collocation_noise("The", &stopwords));
        assert!(is_collocation_noise("of", &stopwords));
        assert!(!is_collocation_noise("zig", &stopwords));
    }

    #[test]
    fn test_raw_freq_ordering_breaks_ties_by_ngram() {
        let tokens = words("a b a b a b c d");
        let finder = BigramCollocations::from_words(&tokens, 2).unwrap();
        let scored = finder.score_ngrams(AssocMeasure::RawFreq);

        let order: Vec<&Bigram> = scored.iter().map(|(ngram, _)| *ngram).collect();
        assert_eq!(
            order,
            vec![
                &bigram("a", "b"),
                &bigram("b", "a"),
                &bigram("b", "c"),
                &bigram("c", "d"),
            ]
        );
        assert_eq!(scored[0].1, 3.0 / 8.0);
        assert_eq!(scored[3].1, 1.0 / 8.0);
    }

    #[test]
    fn test_scores_are_non_increasing() {
        let tokens = words("new york is big new york is old new york city big apple big apple pie");
        let finder = BigramCollocations::from_words(&tokens, 2).unwrap();
        for measure in [AssocMeasure::LikelihoodRatio, AssocMeasure::Pmi, AssocMeasure::RawFreq] {
            let scored = finder.score_ngrams(measure);
            assert_eq!(scored.len(), finder.len());
            for pair in scored.windows(2) {
                assert!(pair[0].1 >= pair[1].1, "{measure:?}");
                if pair[0].1 == pair[1].1 {
                    assert!(pair[0].0 < pair[1].0, "{measure:?}");
                }
            }
        }
    }

    #[test]
    fn test_likelihood_ratio() {
        let tokens = words("new york x1 new york x2 new york x3");
        let finder = BigramCollocations::from_words(&tokens, 2).unwrap();

        // contingency (3, 0, 0, 6) against expected (1, 2, 2, 4)
        let expected = 2.0 * (3.0 * 3.0f64.ln() + 6.0 * 1.5f64.ln());
        let score = finder
            .score(AssocMeasure::LikelihoodRatio, &bigram("new", "york"))
            .unwrap();
        assert!((score - expected).abs() < 1e-9);

        assert_eq!(
            finder.nbest(AssocMeasure::LikelihoodRatio, 1),
            vec![&bigram("new", "york")]
        );
        assert!(finder.score(AssocMeasure::LikelihoodRatio, &bigram("york", "new")).is_none());
    }

    #[test]
    fn test_pmi() {
        let tokens = words("a b a b a b c d");
        let finder = BigramCollocations::from_words(&tokens, 2).unwrap();
        let top = finder.score_ngrams(AssocMeasure::Pmi);
        assert_eq!(top[0].0, &bigram("c", "d"));
        assert!((top[0].1 - 3.0).abs() < 1e-12);

        let ab = finder.score(AssocMeasure::Pmi, &bigram("a", "b")).unwrap();
        assert!((ab - (24.0f64 / 9.0).log2()).abs() < 1e-12);
    }

    #[test]
    fn test_trigram_counts_and_scores() {
        let tokens = words("new york city new york city big apple pie");
        let mut finder = TrigramCollocations::from_words(&tokens);
        assert_eq!(finder.len(), 6);
        assert_eq!(finder.word_counts().total(), 9);

        finder.apply_freq_filter(2);
        let best = finder.nbest(AssocMeasure::LikelihoodRatio, 15);
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].join(" "), "new york city");

        let ngram = best[0].clone();
        let raw = finder.score(AssocMeasure::RawFreq, &ngram).unwrap();
        assert!((raw - 2.0 / 9.0).abs() < 1e-12);
        let lr = finder.score(AssocMeasure::LikelihoodRatio, &ngram).unwrap();
        assert!(lr.is_finite() && lr > 0.0);
        // every word appears twice, always together
        let pmi = finder.score(AssocMeasure::Pmi, &ngram).unwrap();
        assert!((pmi - (2.0f64 * 81.0 / 8.0).log2()).abs() < 1e-12);
    }

    #[test]
    fn test_rank_helpers() {
        let scored = [("a", 3.0), ("b", 2.0), ("c", 2.0), ("d", 1.0)];
        assert_eq!(
            ranks_from_scores(&scored),
            vec![("a", 0), ("b", 1), ("c", 1), ("d", 3)]
        );

        let forward: [(&str, usize); 3] = [("a", 0), ("b", 1), ("c", 2)];
        let backward: [(&str, usize); 3] = [("c", 0), ("b", 1), ("a", 2)];
        assert_eq!(spearman_correlation(&forward, &forward), Some(1.0));
        assert_eq!(spearman_correlation(&forward, &backward), Some(-1.0));
        assert_eq!(spearman_correlation(&forward[..1], &forward[..1]), None);
    }

    #[test]
    fn test_corpus_collocations() {
        let corpus = StoryCorpus::from_titles([
            "Machine Learning at scale",
            "Machine Learning for dummies",
            "Rust compiler internals",
        ])
        .unwrap();
        let stopwords = StopwordFilter::from_list(&["at", "for"]);
        let found = collocations(&corpus, &stopwords, 2, 20);
        assert_eq!(found, vec!["Machine Learning"]);
        assert!(collocations(&corpus, &stopwords, 1, 20).is_empty());
    }

    #[test]
    fn test_corpus_trigram_collocations() {
        let corpus = StoryCorpus::from_titles([
            "Show HN: Machine learning toolkit",
            "Machine Learning Toolkit released",
        ])
        .unwrap();
        let (best, correlation) = trigram_collocations(
            &corpus,
            &StopwordFilter::from_list(&["show"]),
            AssocMeasure::LikelihoodRatio,
            15,
        );
        assert_eq!(best, vec!["machine learning toolkit"]);
        // a single candidate has no ranking to correlate
        assert_eq!(correlation, None);
    }

    #[test]
    fn test_concordance() {
        let tokens = words("Pfizer vaccine approved by FDA pfizer stock rises");
        let index = ConcordanceIndex::new(&tokens);
        assert_eq!(index.offsets("PFIZER"), &[0, 5]);
        assert!(index.offsets("moderna").is_empty());

        let lines = index.lines("pfizer", 40, 25);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].left, "");
        assert_eq!(lines[0].keyword, "Pfizer");
        assert_eq!(lines[0].right, "vaccine approved");
        assert_eq!(lines[1].offset, 5);
        assert_eq!(lines[1].left, "approved by FDA");
        assert_eq!(lines[1].line(), "approved by FDA pfizer stock rises");

        assert_eq!(index.lines("pfizer", 40, 1).len(), 1);
    }

    #[test]
    fn test_char_clipping() {
        assert_eq!(first_chars("héllo", 2), "hé");
        assert_eq!(first_chars("hi", 5), "hi");
        assert_eq!(last_chars("héllo", 4), "éllo");
        assert_eq!(last_chars("hi", 5), "hi");
        assert_eq!(last_chars("hi", 0), "");
    }
}
