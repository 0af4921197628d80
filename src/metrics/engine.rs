//! Report assembly
//!
//! [`MetricContext`] materializes everything the metrics read (vocabulary
//! profile, unique-sentence lengths, casing counts) once per corpus.
//! [`MetricsEngine`] evaluates the registry against that context in rank
//! order and collects one [`ReportRow`] per metric. A failing metric only
//! marks its own row.

use std::sync::Arc;

use serde::Serialize;

use super::descriptor::{MetricFamily, MetricValue};
use super::registry::MetricRegistry;
use crate::config::validation::ValidationEngine;
use crate::config::{CoverageDenominator, ReportSpec};
use crate::corpus::{is_uppercase_title, uppercase_runs, CorpusReader};
use crate::errors::{ConfigError, ErrorCode, MetricError, SpecError};
use crate::nlp::lemmatizer::MorphyLemmatizer;
use crate::nlp::wordlist::WordList;
use crate::vocab::{VocabularyClassifier, VocabularyProfile};

// ─── Context ────────────────────────────────────────────────────────────────

/// Precomputed inputs shared by every metric
pub struct MetricContext<'a> {
    corpus: &'a dyn CorpusReader,
    profile: VocabularyProfile,
    lengths: Vec<usize>,
    uppercase_items: usize,
    uppercase_runs: usize,
    denominator: CoverageDenominator,
}

impl<'a> MetricContext<'a> {
    pub fn new(
        corpus: &'a dyn CorpusReader,
        classifier: &VocabularyClassifier,
        denominator: CoverageDenominator,
    ) -> Self {
        let unique = corpus.unique_sentences();
        let lengths = unique.iter().map(|s| s.len()).collect();
        let profile = classifier.classify(unique.iter().flat_map(|s| s.iter()));

        let titles = corpus.titles();
        let mut uppercase_items = 0;
        let mut runs = 0;
        for &idx in corpus.unique_indices() {
            let title = titles[idx].as_str();
            if is_uppercase_title(title) {
                uppercase_items += 1;
            } else {
                runs += uppercase_runs(title).count();
            }
        }

        Self {
            corpus,
            profile,
            lengths,
            uppercase_items,
            uppercase_runs: runs,
            denominator,
        }
    }

    pub fn corpus(&self) -> &dyn CorpusReader {
        self.corpus
    }

    pub fn profile(&self) -> &VocabularyProfile {
        &self.profile
    }

    pub fn item_count(&self) -> usize {
        self.corpus.titles().len()
    }

    pub fn unique_item_count(&self) -> usize {
        self.corpus.unique_indices().len()
    }

    pub fn token_count(&self) -> usize {
        self.corpus.words().len()
    }

    /// Token counts of the unique sentences
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Unique sentences whose title has no lowercase ASCII letter
    pub fn uppercase_item_count(&self) -> usize {
        self.uppercase_items
    }

    /// Uppercase runs found in the other unique titles
    pub fn uppercase_run_count(&self) -> usize {
        self.uppercase_runs
    }

    /// Denominator for the coverage proportions, with its name for errors
    pub fn coverage_denominator(&self) -> (usize, &'static str) {
        match self.denominator {
            CoverageDenominator::AllLemmas => (self.profile.lemma_count(), "lemma count"),
            CoverageDenominator::AlphaLemmas => {
                (self.profile.alpha_lemma_count(), "alpha lemma count")
            }
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Serialized form of a metric failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricFailure {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&MetricError> for MetricFailure {
    fn from(err: &MetricError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Either a value or an explicit error marker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricOutcome {
    Value(MetricValue),
    Error(MetricFailure),
}

/// One report line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub id: &'static str,
    pub name: &'static str,
    pub formula: &'static str,
    pub description: String,
    pub family: MetricFamily,
    pub rank: u32,
    #[serde(flatten)]
    pub outcome: MetricOutcome,
}

impl ReportRow {
    pub fn value(&self) -> Option<MetricValue> {
        match self.outcome {
            MetricOutcome::Value(value) => Some(value),
            MetricOutcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&MetricFailure> {
        match &self.outcome {
            MetricOutcome::Error(failure) => Some(failure),
            MetricOutcome::Value(_) => None,
        }
    }
}

/// Rows in rank order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub item_kind: String,
    pub rows: Vec<ReportRow>,
}

impl MetricsReport {
    pub fn get(&self, id: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn value(&self, id: &str) -> Option<MetricValue> {
        self.get(id).and_then(ReportRow::value)
    }

    /// Rows whose metric failed
    pub fn failures(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(|row| row.error().is_some())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Evaluates a metric registry against corpora
#[derive(Debug, Clone)]
pub struct MetricsEngine {
    registry: MetricRegistry,
    classifier: VocabularyClassifier,
    denominator: CoverageDenominator,
    item_kind: Option<String>,
}

impl MetricsEngine {
    /// Built-in metrics with the given classifier
    pub fn new(classifier: VocabularyClassifier) -> Self {
        Self {
            registry: MetricRegistry::with_defaults(),
            classifier,
            denominator: CoverageDenominator::default(),
            item_kind: None,
        }
    }

    /// Built-in metrics, English stopwords, morphological lemmas over `wordlist`
    pub fn with_defaults(wordlist: Arc<WordList>) -> Self {
        Self::new(VocabularyClassifier::with_wordlist(wordlist))
    }

    /// Build an engine from a validated spec.
    ///
    /// Every validation error is returned at once in a [`SpecError`];
    /// warnings are logged.
    pub fn from_spec(spec: &ReportSpec, wordlist: Arc<WordList>) -> Result<Self, SpecError> {
        let registry = MetricRegistry::with_defaults();
        let report = ValidationEngine::for_registry(&registry).validate(spec);

        #[cfg(feature = "tracing")]
        for warning in report.warnings() {
            tracing::warn!(path = %warning.path, code = %warning.code, "{}", warning.message);
        }

        if report.has_errors() {
            return Err(SpecError::new(report.into_errors()));
        }

        let stopwords = spec.build_stopwords().ok_or_else(|| {
            SpecError::from(ConfigError::new(
                ErrorCode::InvalidValue,
                "/vocabulary/language",
                format!("no stopword list for language \"{}\"", spec.vocabulary.language),
            ))
        })?;
        let lemmatizer = Arc::new(MorphyLemmatizer::new(Arc::clone(&wordlist)));
        let classifier = VocabularyClassifier::new(stopwords, lemmatizer, wordlist);

        Ok(Self {
            registry: registry.select(&spec.metrics),
            classifier,
            denominator: spec.vocabulary.denominator,
            item_kind: Some(spec.item_kind.clone()),
        })
    }

    pub fn with_registry(mut self, registry: MetricRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_denominator(mut self, denominator: CoverageDenominator) -> Self {
        self.denominator = denominator;
        self
    }

    /// Override the corpus item kind in descriptions
    pub fn with_item_kind(mut self, item_kind: impl Into<String>) -> Self {
        self.item_kind = Some(item_kind.into());
        self
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    pub fn classifier(&self) -> &VocabularyClassifier {
        &self.classifier
    }

    pub fn context<'a>(&self, corpus: &'a dyn CorpusReader) -> MetricContext<'a> {
        MetricContext::new(corpus, &self.classifier, self.denominator)
    }

    /// Evaluate every registered metric against `corpus`
    pub fn run(&self, corpus: &dyn CorpusReader) -> MetricsReport {
        let ctx = self.context(corpus);
        self.report(&ctx)
    }

    /// Evaluate every registered metric against a prepared context
    pub fn report(&self, ctx: &MetricContext<'_>) -> MetricsReport {
        trace_stage!("report");

        let item_kind = self
            .item_kind
            .clone()
            .unwrap_or_else(|| ctx.corpus().item_kind().to_string());

        let rows = self
            .registry
            .iter()
            .map(|descriptor| {
                let outcome = match descriptor.evaluate(ctx) {
                    Ok(value) => MetricOutcome::Value(value),
                    Err(err) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(metric = descriptor.id, code = %err.code(), "{err}");
                        MetricOutcome::Error(MetricFailure::from(&err))
                    }
                };
                ReportRow {
                    id: descriptor.id,
                    name: descriptor.name,
                    formula: descriptor.formula,
                    description: descriptor.describe(&item_kind),
                    family: descriptor.family,
                    rank: descriptor.rank,
                    outcome,
                }
            })
            .collect();

        MetricsReport { item_kind, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::StoryCorpus;
    use crate::nlp::stopwords::StopwordFilter;
    use crate::types::Sentence;

    fn wordlist() -> Arc<WordList> {
        Arc::new(WordList::from_words([
            "show", "cool", "project", "ask", "favorite", "tool", "release", "go",
        ]))
    }

    fn engine() -> MetricsEngine {
        let classifier = VocabularyClassifier::with_wordlist(wordlist()).with_stopwords(
            StopwordFilter::from_list(&["my", "is", "what", "your", "a", "the", "of", "in"]),
        );
        MetricsEngine::new(classifier)
    }

    fn ratio(report: &MetricsReport, id: &str) -> f64 {
        match report.value(id) {
            Some(MetricValue::Ratio(x)) => x,
            other => panic!("{id}: expected ratio, got {other:?}"),
        }
    }

    fn count(report: &MetricsReport, id: &str) -> usize {
        match report.value(id) {
            Some(MetricValue::Count(n)) => n,
            other => panic!("{id}: expected count, got {other:?}"),
        }
    }

    fn show_hn() -> StoryCorpus {
        StoryCorpus::from_titles([
            "Show HN: My cool project",
            "SHOW HN: MY COOL PROJECT",
            "Ask HN: What is your favorite tool?",
        ])
        .unwrap()
    }

    #[test]
    fn test_end_to_end_show_hn() {
        let report = engine().run(&show_hn());

        assert_eq!(report.len(), 19);
        assert_eq!(report.failures().count(), 0);
        assert_eq!(report.item_kind, "titles");

        assert_eq!(count(&report, "item_count"), 3);
        assert_eq!(count(&report, "unique_item_count"), 3);
        assert_eq!(ratio(&report, "duplicate_proportion"), 0.0);
        assert_eq!(ratio(&report, "uppercase_item_proportion"), 0.3333);
        assert_eq!(count(&report, "token_count"), 17);

        assert_eq!(count(&report, "dictionary_length"), 7);
        assert_eq!(count(&report, "lemma_dictionary_length"), 7);
        assert_eq!(count(&report, "alpha_lemma_length"), 7);
        assert_eq!(ratio(&report, "lexical_diversity"), 0.5833);
        assert_eq!(ratio(&report, "hapax_proportion"), 0.4286);
        assert_eq!(ratio(&report, "in_vocabulary_proportion"), 0.8571);
        assert_eq!(ratio(&report, "out_of_vocabulary_proportion"), 0.1429);
        assert_eq!(ratio(&report, "numerical_proportion"), 0.0);
        assert_eq!(ratio(&report, "numerical_frequency"), 0.0);
        assert_eq!(ratio(&report, "uppercase_token_proportion"), 0.1667);

        assert_eq!(ratio(&report, "average_length"), 5.67);
        assert_eq!(ratio(&report, "std_length"), 1.15);
        assert_eq!(ratio(&report, "median_length"), 5.0);
        assert_eq!(report.value("min_max_length"), Some(MetricValue::Range(5, 7)));
    }

    #[test]
    fn test_rows_follow_rank_order() {
        let report = engine().run(&show_hn());
        let ranks: Vec<u32> = report.rows.iter().map(|r| r.rank).collect();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(report.rows[0].id, "duplicate_proportion");
        assert_eq!(report.rows[1].description, "Number of titles");
    }

    #[test]
    fn test_single_title_isolates_std_failure() {
        let corpus = StoryCorpus::from_titles(["Rust 1.80 released"]).unwrap();
        let report = engine().run(&corpus);

        let failures: Vec<_> = report.failures().map(|r| r.id).collect();
        assert_eq!(failures, vec!["std_length"]);
        let failure = report.get("std_length").unwrap().error().unwrap();
        assert_eq!(failure.code, ErrorCode::InsufficientSample);

        assert_eq!(ratio(&report, "average_length"), 3.0);
        assert_eq!(ratio(&report, "numerical_proportion"), 0.3333);
        assert_eq!(ratio(&report, "numerical_frequency"), 0.3333);
        assert_eq!(ratio(&report, "in_vocabulary_proportion"), 0.3333);
    }

    #[test]
    fn test_alpha_denominator() {
        let corpus = StoryCorpus::from_titles(["Rust 1.80 released"]).unwrap();
        let report = engine()
            .with_denominator(CoverageDenominator::AlphaLemmas)
            .run(&corpus);

        assert_eq!(count(&report, "lemma_dictionary_length"), 3);
        assert_eq!(count(&report, "alpha_lemma_length"), 2);
        assert_eq!(ratio(&report, "numerical_proportion"), 0.5);
        assert_eq!(ratio(&report, "in_vocabulary_proportion"), 0.5);
        assert_eq!(ratio(&report, "out_of_vocabulary_proportion"), 0.5);
    }

    #[test]
    fn test_zero_denominators_are_reported() {
        let corpus = StoryCorpus::from_titles(["The of a", "in the"]).unwrap();
        let report = engine().run(&corpus);

        assert_eq!(count(&report, "dictionary_length"), 0);
        for id in [
            "lexical_diversity",
            "hapax_proportion",
            "in_vocabulary_proportion",
            "numerical_frequency",
            "uppercase_token_proportion",
        ] {
            let failure = report.get(id).unwrap().error().unwrap();
            assert_eq!(failure.code, ErrorCode::DivisionByZero, "{id}");
        }
        assert!(report.get("std_length").unwrap().value().is_some());
    }

    #[test]
    fn test_duplicates() {
        let corpus = StoryCorpus::from_titles([
            "Rust 1.80 released",
            "Rust 1.80 released!",
            "Go 1.23 released",
        ])
        .unwrap();
        let report = engine().run(&corpus);
        assert_eq!(count(&report, "unique_item_count"), 2);
        assert_eq!(ratio(&report, "duplicate_proportion"), 0.3333);
    }

    #[test]
    fn test_hapax_proportion_tracks_repeats() {
        let distinct = StoryCorpus::from_titles(["Rust compiler released", "Zig allocator design"])
            .unwrap();
        let report = engine().run(&distinct);
        assert_eq!(count(&report, "dictionary_length"), 6);
        assert_eq!(ratio(&report, "hapax_proportion"), 1.0);

        let repeated = StoryCorpus::from_titles(["Rust compiler released", "Rust allocator design"])
            .unwrap();
        let report = engine().run(&repeated);
        assert_eq!(count(&report, "dictionary_length"), 5);
        let hapaxes = ratio(&report, "hapax_proportion");
        assert!(hapaxes < 1.0);
        assert_eq!(hapaxes, 0.8);
    }

    #[test]
    fn test_proportions_stay_in_bounds() {
        let corpora = [
            vec!["a"],
            vec!["Show HN: x", "Show HN: x", "Show HN: x"],
            vec!["NEW: 2024 results", "new results", "Results 2024", "results results"],
            vec!["AWS outage", "GCP outage", "AWS outage", "!!!"],
        ];
        for titles in corpora {
            let corpus = StoryCorpus::from_titles(titles.clone()).unwrap();
            let report = engine().run(&corpus);
            for id in ["duplicate_proportion", "hapax_proportion", "uppercase_item_proportion"] {
                if let Some(MetricValue::Ratio(x)) = report.value(id) {
                    assert!((0.0..=1.0).contains(&x), "{id} = {x} for {titles:?}");
                }
            }
            let distinct = corpus.unique_indices().len() == corpus.len();
            assert_eq!(ratio(&report, "duplicate_proportion") == 0.0, distinct);
        }
    }

    #[test]
    fn test_from_spec() {
        let spec = ReportSpec::from_json(
            r#"{
                "v": 1,
                "item_kind": "stories",
                "metrics": { "include": ["item_count", "lexical_diversity"], "precision": { "lexical_diversity": 2 } }
            }"#,
        )
        .unwrap();
        let engine = MetricsEngine::from_spec(&spec, wordlist()).unwrap();
        let tokenizer = spec.build_tokenizer();
        let corpus = StoryCorpus::from_source(&["Show HN: My cool project"][..], &tokenizer).unwrap();
        let report = engine.run(&corpus);

        assert_eq!(report.item_kind, "stories");
        assert_eq!(report.len(), 2);
        assert_eq!(report.rows[0].description, "Number of stories");
        assert_eq!(ratio(&report, "lexical_diversity"), 1.0);
    }

    #[test]
    fn test_from_spec_rejects_invalid() {
        let spec = ReportSpec::from_json(
            r#"{ "v": 2, "metrics": { "exclude": ["bogus"] } }"#,
        )
        .unwrap();
        let err = MetricsEngine::from_spec(&spec, wordlist()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnsupportedVersion);
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.errors[0].code, ErrorCode::UnsupportedVersion);
        assert_eq!(err.errors[1].code, ErrorCode::UnknownMetric);
    }

    #[test]
    fn test_report_serialization() {
        let corpus = StoryCorpus::from_titles(["Rust 1.80 released"]).unwrap();
        let report = engine().with_item_kind("stories").run(&corpus);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["item_kind"], "stories");
        let rows = json["rows"].as_array().unwrap();
        let items = rows.iter().find(|r| r["id"] == "item_count").unwrap();
        assert_eq!(items["value"], 1);
        assert_eq!(items["family"], "volume");
        assert!(items.get("error").is_none());

        let std = rows.iter().find(|r| r["id"] == "std_length").unwrap();
        assert_eq!(std["error"]["code"], "insufficient_sample");
        assert_eq!(std["error"]["message"], "needs at least 2 samples, got 1");
        assert!(std.get("value").is_none());

        let range = rows.iter().find(|r| r["id"] == "min_max_length").unwrap();
        assert_eq!(range["value"], serde_json::json!([3, 3]));
    }

    struct FixedCorpus {
        titles: Vec<String>,
        sentences: Vec<Sentence>,
        words: Vec<String>,
        unique: Vec<usize>,
    }

    impl CorpusReader for FixedCorpus {
        fn item_kind(&self) -> &str {
            "headlines"
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

    #[test]
    fn test_engine_only_needs_the_reader_trait() {
        let sentence = Sentence::new(vec!["cool".into(), "tools".into()]);
        let corpus = FixedCorpus {
            titles: vec!["cool tools".into(), "cool tools".into()],
            sentences: vec![sentence.clone(), sentence],
            words: ["cool", "tools", "cool", "tools"].map(String::from).to_vec(),
            unique: vec![0],
        };
        let report = engine().run(&corpus);
        assert_eq!(report.item_kind, "headlines");
        assert_eq!(ratio(&report, "duplicate_proportion"), 0.5);
        assert_eq!(count(&report, "lemma_dictionary_length"), 2);
        assert_eq!(ratio(&report, "in_vocabulary_proportion"), 1.0);
    }
}
