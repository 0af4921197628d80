//! Report specification.
//!
//! A [`ReportSpec`] describes how a corpus is tokenized, which vocabulary
//! resources and coverage denominator are used, and which metrics end up in
//! the report. It is the input to [`validation::ValidationEngine`] and to
//! [`MetricsEngine::from_spec`](crate::metrics::MetricsEngine::from_spec).
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "item_kind": "titles",
//!   "tokenizer": { "preserve_case": true },
//!   "vocabulary": { "language": "en", "denominator": "all_lemmas" },
//!   "metrics": {
//!     "exclude": ["numerical_frequency"],
//!     "precision": { "lexical_diversity": 3 }
//!   },
//!   "strict": false
//! }
//! ```

pub mod validation;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::corpus::story::DEFAULT_ITEM_KIND;
use crate::errors::{ConfigError, ErrorCode};
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::StoryTokenizer;

/// The only spec version this crate understands.
pub const SPEC_VERSION: u32 = 1;

/// Top-level report specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSpec {
    /// Spec version (currently `1`).
    pub v: u32,

    /// Plural noun substituted for `{items}` in metric descriptions.
    #[serde(default = "default_item_kind")]
    pub item_kind: String,

    #[serde(default)]
    pub tokenizer: TokenizerSpec,

    #[serde(default)]
    pub vocabulary: VocabularySpec,

    #[serde(default)]
    pub metrics: MetricSelection,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_item_kind() -> String {
    DEFAULT_ITEM_KIND.to_string()
}

impl Default for ReportSpec {
    fn default() -> Self {
        Self {
            v: SPEC_VERSION,
            item_kind: default_item_kind(),
            tokenizer: TokenizerSpec::default(),
            vocabulary: VocabularySpec::default(),
            metrics: MetricSelection::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl ReportSpec {
    /// Parse a spec from JSON. Syntax and type errors map to a single
    /// [`ConfigError`] at the document root; semantic checks are left to
    /// the validation engine.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| {
            ConfigError::new(ErrorCode::InvalidValue, "", e.to_string())
                .with_hint("The spec must be a JSON object with at least a \"v\" field")
        })
    }

    /// Tokenizer configured by the `tokenizer` section
    pub fn build_tokenizer(&self) -> StoryTokenizer {
        let tokenizer = StoryTokenizer::new().with_preserve_case(self.tokenizer.preserve_case);
        match self.tokenizer.punctuation.as_deref() {
            None => tokenizer,
            Some("") => tokenizer.without_punctuation_filter(),
            Some(chars) => tokenizer.with_punctuation(chars),
        }
    }

    /// Stopword filter for the configured language plus any extra words.
    ///
    /// Returns `None` for an unsupported language.
    pub fn build_stopwords(&self) -> Option<StopwordFilter> {
        let mut filter = StopwordFilter::new(&self.vocabulary.language)?;
        let extra: Vec<&str> = self
            .vocabulary
            .extra_stopwords
            .iter()
            .map(String::as_str)
            .collect();
        filter.add_stopwords(&extra);
        Some(filter)
    }
}

/// Tokenizer options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerSpec {
    #[serde(default = "default_true")]
    pub preserve_case: bool,

    /// Characters whose pure runs are dropped as artifacts. `None` keeps the
    /// built-in set; an empty string disables the filter.
    #[serde(default)]
    pub punctuation: Option<String>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_true() -> bool {
    true
}

impl Default for TokenizerSpec {
    fn default() -> Self {
        Self {
            preserve_case: true,
            punctuation: None,
            unknown_fields: HashMap::new(),
        }
    }
}

/// Denominator for the numerical and vocabulary coverage proportions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageDenominator {
    /// Every lemma, numeric ones included.
    #[default]
    AllLemmas,
    /// Lemmas minus the numeric partition.
    AlphaLemmas,
}

/// Vocabulary resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularySpec {
    /// Stopword language code.
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub extra_stopwords: Vec<String>,

    #[serde(default)]
    pub denominator: CoverageDenominator,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for VocabularySpec {
    fn default() -> Self {
        Self {
            language: default_language(),
            extra_stopwords: Vec::new(),
            denominator: CoverageDenominator::default(),
            unknown_fields: HashMap::new(),
        }
    }
}

/// Which metrics the report contains and how they are rounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricSelection {
    /// Metric ids to keep. `None` keeps every registered metric.
    #[serde(default)]
    pub include: Option<Vec<String>>,

    #[serde(default)]
    pub exclude: Vec<String>,

    /// Per-metric rounding overrides (0 = no rounding).
    #[serde(default)]
    pub precision: HashMap<String, u32>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl MetricSelection {
    /// Whether metric `id` survives include/exclude filtering
    pub fn selects(&self, id: &str) -> bool {
        let included = self
            .include
            .as_ref()
            .map_or(true, |ids| ids.iter().any(|i| i == id));
        included && !self.exclude.iter().any(|e| e == id)
    }
}
