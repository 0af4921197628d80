//! Validation engine for report specifications.
//!
//! The engine runs every registered [`ValidationRule`] against a
//! [`ReportSpec`] and collects all diagnostics into a [`ValidationReport`].
//! It never stops at the first error, so users see all problems at once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use story_metrics::config::validation::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&spec);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use std::collections::HashMap;

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::{ReportSpec, SPEC_VERSION};
use crate::errors::{ConfigError, ErrorCode};
use crate::metrics::registry::MetricRegistry;
use crate::nlp::stopwords::{StopwordFilter, SUPPORTED_LANGUAGES};

/// Largest accepted rounding precision.
pub const MAX_PRECISION: u32 = 12;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding with its severity.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: ConfigError,
}

impl ValidationDiagnostic {
    pub fn error(err: ConfigError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: ConfigError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// No errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Owned copies of the error diagnostics
    pub fn into_errors(self) -> Vec<ConfigError> {
        self.diagnostics
            .into_iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| d.error)
            .collect()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`ReportSpec`] and returns
/// zero or more diagnostics.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"version"`).
    fn name(&self) -> &str;

    fn validate(&self, spec: &ReportSpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`ReportSpec`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Default rule set, checking metric names against the built-in registry.
    pub fn with_defaults() -> Self {
        Self::for_registry(&MetricRegistry::with_defaults())
    }

    /// Default rule set, checking metric names against `registry`.
    pub fn for_registry(registry: &MetricRegistry) -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(ItemKindRule));
        engine.add_rule(Box::new(LanguageRule));
        engine.add_rule(Box::new(UnknownMetricRule {
            known: registry.ids().map(str::to_string).collect(),
        }));
        engine.add_rule(Box::new(PrecisionRule));
        engine.add_rule(Box::new(SelectionOverlapRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    /// Run all rules against `spec` and return the collected report.
    pub fn validate(&self, spec: &ReportSpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Spec version ────────────────────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, spec: &ReportSpec) -> Vec<ValidationDiagnostic> {
        if spec.v == SPEC_VERSION {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("unsupported spec version {}", spec.v),
            )
            .with_hint(format!("Set \"v\" to {SPEC_VERSION}")),
        )]
    }
}

// ─── 2. Item kind must be non-empty ─────────────────────────────────────────

struct ItemKindRule;

impl ValidationRule for ItemKindRule {
    fn name(&self) -> &str {
        "item_kind"
    }

    fn validate(&self, spec: &ReportSpec) -> Vec<ValidationDiagnostic> {
        if !spec.item_kind.trim().is_empty() {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigError::new(ErrorCode::InvalidValue, "/item_kind", "item_kind is empty")
                .with_hint("Use a plural noun such as \"titles\""),
        )]
    }
}

// ─── 3. Stopword language ───────────────────────────────────────────────────

struct LanguageRule;

impl ValidationRule for LanguageRule {
    fn name(&self) -> &str {
        "language"
    }

    fn validate(&self, spec: &ReportSpec) -> Vec<ValidationDiagnostic> {
        let language = &spec.vocabulary.language;
        if StopwordFilter::is_supported(language) {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigError::new(
                ErrorCode::InvalidValue,
                "/vocabulary/language",
                format!("no stopword list for language \"{language}\""),
            )
            .with_hint(format!("Supported: {}", SUPPORTED_LANGUAGES.join(", "))),
        )]
    }
}

// ─── 4. Metric names must be registered ─────────────────────────────────────

struct UnknownMetricRule {
    known: FxHashSet<String>,
}

impl UnknownMetricRule {
    fn check(&self, path: String, id: &str) -> Option<ValidationDiagnostic> {
        if self.known.contains(id) {
            return None;
        }
        Some(ValidationDiagnostic::error(
            ConfigError::new(ErrorCode::UnknownMetric, path, format!("unknown metric \"{id}\""))
                .with_hint("Check spelling against the metric registry"),
        ))
    }
}

impl ValidationRule for UnknownMetricRule {
    fn name(&self) -> &str {
        "unknown_metric"
    }

    fn validate(&self, spec: &ReportSpec) -> Vec<ValidationDiagnostic> {
        let selection = &spec.metrics;
        let mut out = Vec::new();

        if let Some(include) = &selection.include {
            for (i, id) in include.iter().enumerate() {
                out.extend(self.check(format!("/metrics/include/{i}"), id));
            }
        }
        for (i, id) in selection.exclude.iter().enumerate() {
            out.extend(self.check(format!("/metrics/exclude/{i}"), id));
        }
        for id in sorted_keys(&selection.precision) {
            out.extend(self.check(format!("/metrics/precision/{id}"), id));
        }
        out
    }
}

// ─── 5. Precision overrides stay in range ───────────────────────────────────

struct PrecisionRule;

impl ValidationRule for PrecisionRule {
    fn name(&self) -> &str {
        "precision"
    }

    fn validate(&self, spec: &ReportSpec) -> Vec<ValidationDiagnostic> {
        let precision = &spec.metrics.precision;
        sorted_keys(precision)
            .into_iter()
            .filter(|id| precision[*id] > MAX_PRECISION)
            .map(|id| {
                ValidationDiagnostic::error(
                    ConfigError::new(
                        ErrorCode::InvalidValue,
                        format!("/metrics/precision/{id}"),
                        format!("precision {} exceeds {MAX_PRECISION}", precision[id]),
                    )
                    .with_hint("Use 0 for no rounding, or a value up to 12"),
                )
            })
            .collect()
    }
}

// ─── 6. include and exclude must not overlap ────────────────────────────────

struct SelectionOverlapRule;

impl ValidationRule for SelectionOverlapRule {
    fn name(&self) -> &str {
        "selection_overlap"
    }

    fn validate(&self, spec: &ReportSpec) -> Vec<ValidationDiagnostic> {
        let Some(include) = &spec.metrics.include else {
            return vec![];
        };
        spec.metrics
            .exclude
            .iter()
            .enumerate()
            .filter(|(_, id)| include.contains(id))
            .map(|(i, id)| {
                ValidationDiagnostic::error(
                    ConfigError::new(
                        ErrorCode::InvalidCombo,
                        format!("/metrics/exclude/{i}"),
                        format!("metric \"{id}\" is both included and excluded"),
                    )
                    .with_hint("Remove it from one of the two lists"),
                )
            })
            .collect()
    }
}

// ─── 7. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    fn check_unknowns(
        path: &str,
        unknowns: &HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        sorted_keys(unknowns)
            .into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    ConfigError::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &ReportSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        out.extend(Self::check_unknowns("", &spec.unknown_fields, spec.strict));
        out.extend(Self::check_unknowns(
            "/tokenizer",
            &spec.tokenizer.unknown_fields,
            spec.strict,
        ));
        out.extend(Self::check_unknowns(
            "/vocabulary",
            &spec.vocabulary.unknown_fields,
            spec.strict,
        ));
        out.extend(Self::check_unknowns(
            "/metrics",
            &spec.metrics.unknown_fields,
            spec.strict,
        ));
        out
    }
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
