//! Error types
//!
//! Corpus construction problems ([`CorpusError`]) are fatal and go back to
//! the caller. A rejected report spec is a [`SpecError`] holding every
//! [`ConfigError`] finding, each with a JSON pointer path and an optional
//! hint. Metric-time problems ([`MetricError`]) stay inside the report row of
//! the metric that hit them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    CorpusUnavailable,
    InsufficientSample,
    DivisionByZero,
    MalformedRecord,
    UnsupportedVersion,
    UnknownField,
    UnknownMetric,
    InvalidValue,
    InvalidCombo,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CorpusUnavailable => "corpus_unavailable",
            Self::InsufficientSample => "insufficient_sample",
            Self::DivisionByZero => "division_by_zero",
            Self::MalformedRecord => "malformed_record",
            Self::UnsupportedVersion => "unsupported_version",
            Self::UnknownField => "unknown_field",
            Self::UnknownMetric => "unknown_metric",
            Self::InvalidValue => "invalid_value",
            Self::InvalidCombo => "invalid_combo",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single spec validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{path}: {message}")]
pub struct ConfigError {
    pub code: ErrorCode,
    /// JSON pointer to the offending field (`""` for the document root)
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ConfigError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Fatal errors raised while building a corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The record source is missing, unreadable or empty.
    #[error("corpus unavailable: {0}")]
    Unavailable(String),
}

impl CorpusError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Unavailable(_) => ErrorCode::CorpusUnavailable,
        }
    }
}

/// A report spec rejected by validation. Never empty.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid report spec: {}", summarize(&self.errors))]
pub struct SpecError {
    pub errors: Vec<ConfigError>,
}

impl SpecError {
    pub fn new(errors: Vec<ConfigError>) -> Self {
        Self { errors }
    }

    /// Code of the first finding
    pub fn code(&self) -> ErrorCode {
        self.errors
            .first()
            .map(|e| e.code)
            .unwrap_or(ErrorCode::InvalidValue)
    }
}

impl From<ConfigError> for SpecError {
    fn from(error: ConfigError) -> Self {
        Self::new(vec![error])
    }
}

fn summarize(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A failure computing one metric.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("needs at least {required} samples, got {actual}")]
    InsufficientSample { required: usize, actual: usize },

    #[error("{denominator} is zero")]
    DivisionByZero { denominator: &'static str },
}

impl MetricError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InsufficientSample { .. } => ErrorCode::InsufficientSample,
            Self::DivisionByZero { .. } => ErrorCode::DivisionByZero,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serializes_snake_case() {
        let json = serde_json::to_value(ErrorCode::DivisionByZero).unwrap();
        assert_eq!(json, "division_by_zero");
        assert_eq!(ErrorCode::UnknownMetric.to_string(), "unknown_metric");
    }

    #[test]
    fn test_config_error_display_and_hint() {
        let err = ConfigError::new(ErrorCode::UnknownMetric, "/metrics/exclude/0", "unknown metric \"x\"")
            .with_hint("Check spelling");
        assert_eq!(err.to_string(), "/metrics/exclude/0: unknown metric \"x\"");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "unknown_metric");
        assert_eq!(json["hint"], "Check spelling");
    }

    #[test]
    fn test_corpus_error_codes() {
        let err = CorpusError::Unavailable("record source is empty".into());
        assert_eq!(err.code(), ErrorCode::CorpusUnavailable);
        assert_eq!(err.to_string(), "corpus unavailable: record source is empty");
    }

    #[test]
    fn test_spec_error_reports_every_finding() {
        let err = SpecError::new(vec![
            ConfigError::new(ErrorCode::UnsupportedVersion, "/v", "bad version"),
            ConfigError::new(ErrorCode::UnknownField, "/x", "unknown"),
        ]);
        assert_eq!(err.code(), ErrorCode::UnsupportedVersion);
        assert_eq!(err.to_string(), "invalid report spec: /v: bad version; /x: unknown");

        let single: SpecError = ConfigError::new(ErrorCode::InvalidValue, "", "not json").into();
        assert_eq!(single.errors.len(), 1);
        assert_eq!(single.code(), ErrorCode::InvalidValue);
    }

    #[test]
    fn test_metric_error_messages() {
        let err = MetricError::InsufficientSample { required: 2, actual: 1 };
        assert_eq!(err.code(), ErrorCode::InsufficientSample);
        assert_eq!(err.to_string(), "needs at least 2 samples, got 1");

        let err = MetricError::DivisionByZero { denominator: "item count" };
        assert_eq!(err.to_string(), "item count is zero");
    }
}
