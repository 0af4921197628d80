//! Metric descriptors
//!
//! A [`MetricDescriptor`] is a plain value: display metadata plus a function
//! pointer computing the metric from a [`MetricContext`]. Descriptors are
//! declared once in the registry and never mutated afterwards; overriding
//! precision produces a new descriptor.

use serde::Serialize;

use super::engine::MetricContext;
use crate::errors::MetricError;

/// Placeholder replaced by the corpus item kind in descriptions.
pub const ITEMS_PLACEHOLDER: &str = "{items}";

/// Metric grouping used for report layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFamily {
    Volume,
    Shape,
    Coverage,
    Casing,
}

/// A computed metric value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(usize),
    Ratio(f64),
    Range(usize, usize),
}

impl MetricValue {
    /// Round ratios half away from zero to `precision` decimals.
    ///
    /// Precision 0 leaves the value untouched; counts and ranges are exact.
    pub fn rounded(self, precision: u32) -> Self {
        match self {
            Self::Ratio(x) if precision > 0 => {
                let scale = 10f64.powi(precision as i32);
                Self::Ratio((x * scale).round() / scale)
            }
            other => other,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Count(n) => Some(n as f64),
            Self::Ratio(x) => Some(x),
            Self::Range(..) => None,
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Ratio(x) => write!(f, "{x}"),
            Self::Range(lo, hi) => write!(f, "({lo}, {hi})"),
        }
    }
}

/// Computes one metric from the shared context
pub type MetricFn = fn(&MetricContext<'_>) -> Result<MetricValue, MetricError>;

/// Static metadata bound to a metric computation
#[derive(Clone, Copy)]
pub struct MetricDescriptor {
    /// Stable identifier used in specs and serialized reports
    pub id: &'static str,
    /// Human display name
    pub name: &'static str,
    /// One-line description; may contain `{items}`
    pub description: &'static str,
    /// LaTeX formula label
    pub formula: &'static str,
    /// Rounding precision, 0 = none
    pub precision: u32,
    /// Report ordering key, ascending
    pub rank: u32,
    pub family: MetricFamily,
    pub compute: MetricFn,
}

impl std::fmt::Debug for MetricDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricDescriptor")
            .field("id", &self.id)
            .field("rank", &self.rank)
            .field("precision", &self.precision)
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl MetricDescriptor {
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Description with `{items}` replaced by `item_kind`
    pub fn describe(&self, item_kind: &str) -> String {
        self.description.replace(ITEMS_PLACEHOLDER, item_kind)
    }

    /// Compute and round
    pub fn evaluate(&self, ctx: &MetricContext<'_>) -> Result<MetricValue, MetricError> {
        (self.compute)(ctx).map(|value| value.rounded(self.precision))
    }
}
