//! Corpus metrics
//!
//! Metrics are declared as [`MetricDescriptor`] values in a
//! [`MetricRegistry`]. The [`MetricsEngine`] builds a [`MetricContext`] for a
//! corpus and evaluates the registry into a [`MetricsReport`].

pub mod descriptor;
pub mod engine;
pub mod registry;
pub mod stats;

pub use descriptor::{MetricDescriptor, MetricFamily, MetricFn, MetricValue};
pub use engine::{
    MetricContext, MetricFailure, MetricOutcome, MetricsEngine, MetricsReport, ReportRow,
};
pub use registry::MetricRegistry;
