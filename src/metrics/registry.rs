//! Metric registry
//!
//! The built-in metrics, declared as descriptor values. Report order follows
//! `rank`; ranks are spaced by ten so custom metrics can slot in between.

use super::descriptor::{MetricDescriptor, MetricFamily, MetricValue};
use super::engine::MetricContext;
use super::stats::{extremum, mean, median, ratio, std_dev};
use crate::config::MetricSelection;
use crate::errors::MetricError;

type MetricResult = Result<MetricValue, MetricError>;

/// Ordered collection of metric descriptors
#[derive(Debug, Clone, Default)]
pub struct MetricRegistry {
    descriptors: Vec<MetricDescriptor>,
}

impl MetricRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in metric set
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for descriptor in DEFAULT_METRICS {
            registry.register(*descriptor);
        }
        registry
    }

    /// Add a descriptor, replacing any existing one with the same id
    pub fn register(&mut self, descriptor: MetricDescriptor) {
        self.descriptors.retain(|d| d.id != descriptor.id);
        let at = self
            .descriptors
            .partition_point(|d| d.rank <= descriptor.rank);
        self.descriptors.insert(at, descriptor);
    }

    pub fn get(&self, id: &str) -> Option<&MetricDescriptor> {
        self.descriptors.iter().find(|d| d.id == id)
    }

    /// Descriptor ids in rank order
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.iter().map(|d| d.id)
    }

    /// Descriptors in rank order
    pub fn iter(&self) -> impl Iterator<Item = &MetricDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Keep only the selected metrics and apply precision overrides.
    ///
    /// Unknown ids in the selection are ignored here; the validation engine
    /// reports them.
    pub fn select(mut self, selection: &MetricSelection) -> Self {
        self.descriptors.retain(|d| selection.selects(d.id));
        for descriptor in &mut self.descriptors {
            if let Some(&precision) = selection.precision.get(descriptor.id) {
                *descriptor = descriptor.with_precision(precision);
            }
        }
        self
    }
}

// ─── Built-in metrics ───────────────────────────────────────────────────────

const DEFAULT_METRICS: &[MetricDescriptor] = &[
    MetricDescriptor {
        id: "duplicate_proportion",
        name: "duplicate proportion",
        description: "Share of {items} whose tokens repeat an earlier item",
        formula: r"$ \vert \mathcal{C} \vert - \vert \mathcal{C}_{unique} \vert \over \vert \mathcal{C} \vert $",
        precision: 4,
        rank: 10,
        family: MetricFamily::Coverage,
        compute: duplicate_proportion,
    },
    MetricDescriptor {
        id: "item_count",
        name: "count",
        description: "Number of {items}",
        formula: r"$ \vert \mathcal{C} \vert $",
        precision: 0,
        rank: 20,
        family: MetricFamily::Volume,
        compute: item_count,
    },
    MetricDescriptor {
        id: "unique_item_count",
        name: "unique count",
        description: "Number of distinct {items} after tokenization",
        formula: r"$ \vert \mathcal{C}_{unique} \vert $",
        precision: 0,
        rank: 30,
        family: MetricFamily::Volume,
        compute: unique_item_count,
    },
    MetricDescriptor {
        id: "token_count",
        name: "token count",
        description: "Number of tokens across all {items}",
        formula: r"$ \vert \mathcal{T} \vert $",
        precision: 0,
        rank: 40,
        family: MetricFamily::Volume,
        compute: token_count,
    },
    MetricDescriptor {
        id: "dictionary_length",
        name: "dictionary length",
        description: "Distinct meaningful tokens in unique {items}",
        formula: r"$\vert \mathcal{D} \vert$",
        precision: 0,
        rank: 50,
        family: MetricFamily::Volume,
        compute: dictionary_length,
    },
    MetricDescriptor {
        id: "lemma_dictionary_length",
        name: "lem dictionary length",
        description: "Distinct lemmas of the dictionary",
        formula: r"$\vert \mathcal{D}_{lemme} \vert$",
        precision: 0,
        rank: 60,
        family: MetricFamily::Volume,
        compute: lemma_dictionary_length,
    },
    MetricDescriptor {
        id: "alpha_lemma_length",
        name: "alpha lem dictionary length",
        description: "Distinct non-numeric lemmas of the dictionary",
        formula: r"$\vert \mathcal{D}_{lemme} \vert - d_{numerical}$",
        precision: 0,
        rank: 70,
        family: MetricFamily::Volume,
        compute: alpha_lemma_length,
    },
    MetricDescriptor {
        id: "in_vocabulary_proportion",
        name: "in vocabulary",
        description: "Share of lemmas found in the reference word list",
        formula: r"$\vert \mathcal{D}_{lemme} \cap \mathcal{D}_{ref} \vert \over \vert \mathcal{D}_{lemme} \vert$",
        precision: 4,
        rank: 80,
        family: MetricFamily::Coverage,
        compute: in_vocabulary_proportion,
    },
    MetricDescriptor {
        id: "out_of_vocabulary_proportion",
        name: "out of vocabulary",
        description: "Share of non-numeric lemmas missing from the reference word list",
        formula: r"$\vert \mathcal{D}_{lemme} \vert - \vert \mathcal{D}_{lemme} \cap \mathcal{D}_{ref} \vert \over \vert \mathcal{D}_{lemme} \vert$",
        precision: 4,
        rank: 90,
        family: MetricFamily::Coverage,
        compute: out_of_vocabulary_proportion,
    },
    MetricDescriptor {
        id: "numerical_proportion",
        name: "numerical proportion",
        description: "Share of lemmas that are numbers",
        formula: r"$d_{numerical} \over d$",
        precision: 4,
        rank: 100,
        family: MetricFamily::Coverage,
        compute: numerical_proportion,
    },
    MetricDescriptor {
        id: "numerical_frequency",
        name: "numerical frequency",
        description: "Share of meaningful token occurrences that are numbers",
        formula: r"$\sum_{w \in \mathcal{D}_{numerical}} f(w) \over \vert \mathcal{T}_{meaningful} \vert$",
        precision: 4,
        rank: 110,
        family: MetricFamily::Coverage,
        compute: numerical_frequency,
    },
    MetricDescriptor {
        id: "lexical_diversity",
        name: "lexical diversity",
        description: "Distinct meaningful tokens per meaningful token occurrence",
        formula: r"$\vert \mathcal{D} \vert \over \vert \mathcal{T}_{meaningful} \vert$",
        precision: 4,
        rank: 120,
        family: MetricFamily::Coverage,
        compute: lexical_diversity,
    },
    MetricDescriptor {
        id: "hapax_proportion",
        name: "hapaxes",
        description: "Share of dictionary entries occurring exactly once",
        formula: r"$\vert \mathcal{D}_{hapax} \vert \over \vert \mathcal{D} \vert$",
        precision: 4,
        rank: 130,
        family: MetricFamily::Coverage,
        compute: hapax_proportion,
    },
    MetricDescriptor {
        id: "uppercase_item_proportion",
        name: "uppercase items",
        description: "Share of unique {items} written without lowercase letters",
        formula: r"$n_{upper} \over n_{unique}$",
        precision: 4,
        rank: 140,
        family: MetricFamily::Casing,
        compute: uppercase_item_proportion,
    },
    MetricDescriptor {
        id: "uppercase_token_proportion",
        name: "uppercase tokens",
        description: "Uppercase runs in mixed-case {items} per meaningful token",
        formula: r"$t_{upper} \over \vert \mathcal{T}_{meaningful} \vert$",
        precision: 4,
        rank: 150,
        family: MetricFamily::Casing,
        compute: uppercase_token_proportion,
    },
    MetricDescriptor {
        id: "average_length",
        name: "average length",
        description: "Mean token count of unique {items}",
        formula: r"$\bar{n}$",
        precision: 2,
        rank: 160,
        family: MetricFamily::Shape,
        compute: average_length,
    },
    MetricDescriptor {
        id: "std_length",
        name: "std length",
        description: "Sample standard deviation of unique {items} token counts",
        formula: r"$s_{n}$",
        precision: 2,
        rank: 170,
        family: MetricFamily::Shape,
        compute: std_length,
    },
    MetricDescriptor {
        id: "median_length",
        name: "median length",
        description: "Median token count of unique {items}",
        formula: r"$\tilde{n}$",
        precision: 2,
        rank: 180,
        family: MetricFamily::Shape,
        compute: median_length,
    },
    MetricDescriptor {
        id: "min_max_length",
        name: "min max length",
        description: "Shortest and longest unique {items} in tokens",
        formula: r"$min(n), max(n)$",
        precision: 0,
        rank: 190,
        family: MetricFamily::Shape,
        compute: min_max_length,
    },
];

// ─── Volume ─────────────────────────────────────────────────────────────────

fn item_count(ctx: &MetricContext<'_>) -> MetricResult {
    Ok(MetricValue::Count(ctx.item_count()))
}

fn unique_item_count(ctx: &MetricContext<'_>) -> MetricResult {
    Ok(MetricValue::Count(ctx.unique_item_count()))
}

fn token_count(ctx: &MetricContext<'_>) -> MetricResult {
    Ok(MetricValue::Count(ctx.token_count()))
}

fn dictionary_length(ctx: &MetricContext<'_>) -> MetricResult {
    Ok(MetricValue::Count(ctx.profile().dictionary().len()))
}

fn lemma_dictionary_length(ctx: &MetricContext<'_>) -> MetricResult {
    Ok(MetricValue::Count(ctx.profile().lemma_count()))
}

fn alpha_lemma_length(ctx: &MetricContext<'_>) -> MetricResult {
    Ok(MetricValue::Count(ctx.profile().alpha_lemma_count()))
}

// ─── Coverage ───────────────────────────────────────────────────────────────

fn duplicate_proportion(ctx: &MetricContext<'_>) -> MetricResult {
    let duplicates = ctx.item_count() - ctx.unique_item_count();
    ratio(duplicates, ctx.item_count(), "item count").map(MetricValue::Ratio)
}

fn in_vocabulary_proportion(ctx: &MetricContext<'_>) -> MetricResult {
    let (denominator, name) = ctx.coverage_denominator();
    let count = ctx.profile().partition().in_vocabulary().len();
    ratio(count, denominator, name).map(MetricValue::Ratio)
}

fn out_of_vocabulary_proportion(ctx: &MetricContext<'_>) -> MetricResult {
    let (denominator, name) = ctx.coverage_denominator();
    let count = ctx.profile().partition().out_of_vocabulary().len();
    ratio(count, denominator, name).map(MetricValue::Ratio)
}

fn numerical_proportion(ctx: &MetricContext<'_>) -> MetricResult {
    let (denominator, name) = ctx.coverage_denominator();
    let count = ctx.profile().partition().numeric().len();
    ratio(count, denominator, name).map(MetricValue::Ratio)
}

fn numerical_frequency(ctx: &MetricContext<'_>) -> MetricResult {
    let profile = ctx.profile();
    ratio(
        profile.numeric_occurrences(),
        profile.dictionary().total(),
        "meaningful token count",
    )
    .map(MetricValue::Ratio)
}

fn lexical_diversity(ctx: &MetricContext<'_>) -> MetricResult {
    let dictionary = ctx.profile().dictionary();
    ratio(dictionary.len(), dictionary.total(), "meaningful token count").map(MetricValue::Ratio)
}

fn hapax_proportion(ctx: &MetricContext<'_>) -> MetricResult {
    let dictionary = ctx.profile().dictionary();
    ratio(dictionary.hapaxes().len(), dictionary.len(), "dictionary length")
        .map(MetricValue::Ratio)
}

// ─── Casing ─────────────────────────────────────────────────────────────────

fn uppercase_item_proportion(ctx: &MetricContext<'_>) -> MetricResult {
    ratio(
        ctx.uppercase_item_count(),
        ctx.unique_item_count(),
        "unique item count",
    )
    .map(MetricValue::Ratio)
}

fn uppercase_token_proportion(ctx: &MetricContext<'_>) -> MetricResult {
    ratio(
        ctx.uppercase_run_count(),
        ctx.profile().dictionary().total(),
        "meaningful token count",
    )
    .map(MetricValue::Ratio)
}

// ─── Shape ──────────────────────────────────────────────────────────────────

fn average_length(ctx: &MetricContext<'_>) -> MetricResult {
    mean(ctx.lengths()).map(MetricValue::Ratio)
}

fn std_length(ctx: &MetricContext<'_>) -> MetricResult {
    std_dev(ctx.lengths()).map(MetricValue::Ratio)
}

fn median_length(ctx: &MetricContext<'_>) -> MetricResult {
    median(ctx.lengths()).map(MetricValue::Ratio)
}

fn min_max_length(ctx: &MetricContext<'_>) -> MetricResult {
    extremum(ctx.lengths()).map(|(min, max)| MetricValue::Range(min, max))
}
