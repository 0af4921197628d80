//! Frequency distribution over meaningful tokens

use rustc_hash::FxHashMap;

/// Token counts. Every stored count is at least 1 and the counts sum to
/// [`total`](Self::total).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyDistribution {
    counts: FxHashMap<String, usize>,
    total: usize,
}

impl FrequencyDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `token`
    pub fn add(&mut self, token: &str) {
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(token.to_string(), 1);
            }
        }
        self.total += 1;
    }

    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Relative frequency of `token`; 0.0 for an empty distribution
    pub fn freq(&self, token: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(token) as f64 / self.total as f64
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of occurrences across all tokens
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.counts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Tokens seen exactly once, sorted
    pub fn hapaxes(&self) -> Vec<&str> {
        let mut hapaxes: Vec<&str> = self
            .iter()
            .filter(|&(_, count)| count == 1)
            .map(|(token, _)| token)
            .collect();
        hapaxes.sort_unstable();
        hapaxes
    }

    /// The `n` most frequent tokens; ties broken alphabetically
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }
}

impl<'a> FromIterator<&'a str> for FrequencyDistribution {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut dist = Self::new();
        for token in iter {
            dist.add(token);
        }
        dist
    }
}
