//! Test builders: ergonomic constructors for raw rows, records and result sets.
//!
//! These are for readability in test assertions, not production use. They
//! panic on invalid input rather than returning `Result`.

use capscore_core::{metrics::compute, Metrics, ResultSet, RowRecord};
use capscore_feeds::{RawLikes, RawRow};

/// Fluent builder for [`RawRow`] fixtures.
///
/// ```rust
/// let row = RawRowBuilder::new("15/1/2024").likes(120).url("https://x.test/p/1").build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawRowBuilder {
    date: Option<String>,
    likes: Option<RawLikes>,
    url: Option<String>,
}

impl RawRowBuilder {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    /// A row with no date at all.
    pub fn undated() -> Self {
        Self::default()
    }

    pub fn likes(mut self, likes: u64) -> Self {
        self.likes = Some(RawLikes::Number(likes as f64));
        self
    }

    pub fn likes_text(mut self, likes: impl Into<String>) -> Self {
        self.likes = Some(RawLikes::Text(likes.into()));
        self
    }

    pub fn likes_raw(mut self, likes: f64) -> Self {
        self.likes = Some(RawLikes::Number(likes));
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn build(self) -> RawRow {
        RawRow {
            date: self.date,
            likes: self.likes,
            url: self.url,
        }
    }
}

/// Valid raw rows with the given like counts and sequential dates.
pub fn raw_rows(likes: &[u64]) -> Vec<RawRow> {
    likes
        .iter()
        .enumerate()
        .map(|(i, &l)| RawRowBuilder::new(format!("{}/1/2024", i + 1)).likes(l).build())
        .collect()
}

/// Validated records with the given like counts.
pub fn records(likes: &[u64]) -> Vec<RowRecord> {
    likes
        .iter()
        .enumerate()
        .map(|(i, &l)| RowRecord::new(format!("{}/1/2024", i + 1), l, None))
        .collect()
}

pub fn metrics_for(likes: &[u64]) -> Metrics {
    compute(records(likes))
}

/// A result set filled in the given arrival order.
pub fn result_set(sources: &[(&str, &[u64])]) -> ResultSet {
    let mut set = ResultSet::new();
    for (name, likes) in sources {
        assert!(set.insert(*name, metrics_for(likes)), "duplicate source {name}");
    }
    set
}

pub fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
