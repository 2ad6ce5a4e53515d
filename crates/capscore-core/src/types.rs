//! Core types for capscore-core.
//!
//! This module defines the data model shared across all crates: the validated
//! [`RowRecord`], the derived [`ProcessedRow`] and [`Metrics`], the
//! insertion-ordered [`ResultSet`] the coordinator accumulates into, and the
//! ranked output consumed by the presenter.

use serde::Serialize;

/// Link shown for a post whose sheet row carries no URL.
pub const DEFAULT_URL: &str = "#";

/// A single validated engagement observation.
///
/// Rows are only constructed after validation at the fetch boundary, so every
/// `RowRecord` has a non-empty date and a non-negative integral like count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRecord {
    /// Date as formatted by the source. Never parsed.
    pub date: String,
    pub likes: u64,
    /// Post link, [`DEFAULT_URL`] when the source had none.
    pub url: String,
}

impl RowRecord {
    /// Build a row, substituting [`DEFAULT_URL`] for an absent or empty URL.
    pub fn new(date: impl Into<String>, likes: u64, url: Option<String>) -> Self {
        let url = url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        Self {
            date: date.into(),
            likes,
            url,
        }
    }
}

/// A [`RowRecord`] with its capped contribution to the aggregate score.
///
/// Only [`crate::metrics::compute`] creates these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedRow {
    #[serde(flatten)]
    row: RowRecord,
    recognized: f64,
    is_capped: bool,
    lost: f64,
}

impl ProcessedRow {
    pub(crate) fn new(row: RowRecord, max_allowed: f64) -> Self {
        let likes = row.likes as f64;
        let is_capped = likes > max_allowed;
        let (recognized, lost) = if is_capped {
            (max_allowed, likes - max_allowed)
        } else {
            (likes, 0.0)
        };
        Self {
            row,
            recognized,
            is_capped,
            lost,
        }
    }

    pub fn date(&self) -> &str {
        &self.row.date
    }

    pub fn likes(&self) -> u64 {
        self.row.likes
    }

    pub fn url(&self) -> &str {
        &self.row.url
    }

    /// Likes counted toward the score: the raw count, or the cap when the
    /// post is an outlier.
    pub fn recognized(&self) -> f64 {
        self.recognized
    }

    /// True when `likes > max_allowed`.
    pub fn is_capped(&self) -> bool {
        self.is_capped
    }

    /// Likes discarded by the cap; zero for uncapped posts.
    pub fn lost(&self) -> f64 {
        self.lost
    }
}

/// Outlier-capped aggregate statistics for one source.
///
/// Immutable once computed. `Default` is the all-zero value returned for an
/// empty row sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub(crate) total_likes: u64,
    pub(crate) average: f64,
    pub(crate) std_dev: f64,
    pub(crate) max_allowed: f64,
    pub(crate) total_recognized: f64,
    pub(crate) posts: Vec<ProcessedRow>,
}

impl Metrics {
    pub fn total_likes(&self) -> u64 {
        self.total_likes
    }

    pub fn average(&self) -> f64 {
        self.average
    }

    /// Population standard deviation of the raw like counts.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// The cap: `average + std_dev`.
    pub fn max_allowed(&self) -> f64 {
        self.max_allowed
    }

    /// Sum of every post's recognized likes. This is the ranking score.
    pub fn total_recognized(&self) -> f64 {
        self.total_recognized
    }

    /// Posts in input order.
    pub fn posts(&self) -> &[ProcessedRow] {
        &self.posts
    }

    pub fn capped_count(&self) -> usize {
        self.posts.iter().filter(|p| p.is_capped()).count()
    }
}

/// Metrics for one named source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceMetrics {
    pub name: String,
    pub metrics: Metrics,
}

/// Per-run accumulation of source metrics, keyed by name, in arrival order.
///
/// Arrival order is kept because the ranker breaks score ties by it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    entries: Vec<SourceMetrics>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store metrics for `name`. Returns `false` (and stores nothing) when the
    /// name is already present.
    pub fn insert(&mut self, name: impl Into<String>, metrics: Metrics) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push(SourceMetrics { name, metrics });
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Metrics> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.metrics)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source names in arrival order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

impl IntoIterator for ResultSet {
    type Item = SourceMetrics;
    type IntoIter = std::vec::IntoIter<SourceMetrics>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// One position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub metrics: Metrics,
    /// True only for the first entry.
    pub is_winner: bool,
}

/// Sources ordered by `total_recognized`, highest first.
pub type RankedResult = Vec<RankedEntry>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
