//! Dashboard: what one load hands to the presenter.

use crate::types::{Metrics, RankedEntry, RankedResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The ranked result of one dashboard load plus per-source detail lookup.
///
/// A new `Dashboard` is built for every load; nothing in it is updated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    ranked: RankedResult,
    loaded_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn new(ranked: RankedResult) -> Self {
        Self::with_timestamp(ranked, Utc::now())
    }

    pub fn with_timestamp(ranked: RankedResult, loaded_at: DateTime<Utc>) -> Self {
        Self { ranked, loaded_at }
    }

    /// Entries in rank order, winner first.
    pub fn ranked(&self) -> &[RankedEntry] {
        &self.ranked
    }

    pub fn winner(&self) -> Option<&RankedEntry> {
        self.ranked.first()
    }

    /// Full metrics (including posts) for one source, for the detail view.
    pub fn metrics(&self, name: &str) -> Option<&Metrics> {
        self.ranked
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.metrics)
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}
