//! Ranker: orders sources by total recognized likes.

use crate::types::{RankedEntry, RankedResult, ResultSet};

/// Rank sources by `total_recognized`, highest first.
///
/// The sort is stable, so sources with equal scores keep their arrival order
/// in `results`. Only the first entry is flagged as the winner.
pub fn rank(results: ResultSet) -> RankedResult {
    let mut entries: Vec<_> = results.into_iter().collect();
    entries.sort_by(|a, b| {
        b.metrics
            .total_recognized()
            .total_cmp(&a.metrics.total_recognized())
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankedEntry {
            name: entry.name,
            metrics: entry.metrics,
            is_winner: index == 0,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
