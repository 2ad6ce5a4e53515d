//! Metrics engine: outlier-capped aggregation of one source's rows.
//!
//! The cap is `mean + population standard deviation` of the raw like counts.
//! Any post strictly above the cap contributes the cap instead of its own
//! count; the difference is reported as `lost`.

use crate::types::{Metrics, ProcessedRow, RowRecord};

/// Compute [`Metrics`] for one source.
///
/// Pure and total. Posts keep the input order. An empty input yields
/// [`Metrics::default`] (all zeros, no posts).
pub fn compute(rows: Vec<RowRecord>) -> Metrics {
    if rows.is_empty() {
        return Metrics::default();
    }

    let n = rows.len() as f64;
    let total_likes = rows
        .iter()
        .fold(0u64, |acc, row| acc.saturating_add(row.likes));
    let average = total_likes as f64 / n;

    // Population variance: divisor n.
    let variance = rows
        .iter()
        .map(|row| {
            let delta = row.likes as f64 - average;
            delta * delta
        })
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();
    let max_allowed = average + std_dev;

    // totalRecognized is the running sum of the same values stored on the posts.
    let mut total_recognized = 0.0;
    let posts: Vec<ProcessedRow> = rows
        .into_iter()
        .map(|row| {
            let post = ProcessedRow::new(row, max_allowed);
            total_recognized += post.recognized();
            post
        })
        .collect();

    Metrics {
        total_likes,
        average,
        std_dev,
        max_allowed,
        total_recognized,
        posts,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
