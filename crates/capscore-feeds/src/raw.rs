//! Raw rows as returned by a fetcher, and the typed validation step that
//! turns them into [`RowRecord`]s.
//!
//! Validation never coerces: a like count is either a finite, non-negative
//! number (or text that parses to one) or the row is dropped. Fractional
//! counts are kept and rounded to the nearest whole like.

use capscore_core::RowRecord;
use serde::{Deserialize, Serialize};

/// Largest like count accepted; above this `f64` stops representing every integer.
pub const MAX_LIKES: f64 = 9_007_199_254_740_992.0; // 2^53

/// A like count as it arrived from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLikes {
    Number(f64),
    Text(String),
}

/// One unvalidated row: `date`, `likes` and `url` columns, any of which may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub likes: Option<RawLikes>,
    #[serde(default)]
    pub url: Option<String>,
}

impl RawRow {
    /// Validate into a [`RowRecord`], or `None` when the row must be dropped.
    ///
    /// A row is valid iff the date is present and non-empty, and the likes
    /// parse to a non-negative number.
    pub fn validate(self) -> Option<RowRecord> {
        let date = self.date.filter(|d| !d.is_empty())?;
        let likes = parse_likes(self.likes.as_ref()?)?;
        Some(RowRecord::new(date, likes, self.url))
    }
}

fn parse_likes(raw: &RawLikes) -> Option<u64> {
    let value = match raw {
        RawLikes::Number(n) => *n,
        RawLikes::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let rounded = value.round();
    if rounded > MAX_LIKES {
        return None;
    }
    Some(rounded as u64)
}

/// Validate every row, keeping input order and dropping invalid ones.
pub fn validate_rows(rows: Vec<RawRow>) -> Vec<RowRecord> {
    rows.into_iter().filter_map(RawRow::validate).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
