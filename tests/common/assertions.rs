//! Domain-specific assertion macros for capscore harnesses.
//!
//! These wrap `pretty_assertions` and add context to failure messages so it
//! is clear which ranking or capping property was violated.

/// Assert two floats are within `1e-2` (or an explicit tolerance).
///
/// ```rust
/// assert_close!(metrics.max_allowed(), 75.59);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr) => {
        $crate::assert_close!($actual, $expected, 1e-2)
    };
    ($actual:expr, $expected:expr, $tol:expr) => {{
        let actual: f64 = $actual;
        let expected: f64 = $expected;
        if (actual - expected).abs() > $tol {
            panic!(
                "assert_close! failed: {}\n  expected: {}\n  actual:   {}\n  tolerance: {}",
                stringify!($actual),
                expected,
                actual,
                $tol
            );
        }
    }};
}

/// Assert the ranked names of a `Dashboard` (or any `&[RankedEntry]`).
///
/// ```rust
/// assert_ranking!(dash.ranked(), ["b", "a"]);
/// ```
#[macro_export]
macro_rules! assert_ranking {
    ($ranked:expr, [$($name:expr),* $(,)?]) => {{
        let ranked: &[capscore_core::RankedEntry] = $ranked;
        let actual: Vec<&str> = ranked.iter().map(|e| e.name.as_str()).collect();
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(actual, expected, "ranking order");
    }};
}

/// Assert exactly the first entry is flagged as the winner.
#[macro_export]
macro_rules! assert_single_winner {
    ($ranked:expr) => {{
        let ranked: &[capscore_core::RankedEntry] = $ranked;
        for (i, entry) in ranked.iter().enumerate() {
            if entry.is_winner != (i == 0) {
                panic!(
                    "assert_single_winner! failed at position {}: {:?} has is_winner = {}",
                    i, entry.name, entry.is_winner
                );
            }
        }
    }};
}
