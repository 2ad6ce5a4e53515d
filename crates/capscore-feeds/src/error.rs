//! Fetch and ingestion errors.

use thiserror::Error;

/// Why a single source could not be read.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("source rejected the query: {0}")]
    Query(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fetch task aborted: {0}")]
    Aborted(String),
}

/// One source's fetch failed. Recovered locally: the source is left out of
/// the ranking and the other fetches carry on.
#[derive(Debug, Error)]
#[error("could not read source {name:?}: {error}")]
pub struct SourceFetchError {
    pub name: String,
    #[source]
    pub error: FetchError,
}

/// Run-level failure surfaced to the caller.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Every configured source failed or produced no valid rows.
    #[error("no data found for any configured source (expected: {})", .expected.join(", "))]
    EmptyResult { expected: Vec<String> },
}
