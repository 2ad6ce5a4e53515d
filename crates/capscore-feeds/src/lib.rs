//! capscore-feeds: source fetchers and the ingestion coordinator.
//!
//! A [`SourceFetcher`] turns a source name into raw rows (or an error). The
//! [`IngestionCoordinator`] runs one fetch per configured source, validates
//! and aggregates each result as it arrives, and ranks everything once the
//! last fetch has reported.

pub mod coordinator;
pub mod dir;
pub mod error;
pub mod raw;
pub mod sheets;

use std::future::Future;

pub use coordinator::{IngestionCoordinator, Phase, RunOutcome, RunState};
pub use dir::DirFetcher;
pub use error::{FetchError, IngestError, SourceFetchError};
pub use raw::{RawLikes, RawRow};
pub use sheets::SheetsFetcher;

/// Fetch boundary: one request per source name, rows or an error.
///
/// Implementations must not filter rows; validation happens in the
/// coordinator.
pub trait SourceFetcher: Send + Sync {
    fn fetch(
        &self,
        source: &str,
    ) -> impl Future<Output = Result<Vec<RawRow>, FetchError>> + Send;
}
