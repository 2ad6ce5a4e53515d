//! capscore-core: data model, metrics engine and ranking for capscore.
//!
//! This crate holds everything that is pure: the validated row model, the
//! outlier-capped [`metrics::compute`], the stable [`rank::rank`], number
//! formatting, and configuration.
//!
//! # Pipeline
//!
//! ```text
//! fetch (capscore-feeds) ──► metrics::compute ──► ResultSet ──► rank::rank ──► Dashboard
//! ```
//!
//! Nothing here suspends or performs network I/O; the feeds crate owns the
//! asynchronous side.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod metrics;
pub mod rank;
pub mod types;

pub use dashboard::Dashboard;
pub use error::ConfigError;
pub use types::{
    Metrics, ProcessedRow, RankedEntry, RankedResult, ResultSet, RowRecord, SourceMetrics,
    DEFAULT_URL,
};
