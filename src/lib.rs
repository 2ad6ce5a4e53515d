//! capscore: rank social-media accounts by outlier-capped likes.
//!
//! The library side of the binary: the three workspace crates re-exported,
//! plus fetcher selection and the load step that wires them together.
//!
//! ```text
//! SourceFetcher ──► IngestionCoordinator ──► metrics ──► rank ──► Dashboard ──► TUI / report
//! ```

pub mod load;

pub use capscore_core;
pub use capscore_feeds;
pub use capscore_tui;

pub use load::{load_dashboard, AnyFetcher};
