//! Shared test utilities for capscore integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Scripted fetchers are deterministic under
//! `tokio::time::pause()`.

pub mod assertions;
pub mod builders;
pub mod fake_fetcher;
pub mod fake_sheets_api;
pub mod fixtures;

pub use builders::*;
pub use fake_fetcher::*;
pub use fixtures::*;
