//! Errors raised while validating configuration.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no sources configured; set [sources] names or pass --source")]
    NoSources,
    #[error("source name at position {0} is blank")]
    BlankSource(usize),
    #[error("source {0:?} is configured more than once")]
    DuplicateSource(String),
    #[error("thousands and decimal separators must be non-empty and different (got {thousands:?} / {decimal:?})")]
    Separators { thousands: String, decimal: String },
}
