//! Scripted in-process fetcher.
//!
//! Each source gets a delay and an outcome. Under `tokio::time::pause()` the
//! delays fix the completion order exactly, so a harness can drive the
//! coordinator through any interleaving it wants.

use capscore_feeds::{FetchError, RawRow, SourceFetcher};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Outcome {
    Rows(Vec<RawRow>),
    /// Fails with `FetchError::Query(message)`.
    Fail(String),
    /// The fetch task panics.
    Panic,
}

#[derive(Debug)]
struct Script {
    delay: Duration,
    outcome: Outcome,
    calls: AtomicUsize,
}

/// A [`SourceFetcher`] whose answers are fixed up front.
///
/// Sources without a script fail with HTTP 404.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    scripts: HashMap<String, Script>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, name: &str, delay_ms: u64, outcome: Outcome) -> Self {
        self.scripts.insert(
            name.to_string(),
            Script {
                delay: Duration::from_millis(delay_ms),
                outcome,
                calls: AtomicUsize::new(0),
            },
        );
        self
    }

    /// How many times `name` was fetched.
    pub fn calls(&self, name: &str) -> usize {
        self.scripts
            .get(name)
            .map_or(0, |s| s.calls.load(Ordering::SeqCst))
    }

    pub fn total_calls(&self) -> usize {
        self.scripts
            .values()
            .map(|s| s.calls.load(Ordering::SeqCst))
            .sum()
    }
}

impl SourceFetcher for ScriptedFetcher {
    async fn fetch(&self, source: &str) -> Result<Vec<RawRow>, FetchError> {
        let Some(script) = self.scripts.get(source) else {
            return Err(FetchError::Status(404));
        };
        script.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(script.delay).await;
        match &script.outcome {
            Outcome::Rows(rows) => Ok(rows.clone()),
            Outcome::Fail(message) => Err(FetchError::Query(message.clone())),
            Outcome::Panic => panic!("scripted panic for {source}"),
        }
    }
}
