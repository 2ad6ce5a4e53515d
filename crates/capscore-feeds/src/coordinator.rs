//! Ingestion coordinator: one fetch per configured source, finalize once.
//!
//! # Run lifecycle
//!
//! ```text
//! Idle ──dispatch(n)──► Dispatched { pending: n } ──complete × n──► Finalized
//! ```
//!
//! Every call to [`IngestionCoordinator::run`] allocates a fresh [`RunState`].
//! Fetches run as tokio tasks in a [`JoinSet`]; the run loop is the single
//! consumer of their results and applies each one with
//! [`RunState::complete`], which records the outcome, decrements `pending`
//! and checks for zero in one `&mut` step. The accumulated results are moved
//! out on the completion that reaches zero, so finalization happens exactly
//! once whatever the completion order.
//!
//! There is no timeout: a fetch that never completes leaves the run in
//! `Dispatched`.

use crate::error::{FetchError, IngestError, SourceFetchError};
use crate::raw::{validate_rows, RawRow};
use crate::SourceFetcher;
use capscore_core::{metrics, rank::rank, Dashboard, ResultSet};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

// ---------------------------------------------------------------------------
// RunState
// ---------------------------------------------------------------------------

/// Where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Waiting on `pending` (≥ 1) completions.
    Dispatched { pending: usize },
    Finalized,
}

/// Everything one run produced, handed over exactly once.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Sources with at least one valid row, in arrival order.
    pub results: ResultSet,
    /// Sources whose fetch failed.
    pub failures: Vec<SourceFetchError>,
}

impl RunOutcome {
    /// Rank the results, or report [`IngestError::EmptyResult`] when there
    /// is nothing to rank.
    pub fn finalize(self, expected: &[String]) -> Result<Dashboard, IngestError> {
        if self.results.is_empty() {
            tracing::warn!(
                expected = ?expected,
                failed = self.failures.len(),
                "no source produced any valid rows"
            );
            return Err(IngestError::EmptyResult {
                expected: expected.to_vec(),
            });
        }

        tracing::info!(
            sources = self.results.len(),
            failed = self.failures.len(),
            "dashboard ready"
        );
        Ok(Dashboard::new(rank(self.results)))
    }
}

/// Per-run completion counter and result accumulator.
#[derive(Debug, Default)]
pub struct RunState {
    phase: Phase,
    results: ResultSet,
    failures: Vec<SourceFetchError>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Start waiting on `n` completions. With `n == 0` the run finalizes
    /// immediately and the (empty) outcome is returned.
    pub fn dispatch(&mut self, n: usize) -> Option<RunOutcome> {
        if self.phase != Phase::Idle {
            tracing::warn!(phase = ?self.phase, "dispatch on a run that already started ignored");
            return None;
        }
        if n == 0 {
            self.phase = Phase::Finalized;
            return Some(self.take_outcome());
        }
        self.phase = Phase::Dispatched { pending: n };
        None
    }

    /// Apply one source's completion. Returns the outcome on the completion
    /// that brings `pending` to zero, and `None` otherwise.
    pub fn complete(
        &mut self,
        name: &str,
        outcome: Result<Vec<RawRow>, FetchError>,
    ) -> Option<RunOutcome> {
        let Phase::Dispatched { pending } = self.phase else {
            tracing::warn!(source = name, phase = ?self.phase, "completion outside a dispatched run ignored");
            return None;
        };

        self.record(name, outcome);

        let pending = pending.saturating_sub(1);
        tracing::debug!(source = name, pending, "source reported");
        if pending == 0 {
            self.phase = Phase::Finalized;
            Some(self.take_outcome())
        } else {
            self.phase = Phase::Dispatched { pending };
            None
        }
    }

    /// Finalize with whatever has arrived so far.
    fn abandon(&mut self) -> RunOutcome {
        self.phase = Phase::Finalized;
        self.take_outcome()
    }

    fn record(&mut self, name: &str, outcome: Result<Vec<RawRow>, FetchError>) {
        match outcome {
            Ok(raw) => {
                let fetched = raw.len();
                let rows = validate_rows(raw);
                if rows.is_empty() {
                    tracing::info!(source = name, fetched, "source has no valid rows; leaving it out");
                    return;
                }
                let valid = rows.len();
                if self.results.insert(name, metrics::compute(rows)) {
                    tracing::debug!(source = name, fetched, valid, "source ingested");
                } else {
                    tracing::warn!(source = name, "second completion for source ignored");
                }
            }
            Err(error) => {
                tracing::warn!(source = name, %error, "could not read source; skipping it");
                self.failures.push(SourceFetchError {
                    name: name.to_string(),
                    error,
                });
            }
        }
    }

    fn take_outcome(&mut self) -> RunOutcome {
        RunOutcome {
            results: std::mem::take(&mut self.results),
            failures: std::mem::take(&mut self.failures),
        }
    }
}

// ---------------------------------------------------------------------------
// IngestionCoordinator
// ---------------------------------------------------------------------------

/// Fetches every configured source concurrently and builds the dashboard.
pub struct IngestionCoordinator<F> {
    fetcher: Arc<F>,
    sources: Vec<String>,
}

impl<F> IngestionCoordinator<F>
where
    F: SourceFetcher + 'static,
{
    pub fn new(fetcher: F, sources: Vec<String>) -> Self {
        Self::from_shared(Arc::new(fetcher), sources)
    }

    pub fn from_shared(fetcher: Arc<F>, sources: Vec<String>) -> Self {
        Self { fetcher, sources }
    }

    /// Configured source names, in dispatch order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// One dashboard load: fetch everything, then rank.
    pub async fn run(&self) -> Result<Dashboard, IngestError> {
        self.collect().await.finalize(&self.sources)
    }

    /// Fetch every source once and wait until all have reported.
    pub async fn collect(&self) -> RunOutcome {
        let mut state = RunState::new();
        if let Some(outcome) = state.dispatch(self.sources.len()) {
            return outcome;
        }

        let mut tasks = JoinSet::new();
        let mut names = HashMap::with_capacity(self.sources.len());
        for name in &self.sources {
            let fetcher = Arc::clone(&self.fetcher);
            let source = name.clone();
            let handle = tasks.spawn(async move { fetcher.fetch(&source).await });
            names.insert(handle.id(), name.clone());
        }
        tracing::debug!(sources = self.sources.len(), "fetches dispatched");

        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, outcome) = match joined {
                Ok((id, outcome)) => (id, outcome),
                Err(err) => (err.id(), Err(FetchError::Aborted(err.to_string()))),
            };
            let Some(name) = names.remove(&id) else {
                tracing::error!(task = %id, "completion from an unknown fetch task");
                continue;
            };
            if let Some(outcome) = state.complete(&name, outcome) {
                return outcome;
            }
        }

        // Each spawned task yields exactly one join result, so this is only
        // reached if a task id went missing above.
        tracing::error!(phase = ?state.phase(), "fetch tasks drained before every source reported");
        state.abandon()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
