//! Fetcher selection and one dashboard load.

use capscore_core::{config::Config, Dashboard};
use capscore_feeds::{
    DirFetcher, FetchError, IngestionCoordinator, RawRow, SheetsFetcher, SourceFetcher,
};
use std::path::PathBuf;

/// The fetchers the binary can run with.
#[derive(Debug, Clone)]
pub enum AnyFetcher {
    Sheets(SheetsFetcher),
    Dir(DirFetcher),
}

impl AnyFetcher {
    /// Directory fetcher when `data_dir` is given, otherwise the Sheets fetcher
    /// for the configured spreadsheet.
    pub fn from_config(config: &Config, data_dir: Option<PathBuf>) -> Result<Self, FetchError> {
        match data_dir {
            Some(dir) => Ok(Self::Dir(DirFetcher::new(dir))),
            None => Ok(Self::Sheets(SheetsFetcher::new(&config.sheet)?)),
        }
    }
}

impl SourceFetcher for AnyFetcher {
    async fn fetch(&self, source: &str) -> Result<Vec<RawRow>, FetchError> {
        match self {
            Self::Sheets(f) => f.fetch(source).await,
            Self::Dir(f) => f.fetch(source).await,
        }
    }
}

/// Validate `config`, fetch every configured source once, and rank them.
///
/// An empty result comes back as an [`capscore_feeds::IngestError`] inside the
/// `anyhow::Error` so callers can downcast and show the empty-result screen.
pub async fn load_dashboard(config: &Config, data_dir: Option<PathBuf>) -> anyhow::Result<Dashboard> {
    config.validate()?;
    let fetcher = AnyFetcher::from_config(config, data_dir)?;
    let coordinator = IngestionCoordinator::new(fetcher, config.sources.names.clone());
    Ok(coordinator.run().await?)
}
