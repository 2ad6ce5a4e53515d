//! Directory fetcher: reads `{dir}/{name}.json` for each source.
//!
//! Each file holds a JSON array of raw rows:
//!
//! ```json
//! [{"date": "15/1/2024", "likes": 120, "url": "https://..."}]
//! ```

use crate::error::FetchError;
use crate::raw::RawRow;
use crate::SourceFetcher;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `source`.
    pub fn path_for(&self, source: &str) -> PathBuf {
        self.root.join(format!("{source}.json"))
    }
}

impl SourceFetcher for DirFetcher {
    async fn fetch(&self, source: &str) -> Result<Vec<RawRow>, FetchError> {
        let path = self.path_for(source);
        tracing::debug!(source, path = %path.display(), "reading source file");
        let bytes = tokio::fs::read(&path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
