//! Configuration types for capscore.
//!
//! [`Config::load`] reads `~/.config/capscore/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] reads an
//! explicit file, and [`Config::defaults`] returns the same defaults without
//! touching the filesystem (useful in tests).

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[sources]
# Each name is one tab of the spreadsheet; names must match the tabs exactly.
names = ["Bogota.Atl", "Los_delaU", "Grupo_Niche_Poli"]

[sheet]
spreadsheet_id = "1KUaE83XvSL1OkmzN7wprIpIV3H-lLYtDujK51zGTVmM"
base_url       = "https://docs.google.com/spreadsheets/d"
query          = "SELECT A, B, C"

[format]
thousands_separator = "."
decimal_separator   = ","
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/capscore/config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub format: FormatConfig,
}

/// `[sources]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourcesConfig {
    /// Ordered source names. Their count is the number of fetches per load.
    #[serde(default = "default_source_names")]
    pub names: Vec<String>,
}

/// `[sheet]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SheetConfig {
    #[serde(default = "default_spreadsheet_id")]
    pub spreadsheet_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// gviz query language statement selecting date, likes and url columns.
    #[serde(default = "default_query")]
    pub query: String,
}

/// `[format]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FormatConfig {
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,
}

fn default_source_names() -> Vec<String> {
    ["Bogota.Atl", "Los_delaU", "Grupo_Niche_Poli"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_spreadsheet_id() -> String { "1KUaE83XvSL1OkmzN7wprIpIV3H-lLYtDujK51zGTVmM".to_string() }
fn default_base_url() -> String { "https://docs.google.com/spreadsheets/d".to_string() }
fn default_query() -> String { "SELECT A, B, C".to_string() }
fn default_thousands_separator() -> String { ".".to_string() }
fn default_decimal_separator() -> String { ",".to_string() }

impl Default for SourcesConfig {
    fn default() -> Self {
        Self { names: default_source_names() }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: default_spreadsheet_id(),
            base_url: default_base_url(),
            query: default_query(),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/capscore/config.toml`. Creates the file with
    /// defaults if it does not exist.
    ///
    /// The file is read on its own rather than layered over the embedded
    /// defaults: `names` is an array, and layering arrays merges them by index.
    /// Missing keys fall back to the serde defaults instead.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit config file. The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Replace the configured source names (e.g. from `--source` flags).
    pub fn with_sources(mut self, names: Vec<String>) -> Self {
        self.sources.names = names;
        self
    }

    /// Check invariants the rest of the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.names.is_empty() {
            return Err(ConfigError::NoSources);
        }
        let mut seen = HashSet::new();
        for (i, name) in self.sources.names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::BlankSource(i));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateSource(name.clone()));
            }
        }

        let fmt = &self.format;
        if fmt.thousands_separator.is_empty()
            || fmt.decimal_separator.is_empty()
            || fmt.thousands_separator == fmt.decimal_separator
        {
            return Err(ConfigError::Separators {
                thousands: fmt.thousands_separator.clone(),
                decimal: fmt.decimal_separator.clone(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Location of the user config file.
pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("capscore")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
