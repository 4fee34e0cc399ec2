//! Search configuration parsing
//!
//! Loads index location and ranking policy from YAML. Every field has a
//! default, so an empty document is a valid in-RAM configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "LCA_SEARCH_CONFIG";

/// Default configuration path
pub const DEFAULT_CONFIG_PATH: &str = "config/search.yaml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub search: SearchOptions,
}

/// Where the index lives and how it is written
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    /// Index directory; `None` keeps the index in RAM
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Memory budget for the index writer
    #[serde(default = "default_writer_heap")]
    pub writer_heap_bytes: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: None,
            writer_heap_bytes: default_writer_heap(),
        }
    }
}

impl IndexConfig {
    pub fn in_ram() -> Self {
        Self::default()
    }

    pub fn in_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }
}

fn default_writer_heap() -> usize {
    50_000_000
}

/// Query-time behaviour of a search session
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchOptions {
    /// Result limit used by `SearchRequest::new`
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Abort collection after this many milliseconds
    #[serde(default)]
    pub max_duration_ms: Option<u64>,
    #[serde(default)]
    pub boosts: FieldBoosts,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_duration_ms: None,
            boosts: FieldBoosts::default(),
        }
    }
}

impl SearchOptions {
    pub fn max_duration(&self) -> Option<Duration> {
        self.max_duration_ms.map(Duration::from_millis)
    }
}

fn default_limit() -> usize {
    25
}

/// Relevance boost per searchable field
///
/// Name matches dominate ranking; comment text is unboosted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FieldBoosts {
    #[serde(default = "boost_name")]
    pub name: f32,
    #[serde(default = "boost_one")]
    pub comment: f32,
    #[serde(default = "boost_two")]
    pub product: f32,
    #[serde(default = "boost_two")]
    pub categories: f32,
    #[serde(default = "boost_two")]
    pub location: f32,
}

impl Default for FieldBoosts {
    fn default() -> Self {
        Self {
            name: boost_name(),
            comment: boost_one(),
            product: boost_two(),
            categories: boost_two(),
            location: boost_two(),
        }
    }
}

fn boost_name() -> f32 {
    5.0
}

fn boost_one() -> f32 {
    1.0
}

fn boost_two() -> f32 {
    2.0
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SearchConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as unit, not an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load from `$LCA_SEARCH_CONFIG`, falling back to the default path
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        tracing::info!(path = %path, "Loading search configuration");
        Self::from_file(path)
    }
}
