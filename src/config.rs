use serde::Deserialize;
use std::path::Path;

use crate::error::Error;

/// Feed registry, reloaded fresh at the start of every polling cycle so
/// edits take effect without a restart.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Seconds to sleep between polling cycles
    #[serde(default = "default_update_interval")]
    pub update_interval: u64,
    /// Maximum entries retained per feed; defaults to the unbounded sentinel
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    pub feeds: Vec<FeedConfig>,
}

fn default_update_interval() -> u64 {
    3600
}

fn default_max_entries() -> usize {
    usize::MAX
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    pub title: String,
    pub url: String,
}

impl FeedConfig {
    /// Output page name derived from the feed title.
    pub fn filename(&self) -> String {
        format!("{}.html", self.title.replace(' ', "_").to_lowercase())
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(&path).map_err(|source| Error::ConfigIo {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> Result<Self, Error> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
