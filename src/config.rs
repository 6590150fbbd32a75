use crate::types::{PodcastError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One configured show: display name plus feed locator.
/// `url` accepts `http(s)://` remotes and `file://` local paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowSource {
    pub name: String,
    pub url: String,
}

/// Ordered show-name -> feed-URI mapping, read once at startup.
/// Order is load-bearing: all-shows searches emit results in this order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowConfig {
    shows: Vec<ShowSource>,
}

impl ShowConfig {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let shows = pairs
            .into_iter()
            .map(|(name, url)| ShowSource {
                name: name.into(),
                url: url.into(),
            })
            .collect();
        Self { shows }
    }

    /// Loads a JSON array of `{ "name": ..., "url": ... }` objects.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: ShowConfig = serde_json::from_str(&content)
            .map_err(|e| PodcastError::Config(format!("{}: {}", path.display(), e)))?;
        info!("Loaded {} shows from {}", config.shows.len(), path.display());
        Ok(config)
    }

    pub fn show_names(&self) -> Vec<String> {
        self.shows.iter().map(|s| s.name.clone()).collect()
    }

    pub fn url_for(&self, show_name: &str) -> Option<&str> {
        self.shows
            .iter()
            .find(|s| s.name == show_name)
            .map(|s| s.url.as_str())
    }

    pub fn contains(&self, show_name: &str) -> bool {
        self.shows.iter().any(|s| s.name == show_name)
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }
}
