use crate::config::ShowConfig;
use crate::parser::{FeedDocument, FeedParser};
use crate::traits::FeedTransport;
use crate::types::{PodcastError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Process-lifetime feed memoization. Each configured show is fetched and
/// parsed at most once per successful lookup; failures cache nothing, so the
/// next lookup retries from scratch. There is no invalidation: staleness is
/// accepted in exchange for not re-fetching within one process run.
pub struct FeedCache {
    config: ShowConfig,
    transport: Arc<dyn FeedTransport>,
    documents: RwLock<HashMap<String, Arc<FeedDocument>>>,
}

impl FeedCache {
    pub fn new(config: ShowConfig, transport: Arc<dyn FeedTransport>) -> Self {
        Self {
            config,
            transport,
            documents: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ShowConfig {
        &self.config
    }

    /// Returns the parsed document for a configured show, fetching it on
    /// first access. Unknown shows are a distinct error from fetch failure.
    pub async fn get(&self, show_name: &str) -> Result<Arc<FeedDocument>> {
        let url = self
            .config
            .url_for(show_name)
            .ok_or_else(|| PodcastError::ShowNotFound {
                show: show_name.to_string(),
            })?
            .to_string();

        if let Some(document) = self.documents.read().await.get(show_name) {
            debug!("Cache hit for show '{}'", show_name);
            return Ok(document.clone());
        }

        // Fetch and parse outside the lock; concurrent lookups may duplicate
        // the fetch, but only a fully parsed document is ever published, and
        // the first one in stays.
        let content = self.transport.fetch_text(&url).await?;
        let document = Arc::new(FeedParser::parse(&content)?);
        info!(
            "Cached feed for show '{}' ({} entries)",
            show_name,
            document.entries.len()
        );

        let mut documents = self.documents.write().await;
        let entry = documents
            .entry(show_name.to_string())
            .or_insert(document)
            .clone();
        Ok(entry)
    }

    /// Parses supplied raw feed content and publishes it for `show_name`,
    /// bypassing the transport. Intended for tests and offline use; the show
    /// must still be configured.
    pub async fn prime(&self, show_name: &str, content: &str) -> Result<()> {
        if !self.config.contains(show_name) {
            return Err(PodcastError::ShowNotFound {
                show: show_name.to_string(),
            });
        }
        let document = Arc::new(FeedParser::parse(content)?);
        self.documents
            .write()
            .await
            .insert(show_name.to_string(), document);
        Ok(())
    }
}
