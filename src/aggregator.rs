use crate::cache::FeedCache;
use crate::config::ShowConfig;
use crate::extractor::{extract_episode, extract_episodes};
use crate::fetcher::Fetcher;
use crate::query::{paginate, CompiledQuery, PageRequest, SearchParams};
use crate::traits::FeedTransport;
use crate::types::{EpisodeRecord, FetchConfig, PodcastError, Result, SearchPage};
use std::sync::Arc;
use tracing::{info, warn};

/// Facade over the configured shows: feed cache, extraction, querying, and
/// episode/transcript lookup.
pub struct PodcastAggregator {
    cache: FeedCache,
    transport: Arc<dyn FeedTransport>,
}

impl PodcastAggregator {
    pub fn new(config: ShowConfig, fetch_config: FetchConfig) -> Self {
        let transport: Arc<dyn FeedTransport> = Arc::new(Fetcher::new(fetch_config));
        Self::with_transport(config, transport)
    }

    /// Builds the aggregator over a caller-supplied transport. Tests use
    /// this to substitute a stub for the network.
    pub fn with_transport(config: ShowConfig, transport: Arc<dyn FeedTransport>) -> Self {
        let cache = FeedCache::new(config, transport.clone());
        Self { cache, transport }
    }

    /// Show names in configured order.
    pub fn list_shows(&self) -> Vec<String> {
        self.cache.config().show_names()
    }

    /// Direct access to the feed cache, mainly so callers can prime it with
    /// raw feed content.
    pub fn cache(&self) -> &FeedCache {
        &self.cache
    }

    /// Searches episodes across one show or all configured shows. Results
    /// keep source document order within a show; shows are concatenated in
    /// configured order. In an all-shows search a failing show is logged and
    /// contributes nothing; a search scoped to one show propagates its error.
    pub async fn search_episodes(
        &self,
        params: &SearchParams,
        page: PageRequest,
    ) -> Result<SearchPage> {
        let query = CompiledQuery::compile(params)?;

        let (shows, single_show) = match &params.show_name {
            Some(name) => (vec![name.clone()], true),
            None => (self.list_shows(), false),
        };

        let mut results = Vec::new();
        for show in &shows {
            match self.cache.get(show).await {
                Ok(document) => {
                    results.extend(
                        extract_episodes(show, &document)
                            .into_iter()
                            .filter(|record| query.matches(record)),
                    );
                }
                Err(e) if single_show => return Err(e),
                Err(e) => {
                    warn!("Skipping show '{}' in search: {}", show, e);
                }
            }
        }

        info!(
            "Search matched {} episodes across {} show(s)",
            results.len(),
            shows.len()
        );
        Ok(paginate(results, page.page, page.per_page))
    }

    /// Looks an episode up by its guid or its podcast-namespace episode
    /// number. The guid scan runs first over the whole show, so a guid match
    /// always wins over a number-only match regardless of document position.
    pub async fn get_episode(&self, show_name: &str, episode_number: &str) -> Result<EpisodeRecord> {
        let document = self.cache.get(show_name).await?;

        let by_guid = document
            .entries
            .iter()
            .position(|entry| !entry.guid.is_empty() && entry.guid == episode_number);
        let position = by_guid.or_else(|| {
            document.entries.iter().position(|entry| {
                !entry.episode_number.is_empty() && entry.episode_number == episode_number
            })
        });

        position
            .and_then(|index| document.entries.get(index))
            .map(|entry| extract_episode(show_name, entry))
            .ok_or_else(|| PodcastError::EpisodeNotFound {
                show: show_name.to_string(),
                episode: episode_number.to_string(),
            })
    }

    /// Resolves an episode and fetches its primary transcript as raw text.
    pub async fn get_transcript(&self, show_name: &str, episode_number: &str) -> Result<String> {
        let episode = self.get_episode(show_name, episode_number).await?;

        let url = episode
            .transcript_url
            .ok_or_else(|| PodcastError::TranscriptNotAvailable {
                show: show_name.to_string(),
                episode: episode_number.to_string(),
            })?;

        self.transport.fetch_text(&url).await
    }
}
