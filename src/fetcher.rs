use crate::traits::FeedTransport;
use crate::types::{FetchConfig, PodcastError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Default `FeedTransport`: reqwest for `http(s)://`, tokio fs for
/// `file://`. Every read is bounded by `FetchConfig::timeout_seconds`.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Self {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    async fn fetch_http(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                PodcastError::Timeout { url: url.to_string() }
            } else {
                PodcastError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PodcastError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        info!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }

    async fn fetch_file(&self, url: &str) -> Result<String> {
        let path = url.trim_start_matches("file://");
        debug!("Reading local feed file: {}", path);

        let timeout = Duration::from_secs(self.config.timeout_seconds);
        match tokio::time::timeout(timeout, tokio::fs::read_to_string(path)).await {
            Ok(read) => Ok(read?),
            Err(_) => Err(PodcastError::Timeout { url: url.to_string() }),
        }
    }
}

#[async_trait]
impl FeedTransport for Fetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        if url.starts_with("file://") {
            self.fetch_file(url).await
        } else {
            self.fetch_http(url).await
        }
    }
}
