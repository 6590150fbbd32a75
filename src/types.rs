use serde::{Deserialize, Serialize};

/// One extracted podcast episode. Produced fresh on every extraction; every
/// field is always present, with empty strings/lists/`None` standing in for
/// anything the source entry did not declare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub show_name: String,
    /// Entry guid, falling back to the podcast-namespace episode number.
    /// Empty only when the entry declares neither.
    pub id: String,
    pub episode_number: Option<String>,
    pub title: String,
    pub description: String,
    /// Raw date text as found in the feed, unparsed.
    pub published_date: String,
    pub link: String,
    pub duration: String,
    pub hosts: Vec<String>,
    pub enclosures: Vec<Enclosure>,
    pub transcripts: Vec<TranscriptRef>,
    /// Url of the first transcript, if any. Derived, not independently set.
    pub transcript_url: Option<String>,
    pub chapters_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: String,
    pub mime_type: String,
    pub length_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRef {
    pub url: String,
    pub mime_type: String,
    pub language: String,
}

/// Pagination metadata returned alongside a search window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

/// One page of search results plus pagination info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub episodes: Vec<EpisodeRecord>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "podcast-aggregator/0.1".to_string(),
            timeout_seconds: 30,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PodcastError {
    #[error("at least one search parameter must be provided")]
    InvalidQuery,

    #[error("unknown show: {show}")]
    ShowNotFound { show: String },

    #[error("episode '{episode}' not found in show '{show}'")]
    EpisodeNotFound { show: String, episode: String },

    #[error("transcript not available for episode '{episode}' in show '{show}'")]
    TranscriptNotAvailable { show: String, episode: String },

    #[error("request timed out fetching {url}")]
    Timeout { url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed XML: {0}")]
    MalformedXml(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PodcastError>;
