use crate::types::Result;
use async_trait::async_trait;

/// Transport seam for everything the aggregator reads from the outside
/// world: feed XML and transcript bodies. Implementations must bound their
/// own read time; callers assume a call either returns or fails, never hangs.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    /// Fetches the resource at `url` as text. Supported schemes are decided
    /// by the implementation; the default transport handles `http(s)://`
    /// and `file://`.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}
