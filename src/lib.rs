pub mod aggregator;
pub mod cache;
pub mod config;
pub mod dates;
pub mod extractor;
pub mod fetcher;
pub mod parser;
pub mod query;
pub mod traits;
pub mod types;

pub use aggregator::PodcastAggregator;
pub use cache::FeedCache;
pub use config::{ShowConfig, ShowSource};
pub use fetcher::Fetcher;
pub use parser::{FeedDocument, FeedParser};
pub use query::{PageRequest, SearchParams};
pub use traits::FeedTransport;
pub use types::*;
