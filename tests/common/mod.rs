#![allow(dead_code)]

use async_trait::async_trait;
use podcast_aggregator::{FeedTransport, PodcastError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A Podcast 2.0 feed exercising the full element surface: guids, episode
/// numbers, hosts vs guests, enclosures, transcripts, chapters, CDATA.
pub const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd" xmlns:podcast="https://podcastindex.org/namespace/1.0">
  <channel>
    <title>Linux After Dark</title>
    <description>A late-night Linux show</description>
    <item>
      <title>Texas Flood</title>
      <guid>ep-101</guid>
      <link>https://example.com/101</link>
      <pubDate>Sun, 05 Oct 2025 19:25:37 -0700</pubDate>
      <description><![CDATA[<p>Storms roll through   Texas</p>]]></description>
      <itunes:duration>1:02:03</itunes:duration>
      <podcast:episode>101</podcast:episode>
      <podcast:person role="host">Wes</podcast:person>
      <podcast:person role="guest">Carl</podcast:person>
      <enclosure url="https://example.com/101.mp3" type="audio/mpeg" length="123456"/>
      <podcast:transcript url="https://example.com/101.txt" type="text/plain" language="en"/>
      <podcast:chapters url="https://example.com/101.json" type="application/json+chapters"/>
    </item>
    <item>
      <title>Quiet Week</title>
      <guid>ep-102</guid>
      <pubDate>Mon, 06 Oct 2025 10:00:00 +0000</pubDate>
      <description>Nothing much happened</description>
      <podcast:person role="host">wes</podcast:person>
    </item>
  </channel>
</rss>
"#;

/// Builds a minimal feed with `count` items titled "Episode 1".."Episode N",
/// each carrying a guid and a parseable date.
pub fn feed_with_items(count: usize) -> String {
    let mut items = String::new();
    for n in 1..=count {
        items.push_str(&format!(
            "<item><title>Episode {n}</title><guid>ep-{n}</guid>\
             <pubDate>Sun, 05 Oct 2025 19:25:37 -0700</pubDate>\
             <description>episode body</description></item>"
        ));
    }
    format!(
        r#"<?xml version="1.0"?><rss version="2.0" xmlns:podcast="https://podcastindex.org/namespace/1.0"><channel><title>Generated</title>{items}</channel></rss>"#
    )
}

/// In-memory `FeedTransport` double with per-call counting and scriptable
/// one-shot failures, so tests can verify cache behavior without a network.
#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<HashMap<String, String>>,
    failures_remaining: Mutex<HashMap<String, usize>>,
    fetch_count: AtomicUsize,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, url: &str, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), body.to_string());
        self
    }

    /// The next `count` fetches of `url` fail with an HTTP 500 before any
    /// configured response is served.
    pub fn failing(self, url: &str, count: usize) -> Self {
        self.failures_remaining
            .lock()
            .unwrap()
            .insert(url.to_string(), count);
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedTransport for StubTransport {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        {
            let mut failures = self.failures_remaining.lock().unwrap();
            if let Some(remaining) = failures.get_mut(url) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(PodcastError::HttpStatus {
                        url: url.to_string(),
                        status: 500,
                    });
                }
            }
        }

        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or(PodcastError::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}
