mod common;

use common::{feed_with_items, StubTransport, SAMPLE_FEED};
use podcast_aggregator::{PageRequest, PodcastAggregator, PodcastError, SearchParams, ShowConfig};
use std::sync::Arc;

const WIDE: PageRequest = PageRequest {
    page: 1,
    per_page: 100,
};

async fn primed_aggregator() -> PodcastAggregator {
    let _ = tracing_subscriber::fmt().try_init();

    let config = ShowConfig::from_pairs(vec![("Linux After Dark", "stub://lad")]);
    let aggregator =
        PodcastAggregator::with_transport(config, Arc::new(StubTransport::new()));
    aggregator
        .cache()
        .prime("Linux After Dark", SAMPLE_FEED)
        .await
        .unwrap();
    aggregator
}

#[tokio::test]
async fn search_without_any_criterion_is_rejected() {
    let aggregator = primed_aggregator().await;

    let result = aggregator
        .search_episodes(&SearchParams::default(), WIDE)
        .await;

    assert!(matches!(result, Err(PodcastError::InvalidQuery)));
}

#[tokio::test]
async fn results_keep_source_document_order() {
    let aggregator = primed_aggregator().await;

    let params = SearchParams {
        show_name: Some("Linux After Dark".to_string()),
        ..Default::default()
    };
    let page = aggregator.search_episodes(&params, WIDE).await.unwrap();

    let titles: Vec<&str> = page.episodes.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Texas Flood", "Quiet Week"]);
}

#[tokio::test]
async fn host_filter_is_case_insensitive() {
    let aggregator = primed_aggregator().await;

    let params = SearchParams {
        hosts: Some(vec!["WES".to_string()]),
        ..Default::default()
    };
    let page = aggregator.search_episodes(&params, WIDE).await.unwrap();

    // Matches both "Wes" and "wes".
    assert_eq!(page.episodes.len(), 2);
}

#[tokio::test]
async fn host_filter_requires_exact_name_match() {
    let aggregator = primed_aggregator().await;

    let params = SearchParams {
        hosts: Some(vec!["We".to_string()]),
        ..Default::default()
    };
    let page = aggregator.search_episodes(&params, WIDE).await.unwrap();

    assert!(page.episodes.is_empty());
}

#[tokio::test]
async fn text_filter_searches_title_and_description() {
    let aggregator = primed_aggregator().await;

    let params = SearchParams {
        text_search: Some("texas".to_string()),
        ..Default::default()
    };
    let page = aggregator.search_episodes(&params, WIDE).await.unwrap();
    assert_eq!(page.episodes.len(), 1);
    assert_eq!(page.episodes[0].title, "Texas Flood");

    let params = SearchParams {
        text_search: Some("nothing much".to_string()),
        ..Default::default()
    };
    let page = aggregator.search_episodes(&params, WIDE).await.unwrap();
    assert_eq!(page.episodes.len(), 1);
    assert_eq!(page.episodes[0].title, "Quiet Week");
}

#[tokio::test]
async fn date_bounds_include_and_exclude_end_to_end() {
    let aggregator = primed_aggregator().await;

    let params = SearchParams {
        since_date: Some("2025-10-01".to_string()),
        ..Default::default()
    };
    let page = aggregator.search_episodes(&params, WIDE).await.unwrap();
    assert!(page
        .episodes
        .iter()
        .any(|e| e.published_date == "Sun, 05 Oct 2025 19:25:37 -0700"));

    let params = SearchParams {
        before_date: Some("2025-10-01".to_string()),
        ..Default::default()
    };
    let page = aggregator.search_episodes(&params, WIDE).await.unwrap();
    assert!(page.episodes.is_empty());
}

#[tokio::test]
async fn unparseable_episode_date_is_excluded_by_an_active_date_filter() {
    let feed = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
<item><title>Dated</title><pubDate>2025-10-05</pubDate><description>x</description></item>
<item><title>Undated</title><pubDate>someday soon</pubDate><description>x</description></item>
</channel></rss>"#;

    let config = ShowConfig::from_pairs(vec![("T", "stub://t")]);
    let aggregator =
        PodcastAggregator::with_transport(config, Arc::new(StubTransport::new()));
    aggregator.cache().prime("T", feed).await.unwrap();

    let params = SearchParams {
        since_date: Some("2025-01-01".to_string()),
        ..Default::default()
    };
    let page = aggregator.search_episodes(&params, WIDE).await.unwrap();
    let titles: Vec<&str> = page.episodes.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Dated"]);

    // Without a date filter the undated episode is still reachable.
    let params = SearchParams {
        text_search: Some("x".to_string()),
        ..Default::default()
    };
    let page = aggregator.search_episodes(&params, WIDE).await.unwrap();
    assert_eq!(page.episodes.len(), 2);
}

#[tokio::test]
async fn all_shows_search_concatenates_in_configured_order() {
    let config = ShowConfig::from_pairs(vec![("B Show", "stub://b"), ("A Show", "stub://a")]);
    let aggregator =
        PodcastAggregator::with_transport(config, Arc::new(StubTransport::new()));
    aggregator.cache().prime("B Show", &feed_with_items(2)).await.unwrap();
    aggregator.cache().prime("A Show", &feed_with_items(1)).await.unwrap();

    let params = SearchParams {
        text_search: Some("episode".to_string()),
        ..Default::default()
    };
    let page = aggregator.search_episodes(&params, WIDE).await.unwrap();

    // Configured order, not alphabetical: B Show's records come first.
    let shows: Vec<&str> = page.episodes.iter().map(|e| e.show_name.as_str()).collect();
    assert_eq!(shows, vec!["B Show", "B Show", "A Show"]);
}

#[tokio::test]
async fn pagination_windows_and_counts() {
    let config = ShowConfig::from_pairs(vec![("Generated", "stub://gen")]);
    let aggregator =
        PodcastAggregator::with_transport(config, Arc::new(StubTransport::new()));
    aggregator
        .cache()
        .prime("Generated", &feed_with_items(12))
        .await
        .unwrap();

    let params = SearchParams {
        show_name: Some("Generated".to_string()),
        ..Default::default()
    };

    let first = aggregator
        .search_episodes(&params, PageRequest { page: 1, per_page: 5 })
        .await
        .unwrap();
    assert_eq!(first.pagination.total, 12);
    assert_eq!(first.pagination.total_pages, 3);
    assert_eq!(first.episodes.len(), 5);
    assert_eq!(first.episodes[0].title, "Episode 1");

    let third = aggregator
        .search_episodes(&params, PageRequest { page: 3, per_page: 5 })
        .await
        .unwrap();
    assert_eq!(third.episodes.len(), 2);
    assert_eq!(third.episodes[0].title, "Episode 11");

    // Past the end: empty window, not an error.
    let fourth = aggregator
        .search_episodes(&params, PageRequest { page: 4, per_page: 5 })
        .await
        .unwrap();
    assert!(fourth.episodes.is_empty());
    assert_eq!(fourth.pagination.total, 12);

    // Degenerate page sizes.
    let none = aggregator
        .search_episodes(&params, PageRequest { page: 1, per_page: 0 })
        .await
        .unwrap();
    assert_eq!(none.pagination.total_pages, 0);
    assert!(none.episodes.is_empty());
}
