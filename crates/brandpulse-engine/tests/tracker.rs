//! Integration tests for `BrandTracker` using in-memory providers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use brandpulse_core::{RawMention, Source};
use brandpulse_engine::BrandTracker;
use brandpulse_sources::{SourceError, SourceProvider};
use chrono::Utc;

/// Provider returning a fixed number of mentions with predictable URLs.
struct StaticProvider {
    source: Source,
    prefix: &'static str,
    count: usize,
}

#[async_trait]
impl SourceProvider for StaticProvider {
    fn source(&self) -> Source {
        self.source
    }

    async fn fetch(&self, brand: &str) -> Result<Vec<RawMention>, SourceError> {
        Ok((0..self.count)
            .map(|i| RawMention {
                source: self.source,
                text: format!("{brand} is great"),
                author: "tester".to_string(),
                timestamp: Utc::now(),
                url: format!("https://example.com/{}/{i}", self.prefix),
                engagement: i as u64,
            })
            .collect())
    }
}

struct FailingProvider(Source);

#[async_trait]
impl SourceProvider for FailingProvider {
    fn source(&self) -> Source {
        self.0
    }

    async fn fetch(&self, _brand: &str) -> Result<Vec<RawMention>, SourceError> {
        Err(SourceError::AllInstancesFailed)
    }
}

fn provider(source: Source, prefix: &'static str, count: usize) -> Arc<dyn SourceProvider> {
    Arc::new(StaticProvider {
        source,
        prefix,
        count,
    })
}

fn full_set() -> Vec<Arc<dyn SourceProvider>> {
    vec![
        provider(Source::Forum, "forum", 3),
        provider(Source::TechNews, "hn", 2),
        provider(Source::News, "news", 1),
        provider(Source::Video, "video", 0),
        provider(Source::Social, "social", 4),
    ]
}

const BUDGET: Duration = Duration::from_secs(10);

#[tokio::test]
async fn monitor_start_aggregates_all_providers() {
    let tracker = BrandTracker::new(full_set(), Vec::new(), BUDGET);
    let outcome = tracker.start_monitoring("Acme").await;

    assert_eq!(outcome.initial_count, 10);
    assert_eq!(outcome.sources.forum, 3);
    assert_eq!(outcome.sources.tech_news, 2);
    assert_eq!(outcome.sources.news, 1);
    assert_eq!(outcome.sources.video, 0);
    assert_eq!(outcome.sources.social, 4);

    assert_eq!(tracker.tracked_brand().await.as_deref(), Some("Acme"));
    let analytics = tracker.analytics().await;
    assert_eq!(analytics.total_mentions, 10);
    // Every text classifies as positive ("great").
    assert_eq!(analytics.sentiment_breakdown.positive, 10);
}

#[tokio::test]
async fn monitor_start_discards_previous_session() {
    let tracker = BrandTracker::new(full_set(), Vec::new(), BUDGET);
    tracker.start_monitoring("First").await;
    let outcome = tracker.start_monitoring("Second").await;

    assert_eq!(outcome.initial_count, 10);
    let mentions = tracker.mentions_filtered(None, None, 50).await;
    assert!(mentions.iter().all(|m| m.brand == "Second"));
}

#[tokio::test]
async fn refresh_when_idle_is_a_noop() {
    let tracker = BrandTracker::new(full_set(), full_set(), BUDGET);
    assert_eq!(tracker.refresh().await, None);
    assert_eq!(tracker.analytics().await.total_mentions, 0);
}

#[tokio::test]
async fn refresh_merges_only_new_urls() {
    // Refresh set re-serves the same forum URLs plus two new tech-news ones.
    let refresh_set = vec![
        provider(Source::Forum, "forum", 3),
        provider(Source::TechNews, "fresh", 2),
    ];
    let tracker = BrandTracker::new(full_set(), refresh_set, BUDGET);
    tracker.start_monitoring("Acme").await;

    let added = tracker.refresh().await;
    assert_eq!(added, Some(2));

    let analytics = tracker.analytics().await;
    assert_eq!(analytics.total_mentions, 12);

    // New mentions sit at the front, in merge order.
    let mentions = tracker.mentions_filtered(None, None, 50).await;
    assert!(mentions[0].url.contains("/fresh/"));
    assert!(mentions[1].url.contains("/fresh/"));
}

#[tokio::test]
async fn refresh_with_all_providers_failing_keeps_the_store() {
    let refresh_set: Vec<Arc<dyn SourceProvider>> = vec![
        Arc::new(FailingProvider(Source::Forum)),
        Arc::new(FailingProvider(Source::TechNews)),
    ];
    let tracker = BrandTracker::new(full_set(), refresh_set, BUDGET);
    tracker.start_monitoring("Acme").await;

    let added = tracker.refresh().await;
    assert_eq!(added, Some(0));
    assert_eq!(tracker.analytics().await.total_mentions, 10);
    assert_eq!(tracker.tracked_brand().await.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn repeated_refresh_is_idempotent() {
    let refresh_set = vec![provider(Source::Forum, "forum", 3)];
    let tracker = BrandTracker::new(full_set(), refresh_set, BUDGET);
    tracker.start_monitoring("Acme").await;

    assert_eq!(tracker.refresh().await, Some(0));
    assert_eq!(tracker.refresh().await, Some(0));
    assert_eq!(tracker.analytics().await.total_mentions, 10);
}

#[tokio::test]
async fn mentions_filtered_by_sentiment_source_and_limit() {
    let tracker = BrandTracker::new(full_set(), Vec::new(), BUDGET);
    tracker.start_monitoring("Acme").await;

    let all = tracker.mentions_filtered(None, None, 50).await;
    assert_eq!(all.len(), 10);

    let limited = tracker.mentions_filtered(None, None, 4).await;
    assert_eq!(limited.len(), 4);

    let forum_only = tracker.mentions_filtered(None, Some("forum"), 50).await;
    assert_eq!(forum_only.len(), 3);

    let positive = tracker.mentions_filtered(Some("positive"), None, 50).await;
    assert_eq!(positive.len(), 10);

    // Unrecognized filter values match nothing rather than erroring.
    let unknown = tracker.mentions_filtered(Some("ecstatic"), None, 50).await;
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn store_never_exceeds_retention_bound() {
    let refresh_set = vec![provider(Source::Forum, "wave", 150)];
    let tracker = BrandTracker::new(full_set(), refresh_set, BUDGET);
    tracker.start_monitoring("Acme").await;
    tracker.refresh().await;

    let mentions = tracker.mentions_filtered(None, None, 500).await;
    assert_eq!(mentions.len(), 100);
}
