//! Video search provider (YouTube Data API v3).

use brandpulse_core::{RawMention, Source};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::SourceError;
use crate::provider::SourceProvider;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";
const WATCH_URL_BASE: &str = "https://youtube.com/watch?v=";
const MAX_RESULTS: &str = "10";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    id: Option<ItemId>,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(rename = "channelTitle")]
    channel_title: Option<String>,
}

/// Searches the video platform's search API. Requires an API key; without
/// one every fetch degrades to an empty batch at the orchestrator.
pub struct VideoProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl VideoProvider {
    #[must_use]
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL)
    }

    /// Construct against a non-default endpoint, for tests.
    #[must_use]
    pub fn with_base_url(
        client: reqwest::Client,
        api_key: Option<String>,
        base_url: &str,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl SourceProvider for VideoProvider {
    fn source(&self) -> Source {
        Source::Video
    }

    async fn fetch(&self, brand: &str) -> Result<Vec<RawMention>, SourceError> {
        let Some(api_key) = &self.api_key else {
            return Err(SourceError::MissingApiKey("video"));
        };

        let url = format!("{}/youtube/v3/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", brand),
                ("type", "video"),
                ("maxResults", MAX_RESULTS),
                ("key", api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Api {
                source_kind: "video",
                status: response.status(),
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.items.into_iter().filter_map(to_mention).collect())
    }
}

/// Map one search item into a mention, dropping records missing required
/// fields (video id, title, publish time).
fn to_mention(item: Item) -> Option<RawMention> {
    let video_id = item.id?.video_id?;
    let snippet = item.snippet?;
    let title = snippet.title?;
    let published_at = snippet.published_at?;
    let timestamp = DateTime::parse_from_rfc3339(&published_at)
        .ok()?
        .with_timezone(&Utc);

    let mut text = title;
    if let Some(description) = snippet.description.filter(|d| !d.is_empty()) {
        text.push_str(" - ");
        text.push_str(&description);
    }

    Some(RawMention {
        source: Source::Video,
        text,
        author: snippet
            .channel_title
            .unwrap_or_else(|| "unknown".to_string()),
        timestamp,
        url: format!("{WATCH_URL_BASE}{video_id}"),
        engagement: 0,
    })
}
