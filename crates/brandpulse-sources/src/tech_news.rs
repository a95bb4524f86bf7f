//! Tech-news aggregator search provider (Algolia Hacker News API).

use brandpulse_core::{RawMention, Source};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::SourceError;
use crate::provider::SourceProvider;

const DEFAULT_BASE_URL: &str = "https://hn.algolia.com";
const ITEM_PAGE_BASE: &str = "https://news.ycombinator.com/item?id=";
const HITS_PER_PAGE: &str = "10";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    title: Option<String>,
    story_text: Option<String>,
    author: Option<String>,
    created_at: Option<String>,
    url: Option<String>,
    #[serde(rename = "objectID")]
    object_id: Option<String>,
    points: Option<i64>,
    num_comments: Option<i64>,
}

/// Searches the aggregator's story index.
pub struct TechNewsProvider {
    client: reqwest::Client,
    base_url: String,
}

impl TechNewsProvider {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Construct against a non-default endpoint, for tests.
    #[must_use]
    pub fn with_base_url(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl SourceProvider for TechNewsProvider {
    fn source(&self) -> Source {
        Source::TechNews
    }

    async fn fetch(&self, brand: &str) -> Result<Vec<RawMention>, SourceError> {
        let url = format!("{}/api/v1/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", brand),
                ("tags", "story"),
                ("hitsPerPage", HITS_PER_PAGE),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Api {
                source_kind: "tech_news",
                status: response.status(),
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.hits.into_iter().filter_map(to_mention).collect())
    }
}

/// Map one story hit into a mention, dropping records missing required fields.
fn to_mention(hit: Hit) -> Option<RawMention> {
    let title = hit.title?;
    let created_at = hit.created_at?;
    let timestamp = DateTime::parse_from_rfc3339(&created_at)
        .ok()?
        .with_timezone(&Utc);

    // External link when present, otherwise the aggregator's item page.
    let url = match hit.url.filter(|u| !u.is_empty()) {
        Some(u) => u,
        None => format!("{ITEM_PAGE_BASE}{}", hit.object_id?),
    };

    let mut text = title;
    if let Some(story_text) = hit.story_text.filter(|s| !s.is_empty()) {
        text.push_str(" - ");
        text.push_str(&story_text);
    }

    let points = hit.points.unwrap_or(0).max(0);
    let comments = hit.num_comments.unwrap_or(0).max(0);
    #[allow(clippy::cast_sign_loss)]
    let engagement = (points + comments) as u64;

    Some(RawMention {
        source: Source::TechNews,
        text,
        author: hit.author.unwrap_or_else(|| "unknown".to_string()),
        timestamp,
        url,
        engagement,
    })
}
