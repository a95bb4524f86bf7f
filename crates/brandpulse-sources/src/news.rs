//! General news search provider (NewsAPI-style `everything` endpoint).

use brandpulse_core::{RawMention, Source};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::SourceError;
use crate::provider::SourceProvider;

const DEFAULT_BASE_URL: &str = "https://newsapi.org";
const ARTICLE_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    description: Option<String>,
    author: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    url: Option<String>,
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

/// Searches a news index. Requires an API key; without one every fetch
/// degrades to an empty batch at the orchestrator.
pub struct NewsProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl NewsProvider {
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
impl SourceProvider for NewsProvider {
    fn source(&self) -> Source {
        Source::News
    }

    async fn fetch(&self, brand: &str) -> Result<Vec<RawMention>, SourceError> {
        let Some(api_key) = &self.api_key else {
            return Err(SourceError::MissingApiKey("news"));
        };

        let url = format!("{}/v2/everything", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", brand),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("apiKey", api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Api {
                source_kind: "news",
                status: response.status(),
            });
        }

        let body: EverythingResponse = response.json().await?;
        Ok(body
            .articles
            .into_iter()
            .take(ARTICLE_LIMIT)
            .filter_map(to_mention)
            .collect())
    }
}

/// Map one article into a mention, dropping records missing required fields.
fn to_mention(article: Article) -> Option<RawMention> {
    let title = article.title?;
    let published_at = article.published_at?;
    let url = article.url.filter(|u| !u.is_empty())?;
    let timestamp = DateTime::parse_from_rfc3339(&published_at)
        .ok()?
        .with_timezone(&Utc);

    let mut text = title;
    if let Some(description) = article.description.filter(|d| !d.is_empty()) {
        text.push_str(". ");
        text.push_str(&description);
    }

    let author = article
        .author
        .filter(|a| !a.is_empty())
        .or_else(|| article.source.and_then(|s| s.name))
        .unwrap_or_else(|| "unknown".to_string());

    Some(RawMention {
        source: Source::News,
        text,
        author,
        timestamp,
        url,
        engagement: 0,
    })
}
