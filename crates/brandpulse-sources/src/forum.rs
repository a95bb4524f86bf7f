//! Forum search provider (Reddit public search API).

use brandpulse_core::{RawMention, Source};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::SourceError;
use crate::provider::SourceProvider;

const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
const PUBLIC_POST_BASE: &str = "https://reddit.com";
const RESULT_LIMIT: &str = "15";
const SELFTEXT_SNIPPET_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: Option<String>,
    selftext: Option<String>,
    author: Option<String>,
    created_utc: Option<f64>,
    permalink: Option<String>,
    score: Option<i64>,
    num_comments: Option<i64>,
}

/// Searches the forum's public JSON search endpoint, newest first.
pub struct ForumProvider {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl ForumProvider {
    #[must_use]
    pub fn new(client: reqwest::Client, user_agent: &str) -> Self {
        Self::with_base_url(client, user_agent, DEFAULT_BASE_URL)
    }

    /// Construct against a non-default endpoint, for tests.
    #[must_use]
    pub fn with_base_url(client: reqwest::Client, user_agent: &str, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl SourceProvider for ForumProvider {
    fn source(&self) -> Source {
        Source::Forum
    }

    async fn fetch(&self, brand: &str) -> Result<Vec<RawMention>, SourceError> {
        let url = format!("{}/search.json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", brand), ("sort", "new"), ("limit", RESULT_LIMIT)])
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Api {
                source_kind: "forum",
                status: response.status(),
            });
        }

        let listing: Listing = response.json().await?;
        Ok(listing
            .data
            .children
            .into_iter()
            .filter_map(|post| to_mention(post.data))
            .collect())
    }
}

/// Map one post into a mention, dropping records missing required fields.
fn to_mention(post: PostData) -> Option<RawMention> {
    let title = post.title?;
    let created_utc = post.created_utc?;
    let permalink = post.permalink?;

    #[allow(clippy::cast_possible_truncation)]
    let timestamp = DateTime::<Utc>::from_timestamp(created_utc as i64, 0)?;

    let mut text = title;
    if let Some(selftext) = post.selftext.filter(|s| !s.is_empty()) {
        text.push_str(" - ");
        text.extend(selftext.chars().take(SELFTEXT_SNIPPET_CHARS));
    }

    let score = post.score.unwrap_or(0).max(0);
    let comments = post.num_comments.unwrap_or(0).max(0);
    #[allow(clippy::cast_sign_loss)]
    let engagement = (score + comments) as u64;

    Some(RawMention {
        source: Source::Forum,
        text,
        author: post.author.unwrap_or_else(|| "unknown".to_string()),
        timestamp,
        url: format!("{PUBLIC_POST_BASE}{permalink}"),
        engagement,
    })
}
