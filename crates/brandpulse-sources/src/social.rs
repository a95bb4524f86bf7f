//! Best-effort social scrape fallback (Nitter-style mirror instances).
//!
//! Mirror instances are unreliable, so a list of them is tried in order and
//! the first one yielding tweets wins. There is no stable per-tweet URL in
//! the scraped markup; every tweet in a batch carries the platform search
//! URL, which means the store's url-dedup retains at most one of them.

use brandpulse_core::{RawMention, Source};
use chrono::{DateTime, NaiveDateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use regex::Regex;

use crate::error::SourceError;
use crate::provider::SourceProvider;

const DEFAULT_INSTANCES: &[&str] = &[
    "https://nitter.net",
    "https://nitter.poast.org",
    "https://nitter.privacydev.net",
];
const TWEET_LIMIT: usize = 10;
const TWEET_DATE_FORMAT: &str = "%b %e, %Y · %I:%M %p UTC";

pub struct SocialProvider {
    client: reqwest::Client,
    instances: Vec<String>,
    user_agent: String,
}

impl SocialProvider {
    #[must_use]
    pub fn new(client: reqwest::Client, user_agent: &str) -> Self {
        Self::with_instances(
            client,
            user_agent,
            DEFAULT_INSTANCES.iter().map(ToString::to_string).collect(),
        )
    }

    /// Construct with an explicit instance list, for tests.
    #[must_use]
    pub fn with_instances(
        client: reqwest::Client,
        user_agent: &str,
        instances: Vec<String>,
    ) -> Self {
        Self {
            client,
            instances,
            user_agent: user_agent.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl SourceProvider for SocialProvider {
    fn source(&self) -> Source {
        Source::Social
    }

    async fn fetch(&self, brand: &str) -> Result<Vec<RawMention>, SourceError> {
        let encoded = utf8_percent_encode(brand, NON_ALPHANUMERIC).to_string();

        for instance in &self.instances {
            let url = format!("{instance}/search?f=tweets&q={encoded}");
            let response = match self
                .client
                .get(&url)
                .header("User-Agent", &self.user_agent)
                .send()
                .await
            {
                Ok(r) if r.status().is_success() => r,
                Ok(r) => {
                    tracing::warn!(instance = %instance, status = %r.status(), "social instance rejected search");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(instance = %instance, error = %e, "social instance unreachable");
                    continue;
                }
            };

            let html = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(instance = %instance, error = %e, "social instance body read failed");
                    continue;
                }
            };

            let tweets = parse_timeline(&html, brand, Utc::now());
            if !tweets.is_empty() {
                tracing::debug!(instance = %instance, count = tweets.len(), "collected social mentions");
                return Ok(tweets);
            }
        }

        Err(SourceError::AllInstancesFailed)
    }
}

/// Extract tweets from a search timeline page.
///
/// Tweets with an unparseable or missing date stamp fall back to `now`.
fn parse_timeline(html: &str, brand: &str, now: DateTime<Utc>) -> Vec<RawMention> {
    let content_re = Regex::new(r#"(?is)<div class="tweet-content[^"]*"[^>]*>(.*?)</div>"#)
        .expect("valid tweet content regex");
    let author_re =
        Regex::new(r#"(?is)<a class="username"[^>]*>(.*?)</a>"#).expect("valid username regex");
    let date_re = Regex::new(r#"(?is)class="tweet-date"[^>]*><a[^>]*title="([^"]+)""#)
        .expect("valid tweet date regex");

    let search_url = format!(
        "https://twitter.com/search?q={}",
        utf8_percent_encode(brand, NON_ALPHANUMERIC)
    );

    let mut tweets = Vec::new();
    for segment in html.split(r#"class="timeline-item"#).skip(1) {
        let text = content_re
            .captures(segment)
            .and_then(|cap| cap.get(1).map(|m| clean_text(m.as_str())))
            .unwrap_or_default();
        if text.is_empty() {
            continue;
        }

        let author = author_re
            .captures(segment)
            .and_then(|cap| cap.get(1).map(|m| clean_text(m.as_str())))
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        let timestamp = date_re
            .captures(segment)
            .and_then(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .and_then(|raw| parse_tweet_date(&raw))
            .unwrap_or(now);

        tweets.push(RawMention {
            source: Source::Social,
            text,
            author,
            timestamp,
            url: search_url.clone(),
            engagement: 0,
        });

        if tweets.len() >= TWEET_LIMIT {
            break;
        }
    }

    tweets
}

/// Parse the mirror's human-readable date stamp, e.g.
/// `Jan 2, 2024 · 3:04 PM UTC`. RFC 3339 stamps are accepted too.
fn parse_tweet_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, TWEET_DATE_FORMAT) {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Strip markup and collapse whitespace.
fn clean_text(input: &str) -> String {
    let tags = Regex::new(r"(?is)<[^>]+>").expect("valid tags regex");
    let no_tags = tags.replace_all(input, " ");
    no_tags
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
