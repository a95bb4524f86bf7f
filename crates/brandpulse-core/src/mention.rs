use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform a mention was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Forum,
    TechNews,
    News,
    Video,
    Social,
}

impl Source {
    /// The serialized form, used for query-filter matching and logging.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Forum => "forum",
            Source::TechNews => "tech_news",
            Source::News => "news",
            Source::Video => "video",
            Source::Social => "social",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword-derived sentiment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

/// Keyword-derived topic classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Product,
    Support,
    Pricing,
    Performance,
    Quality,
    Shipping,
    Bug,
    General,
}

impl Topic {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Product => "product",
            Topic::Support => "support",
            Topic::Pricing => "pricing",
            Topic::Performance => "performance",
            Topic::Quality => "quality",
            Topic::Shipping => "shipping",
            Topic::Bug => "bug",
            Topic::General => "general",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unclassified mention as returned by a source provider.
///
/// Providers validate their own records: `text`, `timestamp`, and `url`
/// are guaranteed present, `author` falls back to `"unknown"`, and
/// `engagement` to 0 when the platform reports none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMention {
    pub source: Source,
    /// Title concatenated with any body/description text.
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub engagement: u64,
}

/// A fully classified mention of the tracked brand. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    /// Millisecond timestamp plus random hex suffix. Collisions are
    /// negligible, not formally impossible.
    pub id: String,
    pub brand: String,
    pub source: Source,
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub engagement: u64,
    pub sentiment: Sentiment,
    pub topic: Topic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Source::TechNews).unwrap(),
            "\"tech_news\""
        );
        assert_eq!(serde_json::to_string(&Source::Forum).unwrap(), "\"forum\"");
    }

    #[test]
    fn sentiment_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            "\"positive\""
        );
    }

    #[test]
    fn topic_as_str_matches_serialized_form() {
        for topic in [
            Topic::Product,
            Topic::Support,
            Topic::Pricing,
            Topic::Performance,
            Topic::Quality,
            Topic::Shipping,
            Topic::Bug,
            Topic::General,
        ] {
            let json = serde_json::to_string(&topic).unwrap();
            assert_eq!(json, format!("\"{}\"", topic.as_str()));
        }
    }

    #[test]
    fn mention_round_trips_through_json() {
        let mention = Mention {
            id: "1700000000000-a1b2c3d4".to_string(),
            brand: "Acme".to_string(),
            source: Source::Forum,
            text: "Acme rocks".to_string(),
            author: "someone".to_string(),
            timestamp: Utc::now(),
            url: "https://example.com/post/1".to_string(),
            engagement: 42,
            sentiment: Sentiment::Neutral,
            topic: Topic::General,
        };
        let json = serde_json::to_string(&mention).expect("serialize");
        let back: Mention = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.url, mention.url);
        assert_eq!(back.source, Source::Forum);
        assert_eq!(back.engagement, 42);
    }
}
