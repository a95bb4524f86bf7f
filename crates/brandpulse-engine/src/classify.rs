//! Keyword-frequency mention classifier.
//!
//! Deliberately simple: a keyword counts once if it occurs anywhere in the
//! lowercased text as a substring (no tokenizing, no stemming). The word
//! lists and the topic enumeration order are part of the observable
//! contract and must not be reordered.

use brandpulse_core::{Mention, RawMention, Sentiment, Topic};
use chrono::Utc;

const POSITIVE_KEYWORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "love",
    "best",
    "awesome",
    "fantastic",
    "wonderful",
    "perfect",
    "outstanding",
    "brilliant",
    "impressive",
    "superb",
    "incredible",
    "exceptional",
    "remarkable",
    "pleased",
    "satisfied",
    "happy",
    "delighted",
    "thrilled",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "bad",
    "terrible",
    "worst",
    "hate",
    "awful",
    "poor",
    "disappointing",
    "horrible",
    "useless",
    "broken",
    "sucks",
    "fail",
    "failed",
    "failure",
    "wrong",
    "issue",
    "problem",
    "bug",
    "error",
    "frustrating",
    "annoying",
    "upset",
    "angry",
    "disappointed",
    "unhappy",
];

/// Topic keyword table. A topic only replaces the running best on a strictly
/// greater hit count, so earlier entries win ties.
const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (
        Topic::Product,
        &[
            "product",
            "feature",
            "quality",
            "design",
            "build",
            "version",
            "release",
            "update",
            "upgrade",
            "functionality",
            "interface",
        ],
    ),
    (
        Topic::Support,
        &[
            "support",
            "help",
            "service",
            "customer",
            "care",
            "team",
            "response",
            "assist",
            "contact",
            "representative",
        ],
    ),
    (
        Topic::Pricing,
        &[
            "price",
            "cost",
            "expensive",
            "cheap",
            "value",
            "worth",
            "money",
            "affordable",
            "budget",
            "subscription",
            "payment",
            "fee",
        ],
    ),
    (
        Topic::Performance,
        &[
            "fast",
            "slow",
            "speed",
            "performance",
            "lag",
            "quick",
            "efficient",
            "responsive",
            "loading",
            "latency",
        ],
    ),
    (
        Topic::Quality,
        &[
            "quality",
            "durable",
            "reliable",
            "sturdy",
            "solid",
            "premium",
            "dependable",
            "trustworthy",
            "consistent",
        ],
    ),
    (
        Topic::Shipping,
        &[
            "shipping",
            "delivery",
            "ship",
            "delivered",
            "package",
            "tracking",
            "arrived",
            "transit",
        ],
    ),
    (
        Topic::Bug,
        &[
            "bug",
            "error",
            "crash",
            "broken",
            "issue",
            "problem",
            "glitch",
            "malfunction",
            "defect",
        ],
    ),
];

fn keyword_hits(lower_text: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|kw| lower_text.contains(**kw))
        .count()
}

/// Classify a text's sentiment by comparing positive and negative keyword
/// hit counts. Ties, including 0-0, are neutral. Total: never fails, empty
/// text is neutral.
#[must_use]
pub fn classify_sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let positive = keyword_hits(&lower, POSITIVE_KEYWORDS);
    let negative = keyword_hits(&lower, NEGATIVE_KEYWORDS);

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Pick the topic whose keyword set scores the most hits. `general` when no
/// set scores above zero. Total: never fails.
#[must_use]
pub fn extract_topic(text: &str) -> Topic {
    let lower = text.to_lowercase();

    let mut best = Topic::General;
    let mut best_hits = 0;
    for (topic, keywords) in TOPIC_KEYWORDS {
        let hits = keyword_hits(&lower, keywords);
        if hits > best_hits {
            best_hits = hits;
            best = *topic;
        }
    }
    best
}

/// Turn a validated raw mention into a fully classified [`Mention`].
///
/// Infallible by construction: classification is total and id generation
/// cannot fail.
#[must_use]
pub fn classify_mention(raw: RawMention, brand: &str) -> Mention {
    Mention {
        id: generate_id(),
        brand: brand.to_string(),
        sentiment: classify_sentiment(&raw.text),
        topic: extract_topic(&raw.text),
        source: raw.source,
        text: raw.text,
        author: raw.author,
        timestamp: raw.timestamp,
        url: raw.url,
        engagement: raw.engagement,
    }
}

/// Millisecond timestamp plus a random hex suffix. Collision probability is
/// negligible, not formally zero.
fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::random();
    format!("{millis}-{suffix:08x}")
}
