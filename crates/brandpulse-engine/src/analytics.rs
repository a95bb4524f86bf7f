//! Rolling analytics recomputed from the full store after every mutation.

use brandpulse_core::{Mention, Sentiment, Topic};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Trailing-hour mention count above which a spike is reported.
pub const SPIKE_THRESHOLD: usize = 10;

const TOP_TOPICS_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_mentions: usize,
    pub sentiment_breakdown: SentimentBreakdown,
    pub top_topics: Vec<TopicCount>,
    pub recent_spikes: Vec<Spike>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicCount {
    pub topic: Topic,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spike {
    pub topic: Topic,
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Recompute the snapshot from scratch over the current store contents.
///
/// `now` is the recomputation instant, used for the trailing-hour spike
/// window and the spike timestamp. The reported spike topic is the
/// post-sort top topic of the whole window, not the topic driving the
/// trailing hour.
#[must_use]
pub fn recompute(mentions: &[Mention], now: DateTime<Utc>) -> AnalyticsSnapshot {
    let mut sentiment_breakdown = SentimentBreakdown::default();
    for mention in mentions {
        match mention.sentiment {
            Sentiment::Positive => sentiment_breakdown.positive += 1,
            Sentiment::Negative => sentiment_breakdown.negative += 1,
            Sentiment::Neutral => sentiment_breakdown.neutral += 1,
        }
    }

    // Insertion-ordered tally: the stable sort below then keeps
    // first-encountered topics ahead on equal counts.
    let mut top_topics: Vec<TopicCount> = Vec::new();
    for mention in mentions {
        match top_topics.iter_mut().find(|t| t.topic == mention.topic) {
            Some(entry) => entry.count += 1,
            None => top_topics.push(TopicCount {
                topic: mention.topic,
                count: 1,
            }),
        }
    }
    top_topics.sort_by(|a, b| b.count.cmp(&a.count));
    top_topics.truncate(TOP_TOPICS_LIMIT);

    let recent_count = mentions
        .iter()
        .filter(|m| now.signed_duration_since(m.timestamp) < Duration::hours(1))
        .count();

    let recent_spikes = if recent_count > SPIKE_THRESHOLD {
        let topic = top_topics.first().map_or(Topic::General, |t| t.topic);
        vec![Spike {
            topic,
            count: recent_count,
            timestamp: now,
        }]
    } else {
        Vec::new()
    };

    AnalyticsSnapshot {
        total_mentions: mentions.len(),
        sentiment_breakdown,
        top_topics,
        recent_spikes,
    }
}

/// Weight a mention's raw engagement by its sentiment
/// (positive 1.2, neutral 1.0, negative 0.8), rounded to nearest.
#[must_use]
pub fn calculate_engagement(mention: &Mention) -> u64 {
    let multiplier = match mention.sentiment {
        Sentiment::Positive => 1.2,
        Sentiment::Neutral => 1.0,
        Sentiment::Negative => 0.8,
    };
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let weighted = (mention.engagement as f64 * multiplier).round() as u64;
    weighted
}
