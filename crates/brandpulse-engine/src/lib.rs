//! Mention tracking engine for BrandPulse.
//!
//! Classifies raw mentions with a keyword-frequency heuristic, retains a
//! bounded deduplicated window of them, and recomputes a rolling analytics
//! snapshot after every store mutation. The [`BrandTracker`] service object
//! owns all of this behind one lock so readers always see a mention list and
//! an analytics snapshot from the same moment.

pub mod analytics;
pub mod classify;
pub mod store;
pub mod tracker;

pub use analytics::{calculate_engagement, AnalyticsSnapshot, SentimentBreakdown, Spike, TopicCount};
pub use classify::{classify_mention, classify_sentiment, extract_topic};
pub use store::MentionStore;
pub use tracker::{sanitize_brand, BrandTracker, MonitorStartOutcome, SourceCounts};
