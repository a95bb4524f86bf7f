//! Lock-guarded tracking service: one brand, one store, one snapshot.

use std::sync::Arc;
use std::time::Duration;

use brandpulse_core::{Mention, Source};
use brandpulse_sources::{fetch_all, SourceBatch, SourceProvider};
use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::analytics::{self, AnalyticsSnapshot};
use crate::classify::classify_mention;
use crate::store::MentionStore;

const MAX_BRAND_CHARS: usize = 200;

/// Per-provider mention counts for one monitor-start fan-out,
/// in invocation order.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCounts {
    pub forum: usize,
    pub tech_news: usize,
    pub news: usize,
    pub video: usize,
    pub social: usize,
}

impl SourceCounts {
    fn from_batches(batches: &[SourceBatch]) -> Self {
        let mut counts = Self::default();
        for batch in batches {
            match batch.source {
                Source::Forum => counts.forum += batch.mentions.len(),
                Source::TechNews => counts.tech_news += batch.mentions.len(),
                Source::News => counts.news += batch.mentions.len(),
                Source::Video => counts.video += batch.mentions.len(),
                Source::Social => counts.social += batch.mentions.len(),
            }
        }
        counts
    }
}

/// Result of starting a monitoring session.
#[derive(Debug)]
pub struct MonitorStartOutcome {
    pub brand: String,
    pub initial_count: usize,
    pub sources: SourceCounts,
}

#[derive(Default)]
struct TrackerState {
    /// `None` = Idle, `Some` = Tracking. Set only by a monitor-start.
    brand: Option<String>,
    store: MentionStore,
    analytics: AnalyticsSnapshot,
}

/// Process-wide tracking engine for exactly one brand at a time.
///
/// The mention store and the analytics snapshot live behind a single
/// `RwLock` as one unit, so a reader never pairs mentions from after a
/// mutation with analytics from before it. Network fan-out runs entirely
/// outside the lock; only classify-free store mutation and the synchronous
/// recompute happen inside it.
pub struct BrandTracker {
    full_set: Vec<Arc<dyn SourceProvider>>,
    refresh_set: Vec<Arc<dyn SourceProvider>>,
    per_call_budget: Duration,
    state: RwLock<TrackerState>,
}

impl BrandTracker {
    /// `full_set` is fanned out on monitor-start, `refresh_set` on every
    /// periodic refresh. `per_call_budget` bounds each provider call.
    #[must_use]
    pub fn new(
        full_set: Vec<Arc<dyn SourceProvider>>,
        refresh_set: Vec<Arc<dyn SourceProvider>>,
        per_call_budget: Duration,
    ) -> Self {
        Self {
            full_set,
            refresh_set,
            per_call_budget,
            state: RwLock::new(TrackerState::default()),
        }
    }

    /// Start a monitoring session for `brand`, discarding all prior state.
    ///
    /// Fans out to every provider, classifies the combined results, and
    /// installs them wholesale (full replace, no dedup). The caller is
    /// expected to pass a validated, sanitized brand.
    pub async fn start_monitoring(&self, brand: &str) -> MonitorStartOutcome {
        let batches = fetch_all(&self.full_set, brand, self.per_call_budget).await;
        let sources = SourceCounts::from_batches(&batches);

        let classified: Vec<Mention> = batches
            .into_iter()
            .flat_map(|batch| batch.mentions)
            .map(|raw| classify_mention(raw, brand))
            .collect();
        let initial_count = classified.len();

        let mut state = self.state.write().await;
        state.brand = Some(brand.to_string());
        state.store.replace(classified);
        state.analytics = analytics::recompute(state.store.mentions(), Utc::now());
        drop(state);

        tracing::info!(brand, count = initial_count, "monitoring started");
        MonitorStartOutcome {
            brand: brand.to_string(),
            initial_count,
            sources,
        }
    }

    /// Run one refresh cycle for the currently tracked brand.
    ///
    /// Returns `None` when idle (no brand tracked), otherwise the number of
    /// mentions actually merged. A cycle where every provider failed is a
    /// zero-candidate merge; it never clears the store or the tracked brand.
    pub async fn refresh(&self) -> Option<usize> {
        let brand = self.state.read().await.brand.clone()?;

        let batches = fetch_all(&self.refresh_set, &brand, self.per_call_budget).await;
        let candidates: Vec<Mention> = batches
            .into_iter()
            .flat_map(|batch| batch.mentions)
            .map(|raw| classify_mention(raw, &brand))
            .collect();

        let mut state = self.state.write().await;
        // The tracked brand may have changed while the fetch was in flight;
        // merging the stale batch would mix two brands in one session.
        if state.brand.as_deref() != Some(brand.as_str()) {
            tracing::debug!(brand = %brand, "discarding refresh batch for replaced brand");
            return Some(0);
        }

        let added = state.store.merge_incoming(candidates);
        state.analytics = analytics::recompute(state.store.mentions(), Utc::now());
        drop(state);

        tracing::info!(brand = %brand, added, "refresh cycle merged");
        Some(added)
    }

    /// Snapshot of retained mentions, filtered by exact serialized
    /// sentiment/source values. An unrecognized filter value matches
    /// nothing. Omitted filters pass everything through.
    pub async fn mentions_filtered(
        &self,
        sentiment: Option<&str>,
        source: Option<&str>,
        limit: usize,
    ) -> Vec<Mention> {
        let state = self.state.read().await;
        state
            .store
            .mentions()
            .iter()
            .filter(|m| sentiment.is_none_or(|s| m.sentiment.as_str() == s))
            .filter(|m| source.is_none_or(|s| m.source.as_str() == s))
            .take(limit)
            .cloned()
            .collect()
    }

    /// The analytics snapshot paired with the current store contents.
    pub async fn analytics(&self) -> AnalyticsSnapshot {
        self.state.read().await.analytics.clone()
    }

    /// The brand currently tracked, if any.
    pub async fn tracked_brand(&self) -> Option<String> {
        self.state.read().await.brand.clone()
    }
}

/// Trim surrounding whitespace, strip angle brackets, and cap the length of
/// a client-supplied brand string.
#[must_use]
pub fn sanitize_brand(input: &str) -> String {
    input
        .trim()
        .replace(['<', '>'], "")
        .chars()
        .take(MAX_BRAND_CHARS)
        .collect()
}
