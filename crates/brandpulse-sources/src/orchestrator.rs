//! Settle-all fan-out over a set of source providers.

use std::sync::Arc;
use std::time::Duration;

use brandpulse_core::{RawMention, Source};

use crate::provider::SourceProvider;

/// The result of one provider call within a fan-out pass.
///
/// A failed or timed-out call still produces a batch (with zero mentions),
/// so per-provider counts stay observable in invocation order.
#[derive(Debug)]
pub struct SourceBatch {
    pub source: Source,
    pub mentions: Vec<RawMention>,
}

/// Invoke every provider concurrently and wait for all of them to settle.
///
/// No call is cancelled because a sibling failed or finished first. Each
/// call gets the same fixed `per_call_budget`; exceeding it, or returning an
/// error, degrades that provider to an empty batch with a warning. Batches
/// are returned in provider-invocation order.
pub async fn fetch_all(
    providers: &[Arc<dyn SourceProvider>],
    brand: &str,
    per_call_budget: Duration,
) -> Vec<SourceBatch> {
    let calls = providers.iter().map(|provider| {
        let provider = Arc::clone(provider);
        let brand = brand.to_string();
        async move {
            let source = provider.source();
            match tokio::time::timeout(per_call_budget, provider.fetch(&brand)).await {
                Ok(Ok(mentions)) => {
                    tracing::debug!(source = %source, count = mentions.len(), "provider fetch ok");
                    SourceBatch { source, mentions }
                }
                Ok(Err(e)) => {
                    tracing::warn!(source = %source, error = %e, "provider fetch failed");
                    SourceBatch {
                        source,
                        mentions: Vec::new(),
                    }
                }
                Err(_) => {
                    tracing::warn!(
                        source = %source,
                        budget_secs = per_call_budget.as_secs(),
                        "provider fetch timed out"
                    );
                    SourceBatch {
                        source,
                        mentions: Vec::new(),
                    }
                }
            }
        }
    });

    futures::future::join_all(calls).await
}
