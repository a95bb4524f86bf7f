//! Mention listing and analytics read handlers.

use axum::extract::{Query, State};
use axum::Json;
use brandpulse_core::Mention;
use brandpulse_engine::{calculate_engagement, AnalyticsSnapshot};
use serde::{Deserialize, Serialize};

use super::AppState;

const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub(super) struct MentionsQuery {
    sentiment: Option<String>,
    source: Option<String>,
    limit: Option<usize>,
}

/// A retained mention plus its sentiment-weighted engagement score.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MentionView {
    #[serde(flatten)]
    mention: Mention,
    engagement_score: u64,
}

#[derive(Debug, Serialize)]
pub(super) struct MentionsResponse {
    success: bool,
    count: usize,
    data: Vec<MentionView>,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalyticsResponse {
    success: bool,
    data: AnalyticsSnapshot,
}

/// `GET /api/mentions` — current store contents, filtered and truncated.
///
/// Omitted filters pass everything through; an unrecognized filter value
/// matches nothing.
pub(super) async fn list_mentions(
    State(state): State<AppState>,
    Query(query): Query<MentionsQuery>,
) -> Json<MentionsResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let mentions = state
        .tracker
        .mentions_filtered(query.sentiment.as_deref(), query.source.as_deref(), limit)
        .await;

    let data: Vec<MentionView> = mentions
        .into_iter()
        .map(|mention| MentionView {
            engagement_score: calculate_engagement(&mention),
            mention,
        })
        .collect();

    Json(MentionsResponse {
        success: true,
        count: data.len(),
        data,
    })
}

/// `GET /api/analytics` — the snapshot recomputed at the last store mutation.
pub(super) async fn get_analytics(State(state): State<AppState>) -> Json<AnalyticsResponse> {
    Json(AnalyticsResponse {
        success: true,
        data: state.tracker.analytics().await,
    })
}
