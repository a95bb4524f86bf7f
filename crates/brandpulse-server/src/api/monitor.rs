//! Monitor-start handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use brandpulse_engine::{sanitize_brand, SourceCounts};
use serde::{Deserialize, Serialize};

use super::{AppState, ErrorBody};

#[derive(Debug, Deserialize)]
pub(super) struct StartMonitorRequest {
    brand: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StartMonitorResponse {
    success: bool,
    message: String,
    initial_count: usize,
    sources: SourceCounts,
}

/// `POST /api/monitor/start` — begin a monitoring session.
///
/// Validates the brand (non-empty after trimming and sanitation, 400
/// otherwise; no state is mutated on rejection), then runs the full
/// fan-out → classify → replace → recompute pipeline.
pub(super) async fn start_monitoring(
    State(state): State<AppState>,
    body: Result<Json<StartMonitorRequest>, JsonRejection>,
) -> Response {
    let brand = match body {
        Ok(Json(StartMonitorRequest { brand: Some(brand) })) => sanitize_brand(&brand),
        // Missing body, malformed JSON, or a non-string brand field.
        _ => String::new(),
    };

    if brand.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                success: false,
                message: "Valid brand name is required".to_string(),
            }),
        )
            .into_response();
    }

    let outcome = state.tracker.start_monitoring(&brand).await;

    Json(StartMonitorResponse {
        success: true,
        message: format!("Started monitoring mentions for \"{}\"", outcome.brand),
        initial_count: outcome.initial_count,
        sources: outcome.sources,
    })
    .into_response()
}
