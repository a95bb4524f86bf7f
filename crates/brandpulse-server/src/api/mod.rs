//! HTTP surface: route wiring, shared response bodies, health check.

mod mentions;
mod monitor;

use std::sync::Arc;

use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use brandpulse_engine::BrandTracker;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<BrandTracker>,
}

/// Body shape shared by every error response (400/404/500).
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
    timestamp: DateTime<Utc>,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/mentions", get(mentions::list_mentions))
        .route("/api/analytics", get(mentions::get_analytics))
        .route("/api/monitor/start", post(monitor::start_monitoring))
        .fallback(endpoint_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "Server is running",
        timestamp: Utc::now(),
    })
}

async fn endpoint_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            success: false,
            message: "Endpoint not found".to_string(),
        }),
    )
}

/// Last-resort 500 for handler panics. Unreachable by contract — the engine
/// has no failing operations — but the surface must still answer.
fn handle_panic(_err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    tracing::error!("request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            success: false,
            message: "Internal server error".to_string(),
        }),
    )
        .into_response()
}
