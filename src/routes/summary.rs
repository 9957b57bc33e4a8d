use crate::error::Result;
use crate::models::route::RouteSummaryRequest;
use crate::models::RouteSummary;
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /api/route/summary
/// Encoded polyline, distance and duration through the given waypoints
pub async fn route_summary(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteSummaryRequest>,
) -> Result<Json<RouteSummary>> {
    tracing::info!(
        waypoints = request.waypoints.len(),
        optimize = request.optimize,
        "Route summary request"
    );

    let summary = state
        .route_summarizer
        .summarize(&request.intent, &request.waypoints, request.optimize)
        .await?;

    Ok(Json(summary))
}
