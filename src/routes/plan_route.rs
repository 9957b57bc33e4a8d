use crate::constants::DEFAULT_CLIENT_IPV6;
use crate::error::{AppError, Result};
use crate::models::route::{PlanRouteRequest, PlanRouteResponse};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// POST /api/route
/// Classify a free-text request and assemble its waypoints
pub async fn plan_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanRouteRequest>,
) -> Result<Json<PlanRouteResponse>> {
    let prompt = request.validate().map_err(AppError::InvalidRequest)?;
    let client_ip = request
        .ipv6
        .as_deref()
        .filter(|ip| !ip.trim().is_empty())
        .unwrap_or(DEFAULT_CLIENT_IPV6);

    let span = tracing::info_span!("plan_route", request_id = %Uuid::new_v4());

    async move {
        tracing::info!(prompt, "Route request received");

        let (intent, waypoints) = state.route_planner.plan(prompt, client_ip).await?;

        tracing::info!(
            intent = %intent.intent_type,
            waypoints = waypoints.waypoints.len(),
            "Route request completed"
        );
        Ok::<_, AppError>(Json(PlanRouteResponse { intent, waypoints }))
    }
    .instrument(span)
    .await
}
