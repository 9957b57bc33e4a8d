pub mod health;
pub mod plan_route;
pub mod summary;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/route", post(plan_route::plan_route))
        .route("/api/route/summary", post(summary::route_summary))
        .route("/health", get(health::health_check))
        .with_state(state)
}
