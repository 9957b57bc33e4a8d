use crate::constants::SUMMARY_ALWAYS_AVOID;
use crate::error::{AppError, Result};
use crate::models::{RouteIntent, RouteSummary, TransportMode, Waypoint};
use crate::services::providers::{DirectionsRequest, RoutingProvider};
use std::sync::Arc;

/// Encoded polyline and totals for an already assembled waypoint list
#[derive(Clone)]
pub struct RouteSummarizer {
    routing: Arc<dyn RoutingProvider>,
}

impl RouteSummarizer {
    pub fn new(routing: Arc<dyn RoutingProvider>) -> Self {
        Self { routing }
    }

    pub async fn summarize(
        &self,
        intent: &RouteIntent,
        waypoints: &[Waypoint],
        optimize: bool,
    ) -> Result<RouteSummary> {
        if waypoints.len() < 2 {
            return Err(AppError::InvalidRequest(
                "At least two waypoints (origin and destination) are required".to_string(),
            ));
        }

        let mode = intent.primary_mode(TransportMode::Driving)?;
        let request = DirectionsRequest::new(
            waypoints.iter().map(Waypoint::coordinates).collect(),
            mode,
        )
        .optimized(optimize)
        .avoiding(summary_avoid(intent.avoid()))
        .encoded();

        let route = self
            .routing
            .directions(&request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NoRouteFound("route summary".to_string()))?;

        let polyline = route
            .encoded_polyline()
            .ok_or_else(|| {
                AppError::MalformedProviderResponse("route has no encoded polyline".to_string())
            })?
            .to_string();

        Ok(RouteSummary {
            polyline,
            total_distance_m: route.total_distance_m().round() as u64,
            total_duration_s: route.total_duration_s().round() as u64,
        })
    }
}

/// The intent's avoid list with ferries always included
fn summary_avoid(avoid: &[String]) -> Vec<String> {
    let mut list = avoid.to_vec();
    if !list.iter().any(|a| a == SUMMARY_ALWAYS_AVOID) {
        list.push(SUMMARY_ALWAYS_AVOID.to_string());
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ferries_always_avoided() {
        assert_eq!(summary_avoid(&[]), vec!["ferries".to_string()]);
        assert_eq!(
            summary_avoid(&["tolls".to_string()]),
            vec!["tolls".to_string(), "ferries".to_string()]
        );
        assert_eq!(
            summary_avoid(&["ferries".to_string(), "tolls".to_string()]),
            vec!["ferries".to_string(), "tolls".to_string()]
        );
    }
}
