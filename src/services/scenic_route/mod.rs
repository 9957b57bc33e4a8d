mod segment_scoring;
mod segment_selection;
mod waypoint_extraction;

pub use segment_scoring::{total_variation, SegmentScorer};
pub use segment_selection::SegmentSelector;
pub use waypoint_extraction::WaypointExtractor;

use crate::config::RouteAssemblyConfig;
use crate::error::{AppError, Result};
use crate::models::{CandidatePath, Leg, RouteIntent, RoutePlan, TransportMode, Waypoint};
use crate::services::providers::{DirectionsRequest, Providers, RoutingProvider};
use crate::services::stop_resolver::StopResolver;
use std::sync::Arc;

/// Builds scenic routes: origin, stops and destination joined by the most
/// scenic alternative of each leg, with places of interest along the way.
pub struct ScenicRouteAssembler {
    routing: Arc<dyn RoutingProvider>,
    stops: StopResolver,
    selector: SegmentSelector,
    extractor: WaypointExtractor,
}

impl ScenicRouteAssembler {
    pub fn new(providers: &Providers, config: RouteAssemblyConfig) -> Self {
        let scorer = SegmentScorer::new(
            providers.places.clone(),
            providers.elevation.clone(),
            config.clone(),
        );

        Self {
            routing: providers.routing.clone(),
            stops: StopResolver::new(providers.geocoder.clone()),
            selector: SegmentSelector::new(scorer),
            extractor: WaypointExtractor::new(providers.places.clone(), config),
        }
    }

    /// Any resolution or routing failure aborts the whole route
    pub async fn assemble(&self, intent: &RouteIntent) -> Result<RoutePlan> {
        let mode = intent.primary_mode(TransportMode::Driving)?;
        let key_points = self.key_points(intent).await?;

        tracing::info!(
            origin = %intent.origin,
            key_points = key_points.len(),
            mode = %mode,
            "Assembling scenic route"
        );

        let mut waypoints = Vec::new();
        waypoints.extend(key_points.first().cloned());

        for leg in Leg::between(&key_points) {
            let alternatives = self.alternatives(&leg, mode, intent.optimize()).await?;
            let best = self.selector.select_best(alternatives).await?;
            let scenic = self.extractor.extract(&best).await?;

            tracing::debug!(
                from = %leg.start.name,
                to = %leg.end.name,
                scenic = scenic.len(),
                "Resolved scenic leg"
            );
            waypoints.extend(scenic);
            waypoints.push(leg.end);
        }

        Ok(RoutePlan::waypoints(waypoints))
    }

    /// Origin, intermediate stops, destination
    async fn key_points(&self, intent: &RouteIntent) -> Result<Vec<Waypoint>> {
        let mut points = vec![self.stops.resolve_named(&intent.origin).await?];

        let mut stops = intent.stops().to_vec();
        let promoted = match (intent.destination(), stops.pop()) {
            (None, Some(last)) => Some(last),
            (_, last) => {
                stops.extend(last);
                None
            }
        };

        for stop in &stops {
            points.push(self.stops.resolve(stop).await?);
        }

        let destination = match promoted {
            Some(stop) => self.stops.resolve(&stop).await?,
            None => {
                let name = match (intent.destination(), intent.hint_city()) {
                    (Some(destination), _) => destination.to_string(),
                    (None, Some(city)) => format!("Nearby {}", city),
                    (None, None) => intent.origin.clone(),
                };
                self.stops.resolve_named(&name).await?
            }
        };
        points.push(destination);

        Ok(points)
    }

    async fn alternatives(
        &self,
        leg: &Leg,
        mode: TransportMode,
        optimize: bool,
    ) -> Result<Vec<CandidatePath>> {
        let request =
            DirectionsRequest::new(vec![leg.start.coordinates(), leg.end.coordinates()], mode)
                .with_alternatives()
                .optimized(optimize);

        let paths: Vec<CandidatePath> = self
            .routing
            .directions(&request)
            .await?
            .iter()
            .filter_map(|route| route.path())
            .collect();

        if paths.is_empty() {
            return Err(AppError::NoRouteFound(format!(
                "{} to {}",
                leg.start.name, leg.end.name
            )));
        }
        Ok(paths)
    }
}
