use crate::config::RouteAssemblyConfig;
use crate::constants::{MET_KCAL_DIVISOR, MET_OXYGEN_ML_PER_KG_MIN};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, FitnessMetrics, RouteIntent, RoutePlan, TransportMode, Waypoint};
use crate::services::constraints::FitnessGoals;
use crate::services::planner::Planner;
use crate::services::providers::{
    DirectionsRequest, DirectionsRoute, Geocoder, PlacesProvider, Providers, RoutingProvider,
};
use std::sync::Arc;

/// Walking and cycling routes measured against step, distance and calorie goals
pub struct FitnessRouteAssembler {
    routing: Arc<dyn RoutingProvider>,
    geocoder: Arc<dyn Geocoder>,
    places: Arc<dyn PlacesProvider>,
    planner: Planner,
    config: RouteAssemblyConfig,
}

/// Base route before goal checks: the route found and the waypoints it visits
struct BaseRoute {
    route: DirectionsRoute,
    waypoints: Vec<Waypoint>,
}

impl FitnessRouteAssembler {
    pub fn new(providers: &Providers, planner: Planner, config: RouteAssemblyConfig) -> Self {
        Self {
            routing: providers.routing.clone(),
            geocoder: providers.geocoder.clone(),
            places: providers.places.clone(),
            planner,
            config,
        }
    }

    pub async fn assemble(&self, intent: &RouteIntent) -> Result<RoutePlan> {
        self.assemble_for_weight(intent, self.config.default_weight_kg)
            .await
    }

    pub async fn assemble_for_weight(&self, intent: &RouteIntent, weight_kg: f64) -> Result<RoutePlan> {
        let mode = intent.primary_mode(TransportMode::Walking)?;
        let met = mode
            .met_value()
            .ok_or_else(|| AppError::UnsupportedMode(format!("no calorie estimate for {}", mode)))?;

        let goals = FitnessGoals::parse(&intent.constraints);
        let origin = intent.origin.as_str();
        let destination = intent.destination().unwrap_or(origin);

        let base = match goals.steps_loop_radius_m() {
            Some(radius_m) if destination == origin => {
                self.steps_loop(origin, radius_m, mode).await?
            }
            _ => self.point_to_point(intent, origin, destination, mode).await?,
        };

        let distance_m = base.route.total_distance_m();
        let duration_s = base.route.total_duration_s();
        let calories = estimate_calories(duration_s, met, weight_kg);
        let metrics = FitnessMetrics {
            total_distance_m: distance_m.round() as u64,
            total_duration_s: duration_s.round() as u64,
            calories_burned: (calories * 100.0).round() / 100.0,
        };

        tracing::info!(
            mode = %mode,
            distance_m,
            duration_s,
            calories,
            "Measured fitness route"
        );

        let mut waypoints = base.waypoints;
        if goals.is_unmet(distance_m, calories) {
            let extras = self
                .planner
                .suggest_fitness_waypoints(&waypoints, &intent.constraints, mode, &metrics)
                .await?;
            tracing::info!(extras = extras.len(), "Fitness goals unmet, appending suggestions");
            waypoints.extend(extras);
        }

        Ok(RoutePlan {
            waypoints,
            metrics: Some(metrics),
        })
    }

    /// Origin, out to a nearby park or trail, and back
    async fn steps_loop(&self, origin: &str, radius_m: f64, mode: TransportMode) -> Result<BaseRoute> {
        let home = self.geocoder.geocode(origin).await?;
        let turnaround = self
            .places
            .text_search(&self.config.steps_loop_query, Some(home), radius_m)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::Resolution(format!(
                    "No '{}' found within {:.0} m of '{}'",
                    self.config.steps_loop_query, radius_m, origin
                ))
            })?;
        let turnaround = Waypoint::new(turnaround.name, turnaround.latitude, turnaround.longitude);

        let request = DirectionsRequest::new(vec![home, turnaround.coordinates(), home], mode)
            .optimized(true);
        let route = self.first_route(&request).await?;

        let start = Waypoint::at(origin, route.start_location().unwrap_or(home));
        Ok(BaseRoute {
            route,
            waypoints: vec![start.clone(), turnaround, start],
        })
    }

    /// Origin through enriched stops to the destination
    async fn point_to_point(
        &self,
        intent: &RouteIntent,
        origin: &str,
        destination: &str,
        mode: TransportMode,
    ) -> Result<BaseRoute> {
        let stops: Vec<Waypoint> = intent
            .stops()
            .iter()
            .filter_map(|stop| stop.enriched())
            .map(|place| Waypoint::new(place.name.clone(), place.latitude, place.longitude))
            .collect();

        let start = self.geocoder.geocode(origin).await?;
        let end = self.geocoder.geocode(destination).await?;

        let mut coordinates: Vec<Coordinates> = Vec::with_capacity(stops.len() + 2);
        coordinates.push(start);
        coordinates.extend(stops.iter().map(Waypoint::coordinates));
        coordinates.push(end);

        let request = DirectionsRequest::new(coordinates, mode).optimized(intent.optimize());
        let route = self.first_route(&request).await?;

        let mut waypoints = Vec::with_capacity(stops.len() + 2);
        waypoints.push(Waypoint::at(origin, route.start_location().unwrap_or(start)));
        waypoints.extend(stops);
        waypoints.push(Waypoint::at(destination, route.end_location().unwrap_or(end)));

        Ok(BaseRoute { route, waypoints })
    }

    async fn first_route(&self, request: &DirectionsRequest) -> Result<DirectionsRoute> {
        self.routing
            .directions(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NoRouteFound("fitness route".to_string()))
    }
}

/// kcal = MET x 3.5 x weight / 200 per minute
pub fn estimate_calories(duration_s: f64, met: f64, weight_kg: f64) -> f64 {
    let minutes = duration_s / 60.0;
    met * MET_OXYGEN_ML_PER_KG_MIN * weight_kg / MET_KCAL_DIVISOR * minutes
}
