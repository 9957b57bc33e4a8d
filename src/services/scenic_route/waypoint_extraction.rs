use crate::config::RouteAssemblyConfig;
use crate::constants::MAX_SCENIC_WAYPOINTS_PER_LEG;
use crate::error::Result;
use crate::models::{CandidatePath, Waypoint};
use crate::services::providers::{NearbyQuery, PlaceFilter, PlacesProvider};
use std::collections::HashSet;
use std::sync::Arc;

/// Walks a path and collects the top scenic place near each sample
pub struct WaypointExtractor {
    places: Arc<dyn PlacesProvider>,
    config: RouteAssemblyConfig,
}

impl WaypointExtractor {
    pub fn new(places: Arc<dyn PlacesProvider>, config: RouteAssemblyConfig) -> Self {
        Self { places, config }
    }

    /// Stops querying once `max_scenic_waypoints` places are collected
    pub async fn extract(&self, path: &CandidatePath) -> Result<Vec<Waypoint>> {
        let cap = self.config.max_scenic_waypoints.min(MAX_SCENIC_WAYPOINTS_PER_LEG);
        let filter = PlaceFilter::Keyword(self.config.scenic_keyword.clone());
        let mut seen_place_ids = HashSet::new();
        let mut waypoints = Vec::new();

        if cap == 0 {
            return Ok(waypoints);
        }

        for sample in path.samples(self.config.sample_divisions) {
            let query = NearbyQuery {
                location: *sample,
                radius_m: self.config.nearby_radius_m,
                filter: filter.clone(),
            };

            let Some(top) = self.places.nearby(&query).await?.into_iter().next() else {
                continue;
            };
            if !seen_place_ids.insert(top.place_id) {
                continue;
            }

            waypoints.push(Waypoint::at(top.name, top.location));
            if waypoints.len() >= cap {
                break;
            }
        }

        tracing::debug!(count = waypoints.len(), "Extracted scenic waypoints");
        Ok(waypoints)
    }
}
