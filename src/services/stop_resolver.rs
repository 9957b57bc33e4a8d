use crate::error::Result;
use crate::models::{Stop, Waypoint};
use crate::services::providers::Geocoder;
use std::sync::Arc;

/// Turns named places and intent stops into coordinates
#[derive(Clone)]
pub struct StopResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl StopResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        StopResolver { geocoder }
    }

    /// First enriched search result if present, otherwise geocode the stop.
    /// The stop keeps its own name when geocoded.
    pub async fn resolve(&self, stop: &Stop) -> Result<Waypoint> {
        if let Some(place) = stop.enriched() {
            return Ok(Waypoint::new(
                place.name.clone(),
                place.latitude,
                place.longitude,
            ));
        }

        let location = self.geocoder.geocode(stop.geocode_query()).await?;
        Ok(Waypoint::at(stop.name.clone(), location))
    }

    pub async fn resolve_named(&self, name: &str) -> Result<Waypoint> {
        let location = self.geocoder.geocode(name).await?;
        Ok(Waypoint::at(name, location))
    }
}
