use crate::config::RouteAssemblyConfig;
use crate::constants::POI_DENSITY_LENGTH_DIVISOR;
use crate::error::Result;
use crate::models::CandidatePath;
use crate::services::providers::{ElevationProvider, NearbyQuery, PlaceFilter, PlacesProvider};
use std::sync::Arc;

/// Scenicness of one candidate path: POI density plus weighted elevation variation
pub struct SegmentScorer {
    places: Arc<dyn PlacesProvider>,
    elevation: Arc<dyn ElevationProvider>,
    config: RouteAssemblyConfig,
}

impl SegmentScorer {
    pub fn new(
        places: Arc<dyn PlacesProvider>,
        elevation: Arc<dyn ElevationProvider>,
        config: RouteAssemblyConfig,
    ) -> Self {
        Self {
            places,
            elevation,
            config,
        }
    }

    pub async fn score(&self, path: &CandidatePath) -> Result<f64> {
        let density = self.poi_density(path).await?;
        let variation = self.elevation_variation(path).await?;
        let score = density + self.config.elevation_weight * variation;

        tracing::debug!(
            points = path.len(),
            density,
            variation,
            score,
            "Scored candidate path"
        );
        Ok(score)
    }

    /// Places of the density category around each sample, per thousand path points
    async fn poi_density(&self, path: &CandidatePath) -> Result<f64> {
        let filter = PlaceFilter::Category(self.config.density_category.clone());
        let mut total = 0usize;

        for sample in path.samples(self.config.sample_divisions) {
            let query = NearbyQuery {
                location: *sample,
                radius_m: self.config.nearby_radius_m,
                filter: filter.clone(),
            };
            total += self.places.nearby(&query).await?.len();
        }

        let length_factor = (path.len() as f64 / POI_DENSITY_LENGTH_DIVISOR).max(1.0);
        Ok(total as f64 / length_factor)
    }

    /// Total variation of sampled elevations. Paths too short to sample score 0.
    async fn elevation_variation(&self, path: &CandidatePath) -> Result<f64> {
        let samples = path.len().min(self.config.elevation_samples);
        if samples < 2 {
            return Ok(0.0);
        }

        let elevations = self
            .elevation
            .elevation_along_path(path.points(), samples)
            .await?;
        Ok(total_variation(&elevations))
    }
}

/// Sum of absolute differences between consecutive values
pub fn total_variation(values: &[f64]) -> f64 {
    values.windows(2).map(|w| (w[1] - w[0]).abs()).sum()
}
