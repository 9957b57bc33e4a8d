use crate::constants::{GOOGLE_MAPS_API_BASE_URL, MAX_ELEVATION_PATH_VERTICES};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, EnrichedPlace};
use crate::services::providers::{
    ElevationProvider, Geocoder, NearbyPlace, NearbyQuery, PlaceFilter, PlacesProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Client for the Google Maps web services used around route assembly:
/// geocoding, nearby search, text search and elevation.
#[derive(Clone)]
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleMapsClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GOOGLE_MAPS_API_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        GoogleMapsClient {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[tracing::instrument(skip(self, params), level = "debug")]
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", &self.api_key)])
            .send()
            .await
            .map_err(|e| AppError::MapsApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                endpoint,
                "Google Maps HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::MapsApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: GoogleResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::MapsApi(format!("Failed to parse response: {}", e)))?;

        body.into_results(endpoint)
    }

    pub async fn geocode_address(&self, address: &str) -> Result<Coordinates> {
        let results: Vec<GeocodeResult> = self
            .get("geocode/json", &[("address", address.to_string())])
            .await?;

        let first = results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Resolution(format!("Geocode failed for '{}'", address)))?;

        tracing::debug!(address, location = %first.geometry.location, "Geocoded address");
        Ok(first.geometry.location)
    }

    pub async fn nearby_search(&self, query: &NearbyQuery) -> Result<Vec<NearbyPlace>> {
        let mut params = vec![
            ("location", query.location.to_string()),
            ("radius", query.radius_m.to_string()),
        ];
        match &query.filter {
            PlaceFilter::Category(category) => params.push(("type", category.clone())),
            PlaceFilter::Keyword(keyword) => params.push(("keyword", keyword.clone())),
        }

        let results: Vec<PlaceResult> = self.get("place/nearbysearch/json", &params).await?;

        Ok(results
            .into_iter()
            .map(|place| NearbyPlace {
                place_id: place.place_id,
                name: place.name,
                location: place.geometry.location,
            })
            .collect())
    }

    pub async fn text_search_top(
        &self,
        query: &str,
        bias: Option<Coordinates>,
        radius_m: f64,
    ) -> Result<Vec<EnrichedPlace>> {
        let mut params = vec![("query", query.to_string())];
        if let Some(location) = bias {
            params.push(("location", location.to_string()));
            params.push(("radius", radius_m.to_string()));
        }

        let results: Vec<PlaceResult> = self.get("place/textsearch/json", &params).await?;

        Ok(results
            .into_iter()
            .take(1)
            .map(|place| EnrichedPlace {
                name: place.name,
                address: place.formatted_address,
                latitude: place.geometry.location.lat,
                longitude: place.geometry.location.lng,
            })
            .collect())
    }

    pub async fn elevation_samples(&self, path: &[Coordinates], samples: usize) -> Result<Vec<f64>> {
        if path.len() < 2 || samples < 2 {
            return Err(AppError::InvalidRequest(
                "Elevation along a path needs at least 2 points and 2 samples".to_string(),
            ));
        }

        let path_param = thin_path(path, MAX_ELEVATION_PATH_VERTICES)
            .iter()
            .map(Coordinates::to_string)
            .collect::<Vec<_>>()
            .join("|");

        let results: Vec<ElevationResult> = self
            .get(
                "elevation/json",
                &[("path", path_param), ("samples", samples.to_string())],
            )
            .await?;

        Ok(results.into_iter().map(|r| r.elevation).collect())
    }
}

#[async_trait]
impl Geocoder for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> Result<Coordinates> {
        self.geocode_address(address).await
    }
}

#[async_trait]
impl PlacesProvider for GoogleMapsClient {
    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<NearbyPlace>> {
        self.nearby_search(query).await
    }

    async fn text_search(
        &self,
        query: &str,
        bias: Option<Coordinates>,
        radius_m: f64,
    ) -> Result<Vec<EnrichedPlace>> {
        self.text_search_top(query, bias, radius_m).await
    }
}

#[async_trait]
impl ElevationProvider for GoogleMapsClient {
    async fn elevation_along_path(&self, path: &[Coordinates], samples: usize) -> Result<Vec<f64>> {
        self.elevation_samples(path, samples).await
    }
}

/// Evenly pick at most `max_vertices` points, always keeping both endpoints
fn thin_path(path: &[Coordinates], max_vertices: usize) -> Vec<Coordinates> {
    if path.len() <= max_vertices || max_vertices < 2 {
        return path.to_vec();
    }

    let last = path.len() - 1;
    (0..max_vertices)
        .map(|i| {
            let idx = ((i * last) as f64 / (max_vertices - 1) as f64).round() as usize;
            path[idx]
        })
        .collect()
}

// Google Maps API response types

#[derive(Debug, Deserialize)]
struct GoogleResponse<T> {
    status: String,
    #[serde(default = "Vec::new")]
    results: Vec<T>,
    #[serde(default)]
    error_message: Option<String>,
}

impl<T> GoogleResponse<T> {
    fn into_results(self, endpoint: &str) -> Result<Vec<T>> {
        match self.status.as_str() {
            "OK" => Ok(self.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            status => {
                tracing::warn!(endpoint, status, "Google Maps returned non-OK status");
                Err(AppError::MapsApi(format!(
                    "{} from {}: {}",
                    status,
                    endpoint,
                    self.error_message.as_deref().unwrap_or("no detail")
                )))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    place_id: String,
    name: String,
    #[serde(default)]
    formatted_address: Option<String>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct ElevationResult {
    elevation: f64,
}
