use crate::constants::{MAPBOX_API_BASE_URL, MAPBOX_MAX_WAYPOINTS, MAPBOX_OPTIMIZATION_MAX_WAYPOINTS};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, TransportMode};
use crate::services::providers::{
    DirectionsRequest, DirectionsRoute, GeometryFormat, RouteGeometry, RouteLeg, RoutingProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// How the client authenticates with the directions API.
#[derive(Clone, Debug)]
pub enum AuthMode {
    /// Current default: send `access_token` query param (direct Mapbox).
    DirectToken,
    /// Proxy mode: send `Authorization: Bearer` header.
    BearerHeader,
}

#[derive(Clone)]
pub struct MapboxClient {
    client: Client,
    api_key: String,
    base_url: String,
    auth_mode: AuthMode,
}

impl MapboxClient {
    pub fn new(api_key: String) -> Self {
        MapboxClient {
            client: Client::new(),
            api_key,
            base_url: MAPBOX_API_BASE_URL.to_string(),
            auth_mode: AuthMode::DirectToken,
        }
    }

    pub fn with_config(api_key: String, base_url: String, auth_mode: AuthMode) -> Self {
        MapboxClient {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_mode,
        }
    }

    /// Directions (or an optimized trip) through `request.waypoints`.
    /// Returns every route the API produced, best first.
    pub async fn get_directions(&self, request: &DirectionsRequest) -> Result<Vec<DirectionsRoute>> {
        let waypoints = &request.waypoints;
        if waypoints.len() < 2 {
            return Err(AppError::InvalidRequest(
                "At least 2 waypoints required".to_string(),
            ));
        }

        let profile = request.mode.mapbox_profile().ok_or_else(|| {
            AppError::UnsupportedMode(format!("{} has no routing profile", request.mode))
        })?;

        // Reordering only means something with two or more intermediate points
        let use_optimization = request.optimize && waypoints.len() > 3;
        let max_waypoints = if use_optimization {
            MAPBOX_OPTIMIZATION_MAX_WAYPOINTS
        } else {
            MAPBOX_MAX_WAYPOINTS
        };
        if waypoints.len() > max_waypoints {
            return Err(AppError::InvalidRequest(format!(
                "Maximum {} waypoints allowed",
                max_waypoints
            )));
        }

        // Format coordinates as "lng,lat;lng,lat;..."
        let coordinates_str = waypoints
            .iter()
            .map(Coordinates::to_lng_lat_param)
            .collect::<Vec<_>>()
            .join(";");

        let url = if use_optimization {
            format!(
                "{}/optimized-trips/v1/mapbox/{}/{}",
                self.base_url, profile, coordinates_str
            )
        } else {
            format!(
                "{}/directions/v5/mapbox/{}/{}",
                self.base_url, profile, coordinates_str
            )
        };

        tracing::debug!(
            waypoints = waypoints.len(),
            mode = %profile,
            alternatives = request.alternatives,
            optimized = use_optimization,
            "Mapbox API request: {} waypoints, profile {}",
            waypoints.len(), profile
        );

        let geometries = match request.geometry {
            GeometryFormat::Coordinates => "geojson",
            GeometryFormat::EncodedPolyline => "polyline",
        };

        let mut http_request = self
            .client
            .get(&url)
            .query(&[("geometries", geometries), ("overview", "full"), ("steps", "false")]);

        if use_optimization {
            http_request = http_request.query(&[
                ("source", "first"),
                ("destination", "last"),
                ("roundtrip", "false"),
            ]);
        } else {
            if request.alternatives {
                http_request = http_request.query(&[("alternatives", "true")]);
            }
            let exclusions = mapbox_exclusions(&request.avoid, request.mode);
            if !exclusions.is_empty() {
                http_request = http_request.query(&[("exclude", exclusions.join(","))]);
            }
        }

        match self.auth_mode {
            AuthMode::DirectToken => {
                http_request = http_request.query(&[("access_token", &self.api_key)]);
            }
            AuthMode::BearerHeader => {
                http_request = http_request.bearer_auth(&self.api_key);
            }
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| AppError::MapboxApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                waypoints = waypoints.len(),
                "Mapbox API HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::MapboxApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: MapboxApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::MapboxApi(format!("Failed to parse response: {}", e)))?;

        let routes = body.into_routes()?;
        if routes.is_empty() {
            tracing::warn!(
                waypoints = waypoints.len(),
                mode = %profile,
                "Mapbox returned 0 routes for {} waypoints ({})",
                waypoints.len(), profile
            );
            return Err(AppError::NoRouteFound(format!(
                "no {} route through {} waypoints",
                request.mode,
                waypoints.len()
            )));
        }

        tracing::debug!(
            routes = routes.len(),
            distance_km = %format!("{:.2}", routes[0].total_distance_m() / 1000.0),
            duration_min = %format!("{:.0}", routes[0].total_duration_s() / 60.0),
            "Mapbox response: {} route(s), best {:.2}km",
            routes.len(), routes[0].total_distance_m() / 1000.0
        );

        Ok(routes)
    }
}

#[async_trait]
impl RoutingProvider for MapboxClient {
    async fn directions(&self, request: &DirectionsRequest) -> Result<Vec<DirectionsRoute>> {
        self.get_directions(request).await
    }
}

/// Map free-form avoid features onto the `exclude` classes the profile accepts
fn mapbox_exclusions(avoid: &[String], mode: TransportMode) -> Vec<&'static str> {
    let supported = mode.supported_exclusions();
    let mut exclusions: Vec<&'static str> = Vec::new();

    for feature in avoid {
        let class = match feature.trim().to_lowercase().as_str() {
            "toll" | "tolls" => "toll",
            "highway" | "highways" | "motorway" | "motorways" => "motorway",
            "ferry" | "ferries" => "ferry",
            other => {
                tracing::debug!("Ignoring unknown avoid feature '{}'", other);
                continue;
            }
        };
        if supported.contains(&class) && !exclusions.contains(&class) {
            exclusions.push(class);
        }
    }

    exclusions
}

// Mapbox API response types

#[derive(Debug, Deserialize)]
struct MapboxApiResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    /// Directions API
    #[serde(default)]
    routes: Vec<MapboxRoute>,
    /// Optimization API
    #[serde(default)]
    trips: Vec<MapboxRoute>,
    #[serde(default)]
    waypoints: Vec<MapboxWaypoint>,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    geometry: MapboxGeometry,
    #[serde(default)]
    legs: Vec<MapboxLeg>,
}

#[derive(Debug, Deserialize)]
struct MapboxLeg {
    distance: f64, // meters
    duration: f64, // seconds
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MapboxGeometry {
    Encoded(String),
    GeoJson { coordinates: Vec<[f64; 2]> }, // [lng, lat] pairs
}

#[derive(Debug, Deserialize)]
struct MapboxWaypoint {
    location: [f64; 2],
}

impl MapboxApiResponse {
    fn into_routes(self) -> Result<Vec<DirectionsRoute>> {
        if self.code != "Ok" {
            let detail = self.message.unwrap_or_else(|| self.code.clone());
            return Err(match self.code.as_str() {
                "NoRoute" | "NoSegment" | "NoTrips" => AppError::NoRouteFound(detail),
                code => AppError::MapboxApi(format!("{}: {}", code, detail)),
            });
        }

        let snapped_waypoints: Vec<Coordinates> = self
            .waypoints
            .iter()
            .filter_map(|wp| Coordinates::from_lng_lat(wp.location).ok())
            .collect();

        let raw_routes = if self.trips.is_empty() {
            self.routes
        } else {
            self.trips
        };

        Ok(raw_routes
            .into_iter()
            .map(|route| DirectionsRoute {
                geometry: match route.geometry {
                    MapboxGeometry::Encoded(polyline) => RouteGeometry::Encoded(polyline),
                    MapboxGeometry::GeoJson { coordinates } => RouteGeometry::Coordinates(
                        coordinates
                            .into_iter()
                            .filter_map(|pair| Coordinates::from_lng_lat(pair).ok())
                            .collect(),
                    ),
                },
                legs: route
                    .legs
                    .iter()
                    .map(|leg| RouteLeg {
                        distance_meters: leg.distance,
                        duration_seconds: leg.duration,
                    })
                    .collect(),
                snapped_waypoints: snapped_waypoints.clone(),
            })
            .collect())
    }
}
