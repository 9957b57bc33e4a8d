use crate::constants::*;
use crate::models::{HintCoordinates, LocationHint};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mapbox_api_key: String,
    /// When set, routing goes through this base URL with bearer auth (proxy mode)
    pub mapbox_base_url: Option<String>,
    pub google_maps_api_key: String,
    pub google_maps_base_url: Option<String>,
    /// Absent key selects the canned completion provider
    pub planner_api_key: Option<String>,
    pub planner_base_url: String,
    pub planner_model: String,
    pub default_location_hint: LocationHint,
    pub route_assembly: RouteAssemblyConfig,
}

#[derive(Debug, Clone)]
pub struct RouteAssemblyConfig {
    /// Paths are sampled every `len / sample_divisions` points (minimum stride 1)
    pub sample_divisions: usize,

    /// Radius (metres) of every places-nearby query issued along a path
    pub nearby_radius_m: f64,

    /// Place category counted for the POI density sub-score
    pub density_category: String,

    /// Keyword filter for scenic waypoint extraction
    pub scenic_keyword: String,

    /// Cap on extracted scenic waypoints per leg, never above 5
    pub max_scenic_waypoints: usize,

    /// Weight of elevation variation in the composite scenic score
    pub elevation_weight: f64,

    /// Maximum elevation samples requested per path
    pub elevation_samples: usize,

    /// Body weight assumed for calorie estimates when none is given
    pub default_weight_kg: f64,

    /// Text-search query used to find the turnaround point of a steps loop
    pub steps_loop_query: String,

    /// Radius (metres) used when enriching stops with text search
    pub stop_search_radius_m: f64,
}

impl Default for RouteAssemblyConfig {
    fn default() -> Self {
        Self {
            sample_divisions: 10,
            nearby_radius_m: 500.0,
            density_category: "park".to_string(),
            scenic_keyword: "park|viewpoint".to_string(),
            max_scenic_waypoints: 5,
            elevation_weight: 0.5,
            elevation_samples: 10,
            default_weight_kg: 70.0,
            steps_loop_query: "park|trail".to_string(),
            stop_search_radius_m: 5000.0,
        }
    }
}

impl RouteAssemblyConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            sample_divisions: env::var("SCENIC_SAMPLE_DIVISIONS")
                .unwrap_or_else(|_| defaults.sample_divisions.to_string())
                .parse()
                .map_err(|_| "Invalid SCENIC_SAMPLE_DIVISIONS")?,

            nearby_radius_m: env::var("SCENIC_NEARBY_RADIUS_M")
                .unwrap_or_else(|_| defaults.nearby_radius_m.to_string())
                .parse()
                .map_err(|_| "Invalid SCENIC_NEARBY_RADIUS_M")?,

            density_category: env::var("SCENIC_DENSITY_CATEGORY")
                .unwrap_or(defaults.density_category),

            scenic_keyword: env::var("SCENIC_KEYWORD").unwrap_or(defaults.scenic_keyword),

            max_scenic_waypoints: env::var("SCENIC_MAX_WAYPOINTS")
                .unwrap_or_else(|_| defaults.max_scenic_waypoints.to_string())
                .parse()
                .map_err(|_| "Invalid SCENIC_MAX_WAYPOINTS")?,

            elevation_weight: env::var("SCENIC_ELEVATION_WEIGHT")
                .unwrap_or_else(|_| defaults.elevation_weight.to_string())
                .parse()
                .map_err(|_| "Invalid SCENIC_ELEVATION_WEIGHT")?,

            elevation_samples: env::var("SCENIC_ELEVATION_SAMPLES")
                .unwrap_or_else(|_| defaults.elevation_samples.to_string())
                .parse()
                .map_err(|_| "Invalid SCENIC_ELEVATION_SAMPLES")?,

            default_weight_kg: env::var("FITNESS_DEFAULT_WEIGHT_KG")
                .unwrap_or_else(|_| defaults.default_weight_kg.to_string())
                .parse()
                .map_err(|_| "Invalid FITNESS_DEFAULT_WEIGHT_KG")?,

            steps_loop_query: env::var("FITNESS_STEPS_LOOP_QUERY")
                .unwrap_or(defaults.steps_loop_query),

            stop_search_radius_m: env::var("STOP_SEARCH_RADIUS_M")
                .unwrap_or_else(|_| defaults.stop_search_radius_m.to_string())
                .parse()
                .map_err(|_| "Invalid STOP_SEARCH_RADIUS_M")?,
        };

        if config.sample_divisions == 0 {
            return Err("SCENIC_SAMPLE_DIVISIONS must be at least 1".to_string());
        }
        if config.nearby_radius_m <= 0.0 || config.nearby_radius_m > 50_000.0 {
            return Err("SCENIC_NEARBY_RADIUS_M must be between 0 and 50000 meters".to_string());
        }
        if config.max_scenic_waypoints > MAX_SCENIC_WAYPOINTS_PER_LEG {
            return Err(format!(
                "SCENIC_MAX_WAYPOINTS must be at most {}",
                MAX_SCENIC_WAYPOINTS_PER_LEG
            ));
        }
        if config.elevation_weight < 0.0 || !config.elevation_weight.is_finite() {
            return Err("SCENIC_ELEVATION_WEIGHT must be zero or positive".to_string());
        }
        if config.default_weight_kg <= 0.0 {
            return Err("FITNESS_DEFAULT_WEIGHT_KG must be positive".to_string());
        }

        Ok(config)
    }
}

fn location_hint_from_env() -> Result<LocationHint, String> {
    let latitude: f64 = env::var("LOCATION_HINT_LAT")
        .unwrap_or_else(|_| "37.7749".to_string())
        .parse()
        .map_err(|_| "Invalid LOCATION_HINT_LAT")?;
    let longitude: f64 = env::var("LOCATION_HINT_LNG")
        .unwrap_or_else(|_| "-122.4194".to_string())
        .parse()
        .map_err(|_| "Invalid LOCATION_HINT_LNG")?;

    Ok(LocationHint {
        country: env::var("LOCATION_HINT_COUNTRY").unwrap_or_else(|_| "US".to_string()),
        region: Some(env::var("LOCATION_HINT_REGION").unwrap_or_else(|_| "California".to_string())),
        city: Some(env::var("LOCATION_HINT_CITY").unwrap_or_else(|_| "San Francisco".to_string())),
        postal_code: env::var("LOCATION_HINT_POSTAL_CODE").ok(),
        coordinates: Some(HintCoordinates {
            latitude,
            longitude,
        }),
    })
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            mapbox_api_key: env::var("MAPBOX_API_KEY").map_err(|_| "MAPBOX_API_KEY must be set")?,
            mapbox_base_url: env::var("MAPBOX_BASE_URL").ok(),
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")
                .map_err(|_| "GOOGLE_MAPS_API_KEY must be set")?,
            google_maps_base_url: env::var("GOOGLE_MAPS_BASE_URL").ok(),
            planner_api_key: env::var("PLANNER_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            planner_base_url: env::var("PLANNER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PLANNER_BASE_URL.to_string()),
            planner_model: env::var("PLANNER_MODEL")
                .unwrap_or_else(|_| DEFAULT_PLANNER_MODEL.to_string()),
            default_location_hint: location_hint_from_env()?,
            route_assembly: RouteAssemblyConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
