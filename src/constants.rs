//! Stable application-wide constants.
//!
//! Values here are structural invariants, physiological coefficients, and
//! default fallbacks for env-var-based configuration. For the knobs that shape
//! scenic scoring and extraction, see
//! [`RouteAssemblyConfig`](crate::config::RouteAssemblyConfig) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "8000";

/// Client address assumed when a planning request carries none.
pub const DEFAULT_CLIENT_IPV6: &str = "2607:f140:6000:800e:384d:a5ee:7eb4:fa5e";

// --- Provider endpoints ---

pub const MAPBOX_API_BASE_URL: &str = "https://api.mapbox.com";
pub const GOOGLE_MAPS_API_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
pub const DEFAULT_PLANNER_BASE_URL: &str = "https://integrate.api.nvidia.com/v1";
pub const DEFAULT_PLANNER_MODEL: &str = "nvidia/llama3-8b-instruct";

/// Mapbox Directions accepts at most 25 coordinates per request.
pub const MAPBOX_MAX_WAYPOINTS: usize = 25;
/// Mapbox Optimization v1 accepts at most 12 coordinates per request.
pub const MAPBOX_OPTIMIZATION_MAX_WAYPOINTS: usize = 12;

/// Upper bound on vertices sent in an elevation-along-path request.
/// Longer paths are thinned (endpoints kept) so the query string stays
/// below the provider's URL length limit.
pub const MAX_ELEVATION_PATH_VERTICES: usize = 150;

// --- Scenic scoring ---

/// Path point count is divided by this before normalizing POI counts, so a
/// path with fewer points than this is never normalized down.
pub const POI_DENSITY_LENGTH_DIVISOR: f64 = 1000.0;

/// Hard ceiling on scenic waypoints extracted from a single leg.
pub const MAX_SCENIC_WAYPOINTS_PER_LEG: usize = 5;

// --- Fitness estimation ---

/// Average stride length used to turn a step goal into metres.
pub const METERS_PER_STEP: f64 = 0.8;
/// Metabolic equivalent for walking.
pub const MET_WALKING: f64 = 3.3;
/// Metabolic equivalent for bicycling.
pub const MET_BICYCLING: f64 = 6.0;
/// kcal/min = MET * 3.5 * weight_kg / 200
pub const MET_OXYGEN_ML_PER_KG_MIN: f64 = 3.5;
pub const MET_KCAL_DIVISOR: f64 = 200.0;

/// Extra waypoints the planner is asked for when fitness goals are unmet.
/// Only a hint in the prompt; every valid suggestion returned is appended.
pub const FITNESS_SUGGESTIONS_REQUESTED: usize = 3;

/// Feature always excluded from route summaries.
pub const SUMMARY_ALWAYS_AVOID: &str = "ferries";
