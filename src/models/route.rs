use crate::error::AppError;
use crate::models::{Coordinates, RouteIntent, Waypoint};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TransportMode {
    /// Returns the Mapbox profile name for this transport mode
    pub fn mapbox_profile(&self) -> Option<&'static str> {
        match self {
            TransportMode::Driving => Some("driving"),
            TransportMode::Walking => Some("walking"),
            TransportMode::Bicycling => Some("cycling"),
            TransportMode::Transit => None,
        }
    }

    /// Mapbox `exclude` classes the profile accepts
    pub fn supported_exclusions(&self) -> &'static [&'static str] {
        match self {
            TransportMode::Driving => &["toll", "motorway", "ferry"],
            TransportMode::Bicycling => &["ferry"],
            TransportMode::Walking | TransportMode::Transit => &[],
        }
    }

    /// Metabolic equivalent, for modes with a calorie estimate
    pub fn met_value(&self) -> Option<f64> {
        match self {
            TransportMode::Walking => Some(crate::constants::MET_WALKING),
            TransportMode::Bicycling => Some(crate::constants::MET_BICYCLING),
            TransportMode::Driving | TransportMode::Transit => None,
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Driving => write!(f, "driving"),
            TransportMode::Walking => write!(f, "walking"),
            TransportMode::Bicycling => write!(f, "bicycling"),
            TransportMode::Transit => write!(f, "transit"),
        }
    }
}

impl FromStr for TransportMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" | "drive" | "car" => Ok(TransportMode::Driving),
            "walking" | "walk" => Ok(TransportMode::Walking),
            "bicycling" | "bike" | "cycling" | "bicycle" => Ok(TransportMode::Bicycling),
            "transit" => Ok(TransportMode::Transit),
            _ => Err(AppError::UnsupportedMode(format!("'{}'", s))),
        }
    }
}

/// One alternative geometry for a leg, as returned by the routing provider
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandidatePath {
    points: Vec<Coordinates>,
}

impl CandidatePath {
    pub fn new(points: Vec<Coordinates>) -> Self {
        CandidatePath { points }
    }

    pub fn points(&self) -> &[Coordinates] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Step between sampled points: `len / divisions`, never below 1
    pub fn sample_stride(&self, divisions: usize) -> usize {
        (self.points.len() / divisions.max(1)).max(1)
    }

    /// Every `sample_stride`-th point, starting with the first
    pub fn samples(&self, divisions: usize) -> impl Iterator<Item = &Coordinates> {
        self.points.iter().step_by(self.sample_stride(divisions))
    }
}

impl From<Vec<Coordinates>> for CandidatePath {
    fn from(points: Vec<Coordinates>) -> Self {
        CandidatePath::new(points)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPath {
    pub score: f64,
    pub path: CandidatePath,
}

/// One routable segment between consecutive key points
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub start: Waypoint,
    pub end: Waypoint,
}

impl Leg {
    /// Consecutive pairs of `key_points`, in travel order
    pub fn between(key_points: &[Waypoint]) -> Vec<Leg> {
        key_points
            .windows(2)
            .map(|pair| Leg {
                start: pair[0].clone(),
                end: pair[1].clone(),
            })
            .collect()
    }
}

/// Totals reported alongside fitness routes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FitnessMetrics {
    pub total_distance_m: u64,
    pub total_duration_s: u64,
    pub calories_burned: f64,
}

/// Ordered waypoints produced by one of the route assemblers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutePlan {
    pub waypoints: Vec<Waypoint>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<FitnessMetrics>,
}

impl RoutePlan {
    pub fn waypoints(waypoints: Vec<Waypoint>) -> Self {
        RoutePlan {
            waypoints,
            metrics: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteSummary {
    /// Encoded overview polyline for the full route
    pub polyline: String,
    pub total_distance_m: u64,
    pub total_duration_s: u64,
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub ipv6: Option<String>,
}

impl PlanRouteRequest {
    pub fn validate(&self) -> Result<&str, String> {
        self.prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| "Missing prompt".to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct PlanRouteResponse {
    pub intent: RouteIntent,
    pub waypoints: RoutePlan,
}

#[derive(Debug, Deserialize)]
pub struct RouteSummaryRequest {
    pub intent: RouteIntent,
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub optimize: bool,
}
