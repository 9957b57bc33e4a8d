//! Seams to the external services the route assemblers are built on.
//!
//! Every call is awaited by its caller before the next one is issued; no
//! implementation may assume concurrent use within a request.

use crate::error::Result;
use crate::models::{CandidatePath, Coordinates, EnrichedPlace, TransportMode};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryFormat {
    /// Decoded coordinates, used for scoring and sampling
    #[default]
    Coordinates,
    /// Opaque encoded polyline, passed through to clients
    EncodedPolyline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    /// Origin, intermediate points, destination
    pub waypoints: Vec<Coordinates>,
    pub mode: TransportMode,
    pub alternatives: bool,
    pub optimize: bool,
    pub avoid: Vec<String>,
    pub geometry: GeometryFormat,
}

impl DirectionsRequest {
    pub fn new(waypoints: Vec<Coordinates>, mode: TransportMode) -> Self {
        DirectionsRequest {
            waypoints,
            mode,
            alternatives: false,
            optimize: false,
            avoid: Vec::new(),
            geometry: GeometryFormat::Coordinates,
        }
    }

    pub fn with_alternatives(mut self) -> Self {
        self.alternatives = true;
        self
    }

    pub fn optimized(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    pub fn avoiding(mut self, avoid: Vec<String>) -> Self {
        self.avoid = avoid;
        self
    }

    pub fn encoded(mut self) -> Self {
        self.geometry = GeometryFormat::EncodedPolyline;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteGeometry {
    Coordinates(Vec<Coordinates>),
    Encoded(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRoute {
    pub geometry: RouteGeometry,
    pub legs: Vec<RouteLeg>,
    /// Request waypoints as snapped onto the road network, in request order
    pub snapped_waypoints: Vec<Coordinates>,
}

impl DirectionsRoute {
    pub fn total_distance_m(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_meters).sum()
    }

    pub fn total_duration_s(&self) -> f64 {
        self.legs.iter().map(|leg| leg.duration_seconds).sum()
    }

    /// Decoded geometry, if the route was requested with coordinates
    pub fn path(&self) -> Option<CandidatePath> {
        match &self.geometry {
            RouteGeometry::Coordinates(points) => Some(CandidatePath::new(points.clone())),
            RouteGeometry::Encoded(_) => None,
        }
    }

    pub fn encoded_polyline(&self) -> Option<&str> {
        match &self.geometry {
            RouteGeometry::Encoded(polyline) => Some(polyline),
            RouteGeometry::Coordinates(_) => None,
        }
    }

    pub fn start_location(&self) -> Option<Coordinates> {
        self.snapped_waypoints.first().copied()
    }

    pub fn end_location(&self) -> Option<Coordinates> {
        self.snapped_waypoints.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceFilter {
    /// Provider place type, e.g. `park`
    Category(String),
    /// Free keyword filter, e.g. `park|viewpoint`
    Keyword(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub location: Coordinates,
    pub radius_m: f64,
    pub filter: PlaceFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyPlace {
    pub place_id: String,
    pub name: String,
    pub location: Coordinates,
}

#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Routes for the request, best first. Never returns an empty list.
    async fn directions(&self, request: &DirectionsRequest) -> Result<Vec<DirectionsRoute>>;
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Coordinates>;
}

#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Places near a point, in provider relevance order
    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<NearbyPlace>>;

    /// Top text-search hit (at most one)
    async fn text_search(
        &self,
        query: &str,
        bias: Option<Coordinates>,
        radius_m: f64,
    ) -> Result<Vec<EnrichedPlace>>;
}

#[async_trait]
pub trait ElevationProvider: Send + Sync {
    /// `samples` elevations (metres) evenly spaced along `path`, in path order
    async fn elevation_along_path(&self, path: &[Coordinates], samples: usize) -> Result<Vec<f64>>;
}

/// The external services one planning request may touch
#[derive(Clone)]
pub struct Providers {
    pub routing: Arc<dyn RoutingProvider>,
    pub geocoder: Arc<dyn Geocoder>,
    pub places: Arc<dyn PlacesProvider>,
    pub elevation: Arc<dyn ElevationProvider>,
    pub completion: Arc<dyn super::planner::CompletionProvider>,
}
