use async_trait::async_trait;
use routeweaver::error::{AppError, Result};
use routeweaver::models::{Coordinates, EnrichedPlace, HintCoordinates, LocationHint};
use routeweaver::services::planner::{CompletionProvider, Prompt};
use routeweaver::services::providers::{
    DirectionsRequest, DirectionsRoute, ElevationProvider, Geocoder, GeometryFormat, NearbyPlace,
    NearbyQuery, PlacesProvider, Providers, RouteGeometry, RouteLeg, RoutingProvider,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

/// Leg length reported by [`FakeRouting`] for unscripted requests
#[allow(dead_code)]
pub const FAKE_LEG_DISTANCE_M: f64 = 1000.0;
#[allow(dead_code)]
pub const FAKE_LEG_DURATION_S: f64 = 600.0;

/// Check if real API tests should be skipped
#[allow(dead_code)]
pub fn should_skip_real_api_tests() -> bool {
    std::env::var("SKIP_REAL_API_TESTS").is_ok()
}

#[allow(dead_code)]
pub fn coords(lat: f64, lng: f64) -> Coordinates {
    Coordinates::new(lat, lng).unwrap()
}

#[allow(dead_code)]
pub fn san_francisco_hint() -> LocationHint {
    LocationHint {
        country: "US".to_string(),
        region: Some("California".to_string()),
        city: Some("San Francisco".to_string()),
        postal_code: None,
        coordinates: Some(HintCoordinates {
            latitude: 37.7749,
            longitude: -122.4194,
        }),
    }
}

/// Routing fake: scripted responses first, then one straight route through
/// the requested points with fixed-length legs.
#[derive(Default)]
pub struct FakeRouting {
    scripted: Mutex<VecDeque<Vec<DirectionsRoute>>>,
    pub requests: Mutex<Vec<DirectionsRequest>>,
}

#[allow(dead_code)]
impl FakeRouting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, routes: Vec<DirectionsRoute>) {
        self.scripted.lock().unwrap().push_back(routes);
    }

    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[allow(dead_code)]
pub fn path_route(points: Vec<Coordinates>) -> DirectionsRoute {
    DirectionsRoute {
        legs: vec![RouteLeg {
            distance_meters: FAKE_LEG_DISTANCE_M,
            duration_seconds: FAKE_LEG_DURATION_S,
        }],
        snapped_waypoints: vec![points[0], points[points.len() - 1]],
        geometry: RouteGeometry::Coordinates(points),
    }
}

#[async_trait]
impl RoutingProvider for FakeRouting {
    async fn directions(&self, request: &DirectionsRequest) -> Result<Vec<DirectionsRoute>> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(routes) = self.scripted.lock().unwrap().pop_front() {
            return Ok(routes);
        }

        let geometry = match request.geometry {
            GeometryFormat::Coordinates => RouteGeometry::Coordinates(request.waypoints.clone()),
            GeometryFormat::EncodedPolyline => RouteGeometry::Encoded("_fake~polyline".to_string()),
        };
        let legs = request
            .waypoints
            .windows(2)
            .map(|_| RouteLeg {
                distance_meters: FAKE_LEG_DISTANCE_M,
                duration_seconds: FAKE_LEG_DURATION_S,
            })
            .collect();

        Ok(vec![DirectionsRoute {
            geometry,
            legs,
            snapped_waypoints: request.waypoints.clone(),
        }])
    }
}

/// Geocoder over a fixed address book; unknown addresses fail to resolve
#[derive(Default)]
pub struct FakeGeocoder {
    known: HashMap<String, Coordinates>,
    pub queries: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeGeocoder {
    pub fn with(mut self, address: &str, lat: f64, lng: f64) -> Self {
        self.known.insert(address.to_string(), coords(lat, lng));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinates> {
        self.queries.lock().unwrap().push(address.to_string());
        self.known
            .get(address)
            .copied()
            .ok_or_else(|| AppError::Resolution(format!("Geocode failed for '{}'", address)))
    }
}

type NearbyFn = Box<dyn Fn(&NearbyQuery) -> Vec<NearbyPlace> + Send + Sync>;

/// Places fake: nearby answers come from a closure, text search from a table
pub struct FakePlaces {
    nearby: NearbyFn,
    text: HashMap<String, Vec<EnrichedPlace>>,
    failing_text: HashSet<String>,
    pub nearby_queries: Mutex<Vec<NearbyQuery>>,
    pub text_queries: Mutex<Vec<(String, Option<Coordinates>, f64)>>,
}

impl Default for FakePlaces {
    fn default() -> Self {
        FakePlaces {
            nearby: Box::new(|_| Vec::new()),
            text: HashMap::new(),
            failing_text: HashSet::new(),
            nearby_queries: Mutex::new(Vec::new()),
            text_queries: Mutex::new(Vec::new()),
        }
    }
}

#[allow(dead_code)]
impl FakePlaces {
    pub fn with_nearby<F>(mut self, f: F) -> Self
    where
        F: Fn(&NearbyQuery) -> Vec<NearbyPlace> + Send + Sync + 'static,
    {
        self.nearby = Box::new(f);
        self
    }

    pub fn with_text(mut self, query: &str, name: &str, lat: f64, lng: f64) -> Self {
        self.text.insert(
            query.to_string(),
            vec![EnrichedPlace {
                name: name.to_string(),
                address: None,
                latitude: lat,
                longitude: lng,
            }],
        );
        self
    }

    pub fn failing_text(mut self, query: &str) -> Self {
        self.failing_text.insert(query.to_string());
        self
    }

    pub fn nearby_queries(&self) -> Vec<NearbyQuery> {
        self.nearby_queries.lock().unwrap().clone()
    }

    pub fn text_queries(&self) -> Vec<(String, Option<Coordinates>, f64)> {
        self.text_queries.lock().unwrap().clone()
    }
}

#[allow(dead_code)]
pub fn place(id: &str, name: &str, lat: f64, lng: f64) -> NearbyPlace {
    NearbyPlace {
        place_id: id.to_string(),
        name: name.to_string(),
        location: coords(lat, lng),
    }
}

#[async_trait]
impl PlacesProvider for FakePlaces {
    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<NearbyPlace>> {
        self.nearby_queries.lock().unwrap().push(query.clone());
        Ok((self.nearby)(query))
    }

    async fn text_search(
        &self,
        query: &str,
        bias: Option<Coordinates>,
        radius_m: f64,
    ) -> Result<Vec<EnrichedPlace>> {
        self.text_queries
            .lock()
            .unwrap()
            .push((query.to_string(), bias, radius_m));

        if self.failing_text.contains(query) {
            return Err(AppError::MapsApi("OVER_QUERY_LIMIT".to_string()));
        }
        Ok(self.text.get(query).cloned().unwrap_or_default())
    }
}

type ElevationFn = Box<dyn Fn(&[Coordinates], usize) -> Vec<f64> + Send + Sync>;

/// Elevation fake; flat terrain unless told otherwise
pub struct FakeElevation {
    profile: ElevationFn,
    pub requests: Mutex<Vec<(usize, usize)>>,
}

impl Default for FakeElevation {
    fn default() -> Self {
        FakeElevation {
            profile: Box::new(|_, samples| vec![0.0; samples]),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[allow(dead_code)]
impl FakeElevation {
    pub fn with_profile<F>(profile: F) -> Self
    where
        F: Fn(&[Coordinates], usize) -> Vec<f64> + Send + Sync + 'static,
    {
        FakeElevation {
            profile: Box::new(profile),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// (path length, samples) per request
    pub fn requests(&self) -> Vec<(usize, usize)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ElevationProvider for FakeElevation {
    async fn elevation_along_path(&self, path: &[Coordinates], samples: usize) -> Result<Vec<f64>> {
        self.requests.lock().unwrap().push((path.len(), samples));
        Ok((self.profile)(path, samples))
    }
}

type CompletionFn = Box<dyn Fn(&Prompt) -> String + Send + Sync>;

/// Completion fake answering from a closure
pub struct ScriptedCompletion {
    respond: CompletionFn,
    pub prompts: Mutex<Vec<Prompt>>,
}

#[allow(dead_code)]
impl ScriptedCompletion {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&Prompt) -> String + Send + Sync + 'static,
    {
        ScriptedCompletion {
            respond: Box::new(respond),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedCompletion {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.clone());
        Ok((self.respond)(prompt))
    }

    fn kind(&self) -> &'static str {
        "scripted"
    }
}

/// Typed handles on the fakes behind a [`Providers`] bundle
pub struct Fakes {
    pub routing: Arc<FakeRouting>,
    pub geocoder: Arc<FakeGeocoder>,
    pub places: Arc<FakePlaces>,
    pub elevation: Arc<FakeElevation>,
    pub completion: Arc<dyn CompletionProvider>,
}

#[allow(dead_code)]
impl Fakes {
    pub fn new(geocoder: FakeGeocoder, places: FakePlaces, elevation: FakeElevation) -> Self {
        Fakes {
            routing: Arc::new(FakeRouting::new()),
            geocoder: Arc::new(geocoder),
            places: Arc::new(places),
            elevation: Arc::new(elevation),
            completion: Arc::new(routeweaver::services::planner::CannedCompletionProvider::new()),
        }
    }

    pub fn with_completion(mut self, completion: Arc<dyn CompletionProvider>) -> Self {
        self.completion = completion;
        self
    }

    pub fn providers(&self) -> Providers {
        Providers {
            routing: self.routing.clone(),
            geocoder: self.geocoder.clone(),
            places: self.places.clone(),
            elevation: self.elevation.clone(),
            completion: self.completion.clone(),
        }
    }
}
