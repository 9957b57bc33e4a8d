pub mod coordinates;
pub mod intent;
pub mod route;
pub mod waypoint;

pub use coordinates::Coordinates;
pub use intent::{EnrichedPlace, HintCoordinates, IntentType, LocationHint, RouteIntent, Stop};
pub use route::{
    CandidatePath, FitnessMetrics, Leg, RoutePlan, RouteSummary, ScoredPath, TransportMode,
};
pub use waypoint::{ProposedWaypoint, Waypoint, WaypointKey};
