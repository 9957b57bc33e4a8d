pub mod constraints;
pub mod fallback;
pub mod fitness;
pub mod google_maps;
pub mod intent_parser;
pub mod mapbox;
pub mod planner;
pub mod providers;
pub mod route_planner;
pub mod route_summary;
pub mod scenic_route;
pub mod stop_resolver;
pub mod waypoint_merger;
