// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use config::RouteAssemblyConfig;
use models::LocationHint;
use services::providers::Providers;
use services::route_planner::RoutePlanner;
use services::route_summary::RouteSummarizer;

// App state for sharing across the application
pub struct AppState {
    pub route_planner: RoutePlanner,
    pub route_summarizer: RouteSummarizer,
}

impl AppState {
    pub fn new(
        providers: &Providers,
        location_hint: LocationHint,
        route_assembly: RouteAssemblyConfig,
    ) -> Self {
        AppState {
            route_planner: RoutePlanner::new(providers, location_hint, route_assembly),
            route_summarizer: RouteSummarizer::new(providers.routing.clone()),
        }
    }
}
