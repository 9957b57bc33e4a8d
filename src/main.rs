use axum::Router;
use routeweaver::config::Config;
use routeweaver::services::google_maps::GoogleMapsClient;
use routeweaver::services::mapbox::{AuthMode, MapboxClient};
use routeweaver::services::planner::{
    CannedCompletionProvider, CompletionProvider, LiveCompletionProvider,
};
use routeweaver::services::providers::Providers;
use routeweaver::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routeweaver=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting RouteWeaver API server");
    tracing::info!("Configuration loaded successfully");

    // Routing provider
    let mapbox_client = if let Some(ref base_url) = config.mapbox_base_url {
        MapboxClient::with_config(
            config.mapbox_api_key.clone(),
            base_url.clone(),
            AuthMode::BearerHeader,
        )
    } else {
        MapboxClient::new(config.mapbox_api_key.clone())
    };

    // Geocoding, places and elevation
    let maps_client = Arc::new(match config.google_maps_base_url {
        Some(ref base_url) => {
            GoogleMapsClient::with_base_url(config.google_maps_api_key.clone(), base_url.clone())
        }
        None => GoogleMapsClient::new(config.google_maps_api_key.clone()),
    });

    // Planning model: live when a key is configured, canned otherwise
    let completion: Arc<dyn CompletionProvider> = match config.planner_api_key {
        Some(ref api_key) => {
            tracing::info!(model = %config.planner_model, "Using live planning service");
            Arc::new(LiveCompletionProvider::new(
                api_key.clone(),
                config.planner_base_url.clone(),
                config.planner_model.clone(),
            ))
        }
        None => {
            tracing::warn!("PLANNER_API_KEY not set. Using canned planning responses.");
            Arc::new(CannedCompletionProvider::new())
        }
    };

    let providers = Providers {
        routing: Arc::new(mapbox_client),
        geocoder: maps_client.clone(),
        places: maps_client.clone(),
        elevation: maps_client,
        completion,
    };

    // Create application state
    let state = Arc::new(AppState::new(
        &providers,
        config.default_location_hint.clone(),
        config.route_assembly.clone(),
    ));

    // Build router with CORS and tracing
    let app = Router::new()
        .merge(routeweaver::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
