use crate::error::{AppError, Result};
use crate::models::{Coordinates, LocationHint, RouteIntent, Stop};
use crate::services::planner::Planner;
use crate::services::providers::PlacesProvider;
use serde_json::Value;
use std::sync::Arc;

/// Free-text prompt to a classified, stop-enriched [`RouteIntent`]
pub struct IntentParser {
    planner: Planner,
    places: Arc<dyn PlacesProvider>,
    location_hint: LocationHint,
    stop_search_radius_m: f64,
}

impl IntentParser {
    pub fn new(
        planner: Planner,
        places: Arc<dyn PlacesProvider>,
        location_hint: LocationHint,
        stop_search_radius_m: f64,
    ) -> Self {
        Self {
            planner,
            places,
            location_hint,
            stop_search_radius_m,
        }
    }

    pub async fn parse(&self, prompt: &str, client_ip: &str) -> Result<RouteIntent> {
        // Client addresses are not geolocated; every request gets the configured hint
        tracing::debug!(client_ip, "Using configured location hint");
        let hint = self.location_hint.clone();

        let mut raw = self.planner.parse_intent(prompt, client_ip).await?;
        raw.retain(|_, value| !value.is_null());

        let has_destination = raw
            .get("destination")
            .and_then(Value::as_str)
            .is_some_and(|d| !d.trim().is_empty());
        if !has_destination {
            if let Some(city) = hint.city.as_deref().filter(|c| !c.is_empty()) {
                raw.insert(
                    "destination".to_string(),
                    Value::String(format!("Nearby {}", city)),
                );
            }
        }

        let mut intent: RouteIntent = serde_json::from_value(Value::Object(raw)).map_err(|e| {
            AppError::MalformedProviderResponse(format!("intent does not match schema: {}", e))
        })?;
        intent.location_hint = Some(hint);

        if let Some(stops) = intent.stops.take() {
            let bias = intent
                .location_hint
                .as_ref()
                .and_then(|h| h.coordinates)
                .map(|c| Coordinates {
                    lat: c.latitude,
                    lng: c.longitude,
                });
            intent.stops = Some(self.enrich_stops(stops, bias).await);
        }

        tracing::info!(
            intent = %intent.intent_type,
            origin = %intent.origin,
            destination = intent.destination().unwrap_or_default(),
            stops = intent.stops().len(),
            "Parsed route intent"
        );
        Ok(intent)
    }

    /// Attach the top text-search hit to each stop. A failed search leaves
    /// the stop with no results.
    async fn enrich_stops(&self, stops: Vec<Stop>, bias: Option<Coordinates>) -> Vec<Stop> {
        let mut enriched = Vec::with_capacity(stops.len());

        for mut stop in stops {
            let query = stop_query(&stop).to_string();
            stop.search_results = match self
                .places
                .text_search(&query, bias, self.stop_search_radius_m)
                .await
            {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!(query = %query, "Stop search failed: {}", e);
                    Vec::new()
                }
            };
            enriched.push(stop);
        }

        enriched
    }
}

fn stop_query(stop: &Stop) -> &str {
    [Some(stop.name.as_str()), stop.address.as_deref()]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or("place")
}
