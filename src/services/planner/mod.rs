//! Planning model access: intent parsing, waypoint proposals and fitness
//! suggestions, all expressed as prompts to a [`CompletionProvider`].

mod canned;
mod live;

pub use canned::CannedCompletionProvider;
pub use live::LiveCompletionProvider;

use crate::constants::FITNESS_SUGGESTIONS_REQUESTED;
use crate::error::{AppError, Result};
use crate::models::{FitnessMetrics, ProposedWaypoint, RouteIntent, TransportMode, Waypoint};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Which planning task a prompt serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTask {
    IntentParsing,
    RoutePlanning,
    FitnessOptimization,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub task: PromptTask,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Raw text completion. Implementations are chosen once at startup.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String>;

    /// Short label for health reporting
    fn kind(&self) -> &'static str;
}

#[derive(Clone)]
pub struct Planner {
    provider: Arc<dyn CompletionProvider>,
}

impl Planner {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Planner { provider }
    }

    pub fn provider_kind(&self) -> &'static str {
        self.provider.kind()
    }

    /// Classify a free-text request into a raw intent object
    pub async fn parse_intent(&self, prompt: &str, client_ip: &str) -> Result<Map<String, Value>> {
        let system = format!(
            r#"You are an intelligent route-planning assistant. Parse the user's request into JSON with:
- intent_type: one of: "Health", "Scenic", "Eco-conscious", "Commute", "Transit", "Event", "Road-Trip", "Other".
- origin: starting point ("UC Berkeley" if unspecified).
- destination: end point.
- travel_modes: array of one or more modes in preferred order, any of ["driving", "walking", "bicycling", "transit"]. Use "driving" if nothing mentioned.
- departure_time / arrival_time: optional ISO timestamps.
- constraints: list of conditions (e.g. "avoid tolls", "burn 100 calories", "date night", "x km").
- avoid: list of route features to avoid (tolls, highways, ferries).
- stops: if the user mentions multiple stops, an array of objects like {{"name": place}}.
- optimize_waypoints: boolean (true to reorder stops for the shortest trip).
User IP hint: {}.
Respond ONLY with the raw JSON object, without any explanatory text or markdown formatting."#,
            client_ip
        );

        let response = self
            .provider
            .complete(&Prompt {
                task: PromptTask::IntentParsing,
                system,
                user: prompt.to_string(),
                temperature: 0.1,
                max_tokens: 1000,
            })
            .await?;

        let object = extract_json_object(&response).ok_or_else(|| {
            AppError::MalformedProviderResponse(
                "no JSON object in intent classification".to_string(),
            )
        })?;

        match serde_json::from_str::<Value>(object) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(AppError::MalformedProviderResponse(
                "intent classification is not an object".to_string(),
            )),
            Err(e) => Err(AppError::MalformedProviderResponse(format!(
                "invalid intent JSON: {}",
                e
            ))),
        }
    }

    /// Full waypoint proposal for an intent
    pub async fn plan_route(&self, intent: &RouteIntent) -> Result<Vec<ProposedWaypoint>> {
        let system = r#"You are a route planner. Given route intent details, generate a JSON array of waypoints.
Each waypoint should have: {"name": "place name", "lat": latitude, "lng": longitude}
Return ONLY the JSON array, no explanation."#
            .to_string();

        let modes = intent
            .travel_modes
            .clone()
            .unwrap_or_else(|| vec![TransportMode::Driving.to_string()]);
        let stops: Vec<&str> = intent.stops().iter().map(|s| s.name.as_str()).collect();
        let user = format!(
            "Intent: {}\nOrigin: {}\nDestination: {}\nTravel modes: {:?}\nConstraints: {:?}\nAvoid: {:?}\nStops: {:?}\n\nGenerate waypoints as JSON array: [{{\"name\": \"...\", \"lat\": ..., \"lng\": ...}}, ...]",
            intent.intent_type,
            intent.origin,
            intent.destination().unwrap_or_default(),
            modes,
            intent.constraints,
            intent.avoid(),
            stops,
        );

        let response = self
            .provider
            .complete(&Prompt {
                task: PromptTask::RoutePlanning,
                system,
                user,
                temperature: 0.2,
                max_tokens: 500,
            })
            .await?;

        let array = extract_json_array(&response).ok_or_else(|| {
            AppError::MalformedProviderResponse("no JSON array in route plan".to_string())
        })?;

        serde_json::from_str(array).map_err(|e| {
            AppError::MalformedProviderResponse(format!("invalid route plan JSON: {}", e))
        })
    }

    /// Extra waypoints towards unmet fitness goals.
    /// An unparseable answer yields no suggestions rather than an error.
    pub async fn suggest_fitness_waypoints(
        &self,
        current_route: &[Waypoint],
        constraints: &[String],
        mode: TransportMode,
        metrics: &FitnessMetrics,
    ) -> Result<Vec<Waypoint>> {
        let system = "You are a fitness route optimizer. Given current route metrics and fitness constraints,\nsuggest additional waypoints to meet fitness goals. Return only JSON array of waypoints.".to_string();

        let route_json = serde_json::to_string(current_route)
            .map_err(|e| AppError::Internal(format!("Failed to encode route: {}", e)))?;
        let user = format!(
            "Current route waypoints: {}\nTravel mode: {}\nCurrent metrics: distance_m={}, duration_s={}, calories={:.2}\nFitness constraints: {:?}\n\nSuggest up to {} extra waypoints as JSON array to satisfy fitness goals:\n[{{\"name\": \"place name\", \"lat\": latitude, \"lng\": longitude}}, ...]",
            route_json,
            mode,
            metrics.total_distance_m,
            metrics.total_duration_s,
            metrics.calories_burned,
            constraints,
            FITNESS_SUGGESTIONS_REQUESTED,
        );

        let response = self
            .provider
            .complete(&Prompt {
                task: PromptTask::FitnessOptimization,
                system,
                user,
                temperature: 0.3,
                max_tokens: 300,
            })
            .await?;

        Ok(parse_suggestions(&response))
    }
}

fn parse_suggestions(response: &str) -> Vec<Waypoint> {
    let Some(array) = extract_json_array(response) else {
        tracing::warn!("Fitness optimizer returned no JSON array; adding no waypoints");
        return Vec::new();
    };

    match serde_json::from_str::<Vec<Value>>(array) {
        Ok(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Waypoint>(item) {
                Ok(wp) => Some(wp),
                Err(e) => {
                    tracing::warn!("Dropping incomplete fitness suggestion: {}", e);
                    None
                }
            })
            .collect(),
        Err(e) => {
            tracing::warn!("Fitness optimizer returned invalid JSON ({}); adding no waypoints", e);
            Vec::new()
        }
    }
}

/// Span from the first `{` to the last `}`
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Span from the first `[` to the last `]`
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_object_ignores_chatter() {
        let text = "Sure! Here you go:\n```json\n{\"intent_type\": \"Scenic\", \"stops\": [{\"name\": \"x\"}]}\n```";
        assert_eq!(
            extract_json_object(text),
            Some("{\"intent_type\": \"Scenic\", \"stops\": [{\"name\": \"x\"}]}")
        );
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_extract_json_array() {
        let text = "Waypoints: [{\"name\": \"A\", \"lat\": 1, \"lng\": 2}] done";
        assert_eq!(
            extract_json_array(text),
            Some("[{\"name\": \"A\", \"lat\": 1, \"lng\": 2}]")
        );
        assert_eq!(extract_json_array("[ unterminated"), None);
    }

    #[test]
    fn test_parse_suggestions_degrades_to_empty() {
        assert!(parse_suggestions("I cannot help with that").is_empty());
        assert!(parse_suggestions("[not json]").is_empty());
        assert!(parse_suggestions("[]").is_empty());
    }

    #[test]
    fn test_parse_suggestions_keeps_every_valid_entry() {
        // The prompt asks for a few, but whatever comes back is kept
        let suggestions = parse_suggestions(
            r#"[{"name": "A", "lat": 1, "lng": 1}, {"name": "B", "lat": 2, "lng": 2},
                {"name": "C", "lat": 3, "lng": 3}, {"name": "D", "lat": 4, "lng": 4}]"#,
        );
        let names: Vec<_> = suggestions.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_parse_suggestions_drops_incomplete_entries() {
        let suggestions = parse_suggestions(
            r#"[{"name": "Berkeley Marina", "lat": 37.86, "lng": -122.32}, {"name": "Mystery"}]"#,
        );
        assert_eq!(suggestions, vec![Waypoint::new("Berkeley Marina", 37.86, -122.32)]);
    }
}
