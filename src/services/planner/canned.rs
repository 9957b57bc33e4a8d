use super::{CompletionProvider, Prompt, PromptTask};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::json;

/// Deterministic keyword-driven completions, used when no planning
/// service key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedCompletionProvider;

impl CannedCompletionProvider {
    pub fn new() -> Self {
        CannedCompletionProvider
    }
}

#[async_trait]
impl CompletionProvider for CannedCompletionProvider {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        tracing::debug!(task = ?prompt.task, "Serving canned completion");
        let text = match prompt.task {
            PromptTask::IntentParsing => canned_intent(&prompt.user),
            PromptTask::RoutePlanning => canned_route_plan(&prompt.user).to_string(),
            PromptTask::FitnessOptimization => FITNESS_SUGGESTIONS.to_string(),
        };
        Ok(text)
    }

    fn kind(&self) -> &'static str {
        "canned"
    }
}

const SCENIC_WORDS: &[&str] = &["scenic", "beautiful", "nature", "park", "view"];
const HEALTH_WORDS: &[&str] = &[
    "fitness", "walk", "exercise", "step", "calories", "health", "stroll", "jog", "run",
];
const EVENT_WORDS: &[&str] = &["date", "dinner", "night", "restaurant", "romantic"];
const COMMUTE_WORDS: &[&str] = &["commute", "work", "fast", "quick", "shortest"];
const ECO_WORDS: &[&str] = &["eco", "green", "environment", "electric"];

const WALKING_WORDS: &[&str] = &["walk", "stroll", "step", "jog"];
const BICYCLING_WORDS: &[&str] = &["bike", "cycling", "bicycle"];
const TRANSIT_WORDS: &[&str] = &["transit", "bus", "train"];

const DEFAULT_ORIGIN: &str = "UC Berkeley";

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

fn canned_intent(user: &str) -> String {
    let text = user.to_lowercase();

    let (intent_type, constraints) = if contains_any(&text, SCENIC_WORDS) {
        ("Scenic", vec!["scenic route"])
    } else if contains_any(&text, HEALTH_WORDS) {
        let mut c = Vec::new();
        if text.contains("step") {
            c.push("10000 steps");
        }
        if text.contains("calories") {
            c.push("burn calories");
        }
        ("Health", c)
    } else if contains_any(&text, EVENT_WORDS) {
        ("Event", vec!["date night"])
    } else if contains_any(&text, COMMUTE_WORDS) {
        ("Commute", vec!["fastest route"])
    } else if contains_any(&text, ECO_WORDS) {
        ("Eco-conscious", vec!["eco-friendly"])
    } else {
        ("Other", Vec::new())
    };

    let (origin, destination) = places_in(&text);

    let travel_mode = if contains_any(&text, WALKING_WORDS) {
        "walking"
    } else if contains_any(&text, BICYCLING_WORDS) {
        "bicycling"
    } else if contains_any(&text, TRANSIT_WORDS) {
        "transit"
    } else if intent_type == "Health" {
        "walking"
    } else {
        "driving"
    };

    json!({
        "intent_type": intent_type,
        "origin": origin,
        "destination": destination,
        "travel_modes": [travel_mode],
        "constraints": constraints,
        "avoid": [],
        "optimize_waypoints": true
    })
    .to_string()
}

/// Origin and destination named in a lowercased request
fn places_in(text: &str) -> (String, String) {
    if let Some((_, rest)) = text.split_once(" from ") {
        return match rest.split_once(" to ") {
            Some((from, to)) => (title_case(from), title_case(to)),
            None => (title_case(rest), String::new()),
        };
    }

    let destination = text
        .rsplit_once(" to ")
        .map(|(_, to)| title_case(to))
        .unwrap_or_default();

    let origin = if let Some((_, rest)) = text.split_once("starting at") {
        title_case(rest.split(',').next().unwrap_or_default())
    } else if let Some((_, rest)) = text.split_once(" in ") {
        title_case(rest.split_whitespace().next().unwrap_or_default())
    } else {
        String::new()
    };

    let origin = if origin.is_empty() {
        DEFAULT_ORIGIN.to_string()
    } else {
        origin
    };
    (origin, destination)
}

fn title_case(text: &str) -> String {
    text.trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn canned_route_plan(user: &str) -> &'static str {
    let text = user.to_lowercase();
    if contains_any(&text, &["scenic", "beautiful", "nature", "park"]) {
        SCENIC_PLAN
    } else if contains_any(&text, HEALTH_WORDS) {
        FITNESS_PLAN
    } else if contains_any(&text, &["date", "dinner", "romantic", "night"]) {
        EVENT_PLAN
    } else if contains_any(&text, &["commute", "work", "fast", "quick"]) {
        COMMUTE_PLAN
    } else {
        DEFAULT_PLAN
    }
}

const SCENIC_PLAN: &str = r#"[
    {"name": "Starting Point", "lat": 37.8712141, "lng": -122.255463},
    {"name": "Tilden Regional Park", "lat": 37.8840, "lng": -122.2500},
    {"name": "Berkeley Hills Scenic Overlook", "lat": 37.8900, "lng": -122.2400},
    {"name": "Destination", "lat": 37.6955029, "lng": -122.0738678}
]"#;

const FITNESS_PLAN: &str = r#"[
    {"name": "Starting Point", "lat": 37.8712141, "lng": -122.255463},
    {"name": "Berkeley Marina", "lat": 37.8600, "lng": -122.3200},
    {"name": "Cesar Chavez Park", "lat": 37.8650, "lng": -122.3150},
    {"name": "Fitness Loop Return", "lat": 37.8712141, "lng": -122.255463}
]"#;

const EVENT_PLAN: &str = r#"[
    {"name": "Starting Point", "lat": 37.8712141, "lng": -122.255463},
    {"name": "Romantic Restaurant", "lat": 37.8720, "lng": -122.2682},
    {"name": "Sunset Viewpoint", "lat": 37.8811, "lng": -122.2968},
    {"name": "Evening Destination", "lat": 37.8750, "lng": -122.2590}
]"#;

const COMMUTE_PLAN: &str = r#"[
    {"name": "Starting Point", "lat": 37.8712141, "lng": -122.255463},
    {"name": "Highway Entrance", "lat": 37.8500, "lng": -122.2300},
    {"name": "Express Route", "lat": 37.8000, "lng": -122.2000},
    {"name": "Work Destination", "lat": 37.7500, "lng": -122.1500}
]"#;

const DEFAULT_PLAN: &str = r#"[
    {"name": "Starting Point", "lat": 37.8712141, "lng": -122.255463},
    {"name": "Intermediate Stop", "lat": 37.8000, "lng": -122.2000},
    {"name": "Final Destination", "lat": 37.7500, "lng": -122.1500}
]"#;

const FITNESS_SUGGESTIONS: &str = r#"[
    {"name": "Berkeley Marina Fitness Loop", "lat": 37.8600, "lng": -122.3200},
    {"name": "Cesar Chavez Park Track", "lat": 37.8650, "lng": -122.3150}
]"#;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn prompt(task: PromptTask, user: &str) -> Prompt {
        Prompt {
            task,
            system: String::new(),
            user: user.to_string(),
            temperature: 0.1,
            max_tokens: 100,
        }
    }

    async fn intent_for(user: &str) -> Value {
        let text = CannedCompletionProvider::new()
            .complete(&prompt(PromptTask::IntentParsing, user))
            .await
            .unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[tokio::test]
    async fn test_scenic_intent_with_places() {
        let intent = intent_for("Give me a scenic route from UC Berkeley to Castro Valley").await;
        assert_eq!(intent["intent_type"], "Scenic");
        assert_eq!(intent["origin"], "Uc Berkeley");
        assert_eq!(intent["destination"], "Castro Valley");
        assert_eq!(intent["travel_modes"][0], "driving");
    }

    #[tokio::test]
    async fn test_health_intent_defaults_to_walking() {
        let intent = intent_for("I want to get 10000 steps in Berkeley").await;
        assert_eq!(intent["intent_type"], "Health");
        assert_eq!(intent["constraints"][0], "10000 steps");
        assert_eq!(intent["travel_modes"][0], "walking");
        assert_eq!(intent["origin"], "Berkeley");
    }

    #[tokio::test]
    async fn test_unrecognised_request_is_other() {
        let intent = intent_for("Hello there").await;
        assert_eq!(intent["intent_type"], "Other");
        assert_eq!(intent["origin"], DEFAULT_ORIGIN);
        assert_eq!(intent["destination"], "");
    }

    #[tokio::test]
    async fn test_route_plan_follows_intent_keywords() {
        let provider = CannedCompletionProvider::new();
        let scenic = provider
            .complete(&prompt(PromptTask::RoutePlanning, "Intent: Scenic"))
            .await
            .unwrap();
        assert!(scenic.contains("Tilden Regional Park"));

        let other = provider
            .complete(&prompt(PromptTask::RoutePlanning, "Intent: Other"))
            .await
            .unwrap();
        assert!(other.contains("Intermediate Stop"));
    }

    #[tokio::test]
    async fn test_fitness_suggestions() {
        let text = CannedCompletionProvider::new()
            .complete(&prompt(PromptTask::FitnessOptimization, ""))
            .await
            .unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["name"], "Berkeley Marina Fitness Loop");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("  castro valley. "), "Castro Valley");
        assert_eq!(title_case(""), "");
    }
}
