use crate::models::Coordinates;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A named point in travel order. Serialized as `{"name", "lat", "lng"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Waypoint {
            name: name.into(),
            lat,
            lng,
        }
    }

    pub fn at(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self::new(name, coordinates.lat, coordinates.lng)
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lng,
        }
    }

    pub fn key(&self) -> WaypointKey {
        WaypointKey::of(&self.name, self.lat, self.lng)
    }
}

/// Dedup identity of a waypoint: name plus the literal coordinate values.
///
/// Coordinates are compared by their printed form, so two points a rounding
/// error apart are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WaypointKey(String);

impl WaypointKey {
    pub fn of(name: &str, lat: f64, lng: f64) -> Self {
        WaypointKey(format!("{}|{}|{}", name, lat, lng))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A waypoint proposed by the planning service. Coordinates the model left
/// out or filled with placeholders are `None` until geocoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProposedWaypoint {
    pub name: String,
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub lng: Option<f64>,
}

impl ProposedWaypoint {
    /// Complete waypoint when both coordinates are present
    pub fn into_waypoint(self) -> Result<Waypoint, ProposedWaypoint> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Ok(Waypoint::new(self.name, lat, lng)),
            _ => Err(self),
        }
    }
}

fn numeric_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}
