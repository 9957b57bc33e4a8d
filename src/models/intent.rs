use crate::error::Result;
use crate::models::TransportMode;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IntentType {
    Health,
    Scenic,
    #[serde(rename = "Eco-conscious")]
    EcoConscious,
    Commute,
    Transit,
    Event,
    #[serde(rename = "Road-Trip")]
    RoadTrip,
    Other,
}

impl fmt::Display for IntentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IntentType::Health => "Health",
            IntentType::Scenic => "Scenic",
            IntentType::EcoConscious => "Eco-conscious",
            IntentType::Commute => "Commute",
            IntentType::Transit => "Transit",
            IntentType::Event => "Event",
            IntentType::RoadTrip => "Road-Trip",
            IntentType::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HintCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Approximate user location used to bias searches and default destinations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationHint {
    pub country: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub coordinates: Option<HintCoordinates>,
}

/// Top text-search hit attached to a stop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedPlace {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stop {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Search results attached during enrichment; only the first is used
    #[serde(default, rename = "gsr")]
    pub search_results: Vec<EnrichedPlace>,
}

impl Stop {
    pub fn enriched(&self) -> Option<&EnrichedPlace> {
        self.search_results.first()
    }

    /// What to geocode when the stop was not enriched
    pub fn geocode_query(&self) -> &str {
        self.address
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

/// A classified travel request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteIntent {
    pub intent_type: IntentType,
    pub origin: String,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub travel_modes: Option<Vec<String>>,
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub avoid: Option<Vec<String>>,
    #[serde(default)]
    pub optimize_waypoints: Option<bool>,
    #[serde(default)]
    pub stops: Option<Vec<Stop>>,
    #[serde(default)]
    pub location_hint: Option<LocationHint>,
}

impl RouteIntent {
    pub fn new(intent_type: IntentType, origin: impl Into<String>) -> Self {
        RouteIntent {
            intent_type,
            origin: origin.into(),
            destination: None,
            travel_modes: None,
            departure_time: None,
            arrival_time: None,
            constraints: Vec::new(),
            avoid: None,
            optimize_waypoints: None,
            stops: None,
            location_hint: None,
        }
    }

    /// Destination, treating a blank string as unset
    pub fn destination(&self) -> Option<&str> {
        self.destination
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// First preferred travel mode, or `default` when none was given
    pub fn primary_mode(&self, default: TransportMode) -> Result<TransportMode> {
        match self.travel_modes.as_ref().and_then(|modes| modes.first()) {
            Some(mode) => mode.parse(),
            None => Ok(default),
        }
    }

    pub fn optimize(&self) -> bool {
        self.optimize_waypoints.unwrap_or(false)
    }

    pub fn stops(&self) -> &[Stop] {
        self.stops.as_deref().unwrap_or(&[])
    }

    pub fn avoid(&self) -> &[String] {
        self.avoid.as_deref().unwrap_or(&[])
    }

    pub fn hint_city(&self) -> Option<&str> {
        self.location_hint
            .as_ref()
            .and_then(|hint| hint.city.as_deref())
            .filter(|city| !city.is_empty())
    }
}
