use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates { lat, lng })
    }

    /// Build from a GeoJSON `[lng, lat]` pair
    pub fn from_lng_lat(pair: [f64; 2]) -> Result<Self, String> {
        Self::new(pair[1], pair[0])
    }

    /// `lng,lat` as used in Mapbox coordinate paths
    pub fn to_lng_lat_param(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}

/// `lat,lng` as used in Google Maps query parameters
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(37.8712, -122.2555).is_ok());
        assert!(Coordinates::new(91.0, 0.0).is_err()); // Invalid lat
        assert!(Coordinates::new(0.0, 181.0).is_err()); // Invalid lng
    }

    #[test]
    fn test_from_lng_lat_swaps_order() {
        let coords = Coordinates::from_lng_lat([-122.2555, 37.8712]).unwrap();
        assert_eq!(coords.lat, 37.8712);
        assert_eq!(coords.lng, -122.2555);

        // A [lat, lng] pair passed by mistake fails validation here
        assert!(Coordinates::from_lng_lat([37.0, -122.0]).is_err());
    }

    #[test]
    fn test_param_formats() {
        let coords = Coordinates::new(37.8712141, -122.255463).unwrap();
        assert_eq!(coords.to_string(), "37.8712141,-122.255463");
        assert_eq!(coords.to_lng_lat_param(), "-122.255463,37.8712141");
    }
}
