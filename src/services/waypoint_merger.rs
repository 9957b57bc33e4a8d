use crate::models::{Waypoint, WaypointKey};
use std::collections::HashSet;

/// Reconcile a proposed waypoint list with stops the user asked for.
///
/// Order: `primary[0]`, then `required[1..]`, then `primary[1..]`. The first
/// occurrence of each identity wins. An empty merge returns `required` as is.
pub fn merge_waypoints(primary: &[Waypoint], required: &[Waypoint]) -> Vec<Waypoint> {
    let mut seen: HashSet<WaypointKey> = HashSet::new();
    let mut merged = Vec::with_capacity(primary.len() + required.len());

    let ordered = primary
        .iter()
        .take(1)
        .chain(required.iter().skip(1))
        .chain(primary.iter().skip(1));

    for wp in ordered {
        if seen.insert(wp.key()) {
            merged.push(wp.clone());
        }
    }

    if merged.is_empty() {
        return required.to_vec();
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wp(name: &str, lat: f64, lng: f64) -> Waypoint {
        Waypoint::new(name, lat, lng)
    }

    fn names(list: &[Waypoint]) -> Vec<&str> {
        list.iter().map(|w| w.name.as_str()).collect()
    }

    #[test]
    fn test_required_stops_follow_primary_head() {
        let a = wp("A", 37.87, -122.25);
        let b = wp("B", 37.88, -122.24);
        let c = wp("C", 37.89, -122.23);
        let d = wp("D", 37.80, -122.20);

        let merged = merge_waypoints(&[a.clone(), b, c], &[a, d]);
        assert_eq!(names(&merged), vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let primary = vec![
            wp("A", 1.0, 1.0),
            wp("B", 2.0, 2.0),
            wp("C", 3.0, 3.0),
        ];
        let required = vec![wp("A", 1.0, 1.0), wp("D", 4.0, 4.0)];

        let once = merge_waypoints(&primary, &required);
        let twice = merge_waypoints(&once, &required);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_duplicate_identities() {
        let primary = vec![
            wp("A", 1.0, 1.0),
            wp("B", 2.0, 2.0),
            wp("B", 2.0, 2.0),
            wp("D", 4.0, 4.0),
        ];
        let required = vec![wp("X", 0.0, 0.0), wp("D", 4.0, 4.0), wp("A", 1.0, 1.0)];

        let merged = merge_waypoints(&primary, &required);
        let unique: HashSet<_> = merged.iter().map(Waypoint::key).collect();
        assert_eq!(unique.len(), merged.len());
        assert_eq!(names(&merged), vec!["A", "D", "B"]);
    }

    #[test]
    fn test_required_origin_is_not_re_added() {
        let merged = merge_waypoints(&[wp("Start", 1.0, 1.0)], &[wp("Origin", 9.0, 9.0)]);
        assert_eq!(names(&merged), vec!["Start"]);
    }

    #[test]
    fn test_empty_primary_returns_required() {
        let required = vec![wp("Origin", 1.0, 1.0), wp("Stop", 2.0, 2.0)];
        assert_eq!(merge_waypoints(&[], &required), vec![wp("Stop", 2.0, 2.0)]);
        assert_eq!(merge_waypoints(&[], &required[..1]), required[..1].to_vec());
        assert!(merge_waypoints(&[], &[]).is_empty());
    }

    #[test]
    fn test_jittered_coordinates_are_distinct() {
        let merged = merge_waypoints(
            &[wp("A", 1.0, 1.0), wp("B", 2.0, 2.0)],
            &[wp("A", 1.0, 1.0), wp("B", 2.0000001, 2.0)],
        );
        assert_eq!(merged.len(), 3);
    }
}
