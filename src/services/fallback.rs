use crate::error::Result;
use crate::models::{RouteIntent, RoutePlan, Waypoint};
use crate::services::planner::Planner;
use crate::services::providers::Providers;
use crate::services::stop_resolver::StopResolver;
use crate::services::waypoint_merger::merge_waypoints;

/// Routes for every intent without a dedicated assembler: the planner proposes
/// waypoints, then the user's enriched stops are merged in.
pub struct FallbackRouteAssembler {
    stops: StopResolver,
    planner: Planner,
}

impl FallbackRouteAssembler {
    pub fn new(providers: &Providers, planner: Planner) -> Self {
        Self {
            stops: StopResolver::new(providers.geocoder.clone()),
            planner,
        }
    }

    pub async fn assemble(&self, intent: &RouteIntent) -> Result<RoutePlan> {
        let proposal = self.planner.plan_route(intent).await?;

        // Fill placeholder coordinates by geocoding the proposed name
        let mut primary = Vec::with_capacity(proposal.len());
        for proposed in proposal {
            let wp = match proposed.into_waypoint() {
                Ok(wp) => wp,
                Err(incomplete) => {
                    tracing::debug!(name = %incomplete.name, "Geocoding proposed waypoint");
                    self.stops.resolve_named(&incomplete.name).await?
                }
            };
            primary.push(wp);
        }

        // The origin slot of `required` is never merged; it only matters when
        // the planner proposed nothing, in which case it seeds the route.
        let origin = match primary.first() {
            Some(head) => head.clone(),
            None => self.stops.resolve_named(&intent.origin).await?,
        };
        if primary.is_empty() {
            primary.push(origin.clone());
        }

        let mut required: Vec<Waypoint> = vec![origin];
        required.extend(
            intent
                .stops()
                .iter()
                .filter_map(|stop| stop.enriched())
                .map(|place| Waypoint::new(place.name.clone(), place.latitude, place.longitude)),
        );

        let waypoints = merge_waypoints(&primary, &required);
        tracing::info!(
            intent = %intent.intent_type,
            count = waypoints.len(),
            "Assembled fallback route"
        );
        Ok(RoutePlan::waypoints(waypoints))
    }
}
