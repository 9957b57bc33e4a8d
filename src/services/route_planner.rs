use crate::config::RouteAssemblyConfig;
use crate::error::Result;
use crate::models::{IntentType, LocationHint, RouteIntent, RoutePlan};
use crate::services::fallback::FallbackRouteAssembler;
use crate::services::fitness::FitnessRouteAssembler;
use crate::services::intent_parser::IntentParser;
use crate::services::planner::Planner;
use crate::services::providers::Providers;
use crate::services::scenic_route::ScenicRouteAssembler;

/// Prompt in, classified intent and assembled waypoints out
pub struct RoutePlanner {
    intent_parser: IntentParser,
    scenic: ScenicRouteAssembler,
    fitness: FitnessRouteAssembler,
    fallback: FallbackRouteAssembler,
    planner: Planner,
}

impl RoutePlanner {
    pub fn new(
        providers: &Providers,
        location_hint: LocationHint,
        config: RouteAssemblyConfig,
    ) -> Self {
        let planner = Planner::new(providers.completion.clone());

        RoutePlanner {
            intent_parser: IntentParser::new(
                planner.clone(),
                providers.places.clone(),
                location_hint,
                config.stop_search_radius_m,
            ),
            scenic: ScenicRouteAssembler::new(providers, config.clone()),
            fitness: FitnessRouteAssembler::new(providers, planner.clone(), config),
            fallback: FallbackRouteAssembler::new(providers, planner.clone()),
            planner,
        }
    }

    pub async fn plan(&self, prompt: &str, client_ip: &str) -> Result<(RouteIntent, RoutePlan)> {
        let intent = self.intent_parser.parse(prompt, client_ip).await?;
        let plan = self.plan_for_intent(&intent).await?;
        Ok((intent, plan))
    }

    pub async fn plan_for_intent(&self, intent: &RouteIntent) -> Result<RoutePlan> {
        match intent.intent_type {
            IntentType::Scenic => {
                tracing::info!("Using scenic route assembler");
                self.scenic.assemble(intent).await
            }
            IntentType::Health => {
                tracing::info!("Using fitness route assembler");
                self.fitness.assemble(intent).await
            }
            other => {
                tracing::info!(intent = %other, "Using fallback route assembler");
                self.fallback.assemble(intent).await
            }
        }
    }

    /// `live` or `canned`
    pub fn planner_kind(&self) -> &'static str {
        self.planner.provider_kind()
    }
}
