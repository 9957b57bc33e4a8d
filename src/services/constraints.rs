use crate::constants::METERS_PER_STEP;
use once_cell::sync::Lazy;
use regex::Regex;

static STEPS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*steps").expect("valid regex"));
static KM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*km").expect("valid regex"));
static CALORIE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"burn\s*(\d+)\s*calorie").expect("valid regex"));

/// Numeric goals recognised in free-text fitness constraints
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitnessGoals {
    /// Step goal converted to metres
    pub steps_goal_m: Option<f64>,
    pub distance_goal_m: Option<f64>,
    pub calorie_goal: Option<f64>,
}

impl FitnessGoals {
    /// Later constraints of the same kind override earlier ones.
    /// Strings matching nothing are ignored.
    pub fn parse<S: AsRef<str>>(constraints: &[S]) -> Self {
        let mut goals = FitnessGoals::default();

        for constraint in constraints {
            let text = constraint.as_ref();
            if let Some(n) = first_number(&STEPS_RE, text) {
                goals.steps_goal_m = Some(n * METERS_PER_STEP);
            }
            if let Some(n) = first_number(&KM_RE, text) {
                goals.distance_goal_m = Some(n * 1000.0);
            }
            if let Some(n) = first_number(&CALORIE_RE, text) {
                goals.calorie_goal = Some(n);
            }
        }

        goals
    }

    pub fn is_empty(&self) -> bool {
        self.steps_goal_m.is_none() && self.distance_goal_m.is_none() && self.calorie_goal.is_none()
    }

    /// Steps goal in metres, when it is positive
    pub fn steps_loop_radius_m(&self) -> Option<f64> {
        self.steps_goal_m.filter(|m| *m > 0.0)
    }

    /// Whether the measured route falls short of any goal
    pub fn is_unmet(&self, distance_m: f64, calories: f64) -> bool {
        let short = |goal: Option<f64>, actual: f64| goal.is_some_and(|g| g > 0.0 && actual < g);

        short(self.distance_goal_m, distance_m)
            || short(self.steps_goal_m, distance_m)
            || short(self.calorie_goal, calories)
    }
}

fn first_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_goal() {
        let goals = FitnessGoals::parse(&["10000 steps"]);
        assert_eq!(goals.steps_goal_m, Some(8000.0));
        assert_eq!(goals.distance_goal_m, None);
        assert_eq!(goals.calorie_goal, None);
    }

    #[test]
    fn test_calorie_goal() {
        let goals = FitnessGoals::parse(&["burn 150 calories"]);
        assert_eq!(goals.calorie_goal, Some(150.0));
        assert_eq!(FitnessGoals::parse(&["burn 80 calorie"]).calorie_goal, Some(80.0));
    }

    #[test]
    fn test_distance_goal() {
        let goals = FitnessGoals::parse(&["5.5 km"]);
        assert_eq!(goals.distance_goal_m, Some(5500.0));
        assert_eq!(FitnessGoals::parse(&["at least 3km"]).distance_goal_m, Some(3000.0));
    }

    #[test]
    fn test_unmatched_constraints_are_ignored() {
        let goals = FitnessGoals::parse(&["scenic route", "avoid tolls", "burn calories"]);
        assert!(goals.is_empty());
        assert!(FitnessGoals::parse::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_last_match_wins() {
        let goals = FitnessGoals::parse(&["2 km", "10000 steps", "4 km", "5000 steps"]);
        assert_eq!(goals.distance_goal_m, Some(4000.0));
        assert_eq!(goals.steps_goal_m, Some(4000.0));
    }

    #[test]
    fn test_one_constraint_may_carry_several_goals() {
        let goals = FitnessGoals::parse(&["walk 5 km and burn 200 calories"]);
        assert_eq!(goals.distance_goal_m, Some(5000.0));
        assert_eq!(goals.calorie_goal, Some(200.0));
    }

    #[test]
    fn test_is_unmet() {
        let goals = FitnessGoals::parse(&["10000 steps", "burn 300 calories"]);
        assert!(goals.is_unmet(7999.0, 400.0));
        assert!(goals.is_unmet(9000.0, 299.0));
        assert!(!goals.is_unmet(8000.0, 300.0));
        assert!(!FitnessGoals::default().is_unmet(0.0, 0.0));
    }

    #[test]
    fn test_steps_loop_radius_requires_positive_goal() {
        assert_eq!(FitnessGoals::parse(&["0 steps"]).steps_loop_radius_m(), None);
        assert_eq!(
            FitnessGoals::parse(&["1000 steps"]).steps_loop_radius_m(),
            Some(800.0)
        );
    }
}
