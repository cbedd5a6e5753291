use crate::models::{ClientProfile, NutritionTargets};

/// Lower-case and trim a free-text profile value
#[inline]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Normalise an optional free-text value, treating blank strings as absent
pub fn normalize_opt(value: Option<&str>) -> Option<String> {
    value.map(normalize).filter(|v| !v.is_empty())
}

/// True when `text` contains any of the keywords
#[inline]
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Experience tier parsed from a free-text answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExperienceTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceTier {
    pub fn parse(value: &str) -> Option<Self> {
        let value = normalize(value);
        let negated = contains_any(&value, &["inexperienced", "no experience", "little experience", "never"])
            || (value.split_whitespace().any(|word| matches!(word, "not" | "no"))
                && contains_any(&value, &["experience", "expert", "advanced"]));
        if negated {
            return Some(Self::Beginner);
        }
        if contains_any(&value, &["advanced", "expert", "experienced", "elite"]) {
            Some(Self::Advanced)
        } else if contains_any(&value, &["intermediate", "moderate", "some experience"]) {
            Some(Self::Intermediate)
        } else if contains_any(&value, &["beginner", "novice", "new", "starter", "first"]) {
            Some(Self::Beginner)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Words a category or template uses to describe this tier
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Beginner => &["beginner", "novice", "foundation", "starter", "entry"],
            Self::Intermediate => &["intermediate", "progressive"],
            Self::Advanced => &["advanced", "experienced", "elite", "athlete"],
        }
    }

    /// Number of tiers between two levels
    pub fn distance(&self, other: &Self) -> u8 {
        (*self as i8 - *other as i8).unsigned_abs()
    }
}

/// Primary goal parsed from a free-text answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalKind {
    FatLoss,
    MuscleGain,
    Recomposition,
    Maintenance,
}

impl GoalKind {
    pub fn parse(value: &str) -> Option<Self> {
        let value = normalize(value);
        let fat = contains_any(&value, &["fat", "weight loss", "lose", "cut", "shred", "slim"]);
        let muscle = contains_any(&value, &["muscle", "gain", "build", "bulk", "strength", "tone"]);
        match (fat, muscle) {
            _ if contains_any(&value, &["both", "recomp"]) => Some(Self::Recomposition),
            (true, true) => Some(Self::Recomposition),
            (true, false) => Some(Self::FatLoss),
            (false, true) => Some(Self::MuscleGain),
            _ if contains_any(&value, &["maintain", "maintenance", "health", "general"]) => {
                Some(Self::Maintenance)
            }
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FatLoss => "fat loss",
            Self::MuscleGain => "muscle-building",
            Self::Recomposition => "body recomposition",
            Self::Maintenance => "maintenance",
        }
    }

    /// Words a category or template uses to describe this goal
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::FatLoss => &["fat loss", "weight loss", "lean", "cut", "conditioning", "deficit", "shred"],
            Self::MuscleGain => &["muscle", "hypertrophy", "strength", "bulk", "build", "surplus", "mass"],
            Self::Recomposition => &["recomp", "fat loss and muscle", "lean muscle", "tone", "hybrid"],
            Self::Maintenance => &["maintain", "maintenance", "balanced", "general fitness", "health"],
        }
    }

    /// Resolve the goal from `goal_type` first, falling back to `goal`
    pub fn from_profile(profile: &ClientProfile) -> Option<Self> {
        profile
            .goal_type
            .as_deref()
            .and_then(Self::parse)
            .or_else(|| profile.goal.as_deref().and_then(Self::parse))
    }
}

/// Partial or full credit awarded by a rule
#[derive(Debug, Clone, PartialEq)]
pub struct RuleHit {
    pub credit: f64,
    pub reason: String,
}

impl RuleHit {
    pub fn full(reason: impl Into<String>) -> Self {
        Self { credit: 1.0, reason: reason.into() }
    }

    pub fn partial(credit: f64, reason: impl Into<String>) -> Self {
        Self { credit: credit.clamp(0.0, 1.0), reason: reason.into() }
    }
}

/// Everything a rule may look at besides the candidate itself
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub profile: &'a ClientProfile,
    pub targets: NutritionTargets,
}

impl<'a> ScoringContext<'a> {
    pub fn new(profile: &'a ClientProfile) -> Self {
        Self { profile, targets: NutritionTargets::default() }
    }

    pub fn with_targets(profile: &'a ClientProfile, targets: NutritionTargets) -> Self {
        Self { profile, targets }
    }
}

/// Evaluator for a single rule: `None` when the rule does not fire
pub type RuleEval<C> = fn(&ScoringContext<'_>, &C) -> Option<RuleHit>;

/// A weighted scoring rule evaluated against a candidate of type `C`
#[derive(Clone)]
pub struct Rule<C> {
    pub key: &'static str,
    pub weight: f64,
    pub eval: RuleEval<C>,
}

impl<C> std::fmt::Debug for Rule<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("key", &self.key)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Ordered list of rules; evaluation order is reason order
#[derive(Debug, Clone)]
pub struct RuleSet<C> {
    rules: Vec<Rule<C>>,
}

impl<C> RuleSet<C> {
    pub fn new(rules: Vec<Rule<C>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule<C>] {
        &self.rules
    }

    /// Highest raw score a candidate could reach
    pub fn max_points(&self) -> f64 {
        self.rules.iter().map(|rule| rule.weight.max(0.0)).sum()
    }

    /// Sum the points of every rule that fires, collecting reasons in rule order
    pub fn evaluate(&self, ctx: &ScoringContext<'_>, candidate: &C) -> (f64, Vec<String>) {
        let mut points = 0.0;
        let mut reasons = Vec::new();

        for rule in &self.rules {
            if rule.weight <= 0.0 {
                continue;
            }
            if let Some(hit) = (rule.eval)(ctx, candidate) {
                if hit.credit <= 0.0 {
                    continue;
                }
                points += rule.weight * hit.credit;
                reasons.push(hit.reason);
            }
        }

        (points, reasons)
    }

    /// Evaluate and scale to the 0-100 range against this set's maximum
    pub fn score(&self, ctx: &ScoringContext<'_>, candidate: &C) -> (u8, Vec<String>) {
        let (points, reasons) = self.evaluate(ctx, candidate);
        (normalize_score(points, self.max_points()), reasons)
    }
}

/// Scale raw points to 0-100 by the theoretical maximum, rounding and clamping
#[inline]
pub fn normalize_score(points: f64, max_points: f64) -> u8 {
    if max_points <= 0.0 || !points.is_finite() {
        return 0;
    }
    (points / max_points * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_: &ScoringContext<'_>, _: &()) -> Option<RuleHit> {
        Some(RuleHit::full("always"))
    }

    fn half(_: &ScoringContext<'_>, _: &()) -> Option<RuleHit> {
        Some(RuleHit::partial(0.5, "half"))
    }

    fn never(_: &ScoringContext<'_>, _: &()) -> Option<RuleHit> {
        None
    }

    #[test]
    fn test_experience_parsing() {
        assert_eq!(ExperienceTier::parse(" Beginner "), Some(ExperienceTier::Beginner));
        assert_eq!(ExperienceTier::parse("Intermediate (1-3 years)"), Some(ExperienceTier::Intermediate));
        assert_eq!(ExperienceTier::parse("ADVANCED"), Some(ExperienceTier::Advanced));
        assert_eq!(ExperienceTier::parse("unsure"), None);
    }

    #[test]
    fn test_negated_experience_is_beginner() {
        assert_eq!(ExperienceTier::parse("inexperienced"), Some(ExperienceTier::Beginner));
        assert_eq!(ExperienceTier::parse("Not very experienced"), Some(ExperienceTier::Beginner));
        assert_eq!(ExperienceTier::parse("no experience"), Some(ExperienceTier::Beginner));
        assert_eq!(ExperienceTier::parse("some experience"), Some(ExperienceTier::Intermediate));
        assert_eq!(ExperienceTier::parse("very experienced"), Some(ExperienceTier::Advanced));
    }

    #[test]
    fn test_goal_parsing() {
        assert_eq!(GoalKind::parse("Fat Loss"), Some(GoalKind::FatLoss));
        assert_eq!(GoalKind::parse("Build Muscle"), Some(GoalKind::MuscleGain));
        assert_eq!(GoalKind::parse("Both"), Some(GoalKind::Recomposition));
        assert_eq!(GoalKind::parse("lose fat and build muscle"), Some(GoalKind::Recomposition));
        assert_eq!(GoalKind::parse("stay healthy"), Some(GoalKind::Maintenance));
        assert_eq!(GoalKind::parse(""), None);
    }

    #[test]
    fn test_tier_distance() {
        assert_eq!(ExperienceTier::Beginner.distance(&ExperienceTier::Advanced), 2);
        assert_eq!(ExperienceTier::Advanced.distance(&ExperienceTier::Intermediate), 1);
        assert_eq!(ExperienceTier::Intermediate.distance(&ExperienceTier::Intermediate), 0);
    }

    #[test]
    fn test_rule_set_evaluation_order_and_points() {
        let rules = RuleSet::new(vec![
            Rule { key: "a", weight: 10.0, eval: always },
            Rule { key: "b", weight: 20.0, eval: never },
            Rule { key: "c", weight: 10.0, eval: half },
        ]);

        let profile = ClientProfile::default();
        let ctx = ScoringContext::new(&profile);
        let (points, reasons) = rules.evaluate(&ctx, &());
        assert_eq!(points, 15.0);
        assert_eq!(reasons, vec!["always", "half"]);
        assert_eq!(rules.max_points(), 40.0);

        let (score, _) = rules.score(&ctx, &());
        assert_eq!(score, 38);
    }

    #[test]
    fn test_zero_weight_rule_is_skipped() {
        let rules = RuleSet::new(vec![Rule { key: "a", weight: 0.0, eval: always }]);
        let profile = ClientProfile::default();
        let (score, reasons) = rules.score(&ScoringContext::new(&profile), &());
        assert_eq!(score, 0);
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_normalize_score_bounds() {
        assert_eq!(normalize_score(0.0, 0.0), 0);
        assert_eq!(normalize_score(150.0, 100.0), 100);
        assert_eq!(normalize_score(-5.0, 100.0), 0);
        assert_eq!(normalize_score(f64::NAN, 100.0), 0);
        assert_eq!(normalize_score(42.4, 100.0), 42);
    }
}
