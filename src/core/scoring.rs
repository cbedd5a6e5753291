use crate::core::rules::{
    contains_any, normalize, normalize_opt, ExperienceTier, GoalKind, Rule, RuleHit, RuleSet,
    ScoringContext,
};
use crate::models::{
    CatalogKind, Category, CategoryWeights, ClientProfile, NutritionWeights, ScoringWeights,
    Template, TemplateWeights,
};

const LOW_IMPACT_KEYWORDS: &[&str] = &[
    "low impact", "low-impact", "joint", "rehab", "mobility", "injury", "gentle",
];

/// Equipment access class inferred from the client's equipment answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentAccess {
    Bodyweight,
    Home,
    Gym,
}

impl EquipmentAccess {
    pub fn from_profile(profile: &ClientProfile) -> Option<Self> {
        let items: Vec<String> = profile.equipment_list().iter().map(|e| normalize(e)).collect();
        if items.is_empty() {
            return None;
        }
        if items.iter().any(|e| contains_any(e, &["gym", "barbell", "machine", "cable", "rack"])) {
            Some(Self::Gym)
        } else if items
            .iter()
            .any(|e| contains_any(e, &["home", "dumbbell", "kettlebell", "band", "bench"]))
        {
            Some(Self::Home)
        } else {
            Some(Self::Bodyweight)
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bodyweight => "bodyweight",
            Self::Home => "home",
            Self::Gym => "full gym",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Bodyweight => &["bodyweight", "no equipment", "calisthenics", "anywhere"],
            Self::Home => &["home", "dumbbell", "minimal equipment", "kettlebell"],
            Self::Gym => &["gym", "barbell", "machine", "powerlifting"],
        }
    }
}

/// Coarse body-fat bucket from a free-text estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFatBucket {
    Lean,
    Average,
    High,
}

impl BodyFatBucket {
    pub fn parse(value: &str) -> Option<Self> {
        let value = normalize(value);
        if value.is_empty() {
            return None;
        }
        if contains_any(&value, &["high", "above", "over", "30", "35", "40"]) {
            Some(Self::High)
        } else if contains_any(&value, &["low", "lean", "athletic", "10", "12", "15"]) {
            Some(Self::Lean)
        } else {
            Some(Self::Average)
        }
    }
}

/// Parse a session length answer ("45 minutes", "short", "1 hour") into minutes
pub fn parse_session_minutes(value: &str) -> Option<u16> {
    let value = normalize(value);
    let digits: String = value
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if let Ok(number) = digits.parse::<u16>() {
        if value.contains("hour") || value.contains("hr") {
            return Some(number.saturating_mul(60));
        }
        return Some(number);
    }

    if contains_any(&value, &["short", "quick", "express"]) {
        Some(30)
    } else if contains_any(&value, &["hour", "long"]) {
        Some(60)
    } else if contains_any(&value, &["medium", "moderate"]) {
        Some(45)
    } else {
        None
    }
}

/// Fraction of `required` items covered by `available`; `None` if nothing is reported
pub fn equipment_coverage(available: &[String], required: &[String]) -> Option<f64> {
    let available: Vec<String> = available.iter().map(|e| normalize(e)).collect();
    if available.is_empty() {
        return None;
    }

    let required: Vec<String> = required
        .iter()
        .map(|e| normalize(e))
        .filter(|e| !e.is_empty() && !contains_any(e, &["bodyweight", "none"]))
        .collect();
    if required.is_empty() {
        return Some(1.0);
    }

    let full_gym = available.iter().any(|e| e.contains("gym"));
    let covered = required
        .iter()
        .filter(|item| {
            full_gym
                || available
                    .iter()
                    .any(|have| have.contains(item.as_str()) || item.contains(have.as_str()))
        })
        .count();

    Some(covered as f64 / required.len() as f64)
}

fn restriction_terms(profile: &ClientProfile) -> Vec<String> {
    profile
        .restrictions()
        .iter()
        .map(|r| normalize(r))
        .filter(|r| !r.is_empty() && !matches!(r.as_str(), "none" | "no" | "n/a"))
        .collect()
}

fn meal_prep_keywords(preference: &str) -> &'static [&'static str] {
    if contains_any(preference, &["batch", "prep", "sunday", "bulk cook"]) {
        &["batch", "meal prep", "prep"]
    } else if contains_any(preference, &["quick", "minimal", "simple", "busy", "no time"]) {
        &["quick", "simple", "easy", "minimal"]
    } else if contains_any(preference, &["eat out", "restaurant", "flexible", "on the go"]) {
        &["flexible", "eating out", "restaurant", "on the go"]
    } else {
        &["cook", "recipe", "variety"]
    }
}

// Workout category rules

fn category_experience(ctx: &ScoringContext<'_>, category: &Category) -> Option<RuleHit> {
    let tier = ctx.profile.experience_level.as_deref().and_then(ExperienceTier::parse)?;
    let text = category.searchable_text();
    if contains_any(&text, tier.keywords()) {
        return Some(RuleHit::full(format!("Designed for {} lifters", tier.label())));
    }
    if contains_any(&text, &["all levels", "any level", "all experience"]) {
        return Some(RuleHit::partial(0.5, "Suitable for all experience levels"));
    }
    None
}

fn category_goal(ctx: &ScoringContext<'_>, category: &Category) -> Option<RuleHit> {
    let goal = GoalKind::from_profile(ctx.profile)?;
    let text = category.searchable_text();
    if contains_any(&text, goal.keywords()) {
        return Some(RuleHit::full(format!("Built around your {} goal", goal.label())));
    }
    if goal == GoalKind::Recomposition
        && (contains_any(&text, GoalKind::FatLoss.keywords())
            || contains_any(&text, GoalKind::MuscleGain.keywords()))
    {
        return Some(RuleHit::partial(0.5, "Covers part of your body recomposition goal"));
    }
    None
}

fn category_training_style(ctx: &ScoringContext<'_>, category: &Category) -> Option<RuleHit> {
    let style = normalize_opt(ctx.profile.training_style.as_deref())?;
    let text = category.searchable_text();
    let fired = text.contains(&style)
        || style
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| word.len() >= 4)
            .any(|word| text.contains(word));
    fired.then(|| RuleHit::full(format!("Matches your preferred {} training style", style)))
}

fn category_equipment(ctx: &ScoringContext<'_>, category: &Category) -> Option<RuleHit> {
    let access = EquipmentAccess::from_profile(ctx.profile)?;
    contains_any(&category.searchable_text(), access.keywords())
        .then(|| RuleHit::full(format!("Fits your {} equipment setup", access.label())))
}

fn category_injuries(ctx: &ScoringContext<'_>, category: &Category) -> Option<RuleHit> {
    ctx.profile.reported_injuries()?;
    contains_any(&category.searchable_text(), LOW_IMPACT_KEYWORDS)
        .then(|| RuleHit::full("Joint-friendly approach for your reported injuries"))
}

fn category_body_composition(ctx: &ScoringContext<'_>, category: &Category) -> Option<RuleHit> {
    let bucket = ctx.profile.body_fat.as_deref().and_then(BodyFatBucket::parse)?;
    let text = category.searchable_text();
    let fired = match bucket {
        BodyFatBucket::High => contains_any(&text, GoalKind::FatLoss.keywords()),
        BodyFatBucket::Lean => contains_any(&text, GoalKind::MuscleGain.keywords()),
        BodyFatBucket::Average => contains_any(&text, GoalKind::Recomposition.keywords()),
    };
    fired.then(|| RuleHit::full("Suits your current body composition"))
}

// Workout template rules

fn template_difficulty(ctx: &ScoringContext<'_>, template: &Template) -> Option<RuleHit> {
    let tier = ctx.profile.experience_level.as_deref().and_then(ExperienceTier::parse)?;
    let difficulty = template.difficulty.as_deref().and_then(ExperienceTier::parse)?;
    match tier.distance(&difficulty) {
        0 => Some(RuleHit::full(format!(
            "Difficulty matches your {} experience",
            tier.label()
        ))),
        1 => Some(RuleHit::partial(
            0.5,
            format!("Difficulty ({}) is one step from your level", difficulty.label()),
        )),
        _ => None,
    }
}

fn template_days_per_week(ctx: &ScoringContext<'_>, template: &Template) -> Option<RuleHit> {
    let wanted = ctx.profile.training_days_per_week?;
    let offered = template.days_per_week?;
    match wanted.abs_diff(offered) {
        0 => Some(RuleHit::full(format!("Fits your {}-day training week", wanted))),
        1 => Some(RuleHit::partial(
            0.5,
            format!("{} days per week, close to your {}", offered, wanted),
        )),
        _ => None,
    }
}

fn template_equipment(ctx: &ScoringContext<'_>, template: &Template) -> Option<RuleHit> {
    let coverage = equipment_coverage(ctx.profile.equipment_list(), &template.equipment)?;
    if coverage >= 1.0 {
        Some(RuleHit::full("You have all the equipment it needs"))
    } else if coverage > 0.0 {
        Some(RuleHit::partial(
            coverage,
            format!("You have {:.0}% of the equipment it needs", coverage * 100.0),
        ))
    } else {
        None
    }
}

fn template_goal(ctx: &ScoringContext<'_>, template: &Template) -> Option<RuleHit> {
    let goal = GoalKind::from_profile(ctx.profile)?;
    contains_any(&template.searchable_text(), goal.keywords())
        .then(|| RuleHit::full(format!("Programmed for {}", goal.label())))
}

fn template_session_length(ctx: &ScoringContext<'_>, template: &Template) -> Option<RuleHit> {
    let wanted = ctx.profile.session_length.as_deref().and_then(parse_session_minutes)?;
    let offered = template.session_minutes?;
    match wanted.abs_diff(offered) {
        0..=15 => Some(RuleHit::full(format!("Sessions fit your {}-minute window", wanted))),
        16..=30 => Some(RuleHit::partial(
            0.5,
            format!("{}-minute sessions, near your {}-minute window", offered, wanted),
        )),
        _ => None,
    }
}

fn template_injuries(ctx: &ScoringContext<'_>, template: &Template) -> Option<RuleHit> {
    ctx.profile.reported_injuries()?;
    contains_any(&template.searchable_text(), LOW_IMPACT_KEYWORDS)
        .then(|| RuleHit::full("Low-impact options for your reported injuries"))
}

// Nutrition category rules

fn nutrition_category_goal(ctx: &ScoringContext<'_>, category: &Category) -> Option<RuleHit> {
    let goal = GoalKind::from_profile(ctx.profile)?;
    contains_any(&category.searchable_text(), goal.keywords())
        .then(|| RuleHit::full(format!("Nutrition approach built for {}", goal.label())))
}

fn dietary_hit(profile: &ClientProfile, text: &str) -> Option<RuleHit> {
    let terms = restriction_terms(profile);
    if terms.is_empty() {
        return None;
    }
    let matched: Vec<&str> = terms
        .iter()
        .filter(|term| text.contains(term.as_str()))
        .map(String::as_str)
        .collect();
    if matched.is_empty() {
        return None;
    }
    Some(RuleHit::partial(
        matched.len() as f64 / terms.len() as f64,
        format!("Accommodates your {} preference", matched.join(", ")),
    ))
}

fn nutrition_category_dietary(ctx: &ScoringContext<'_>, category: &Category) -> Option<RuleHit> {
    dietary_hit(ctx.profile, &category.searchable_text())
}

fn nutrition_category_meal_prep(ctx: &ScoringContext<'_>, category: &Category) -> Option<RuleHit> {
    let preference = normalize_opt(ctx.profile.meal_prep_preference.as_deref())?;
    contains_any(&category.searchable_text(), meal_prep_keywords(&preference))
        .then(|| RuleHit::full("Fits how you like to prepare meals"))
}

// Nutrition template rules

fn nutrition_template_calories(ctx: &ScoringContext<'_>, template: &Template) -> Option<RuleHit> {
    let target = ctx.targets.target_calories.filter(|t| *t > 0)?;
    let min = template.calorie_min?;
    let max = template.calorie_max.unwrap_or(min).max(min);

    if (min..=max).contains(&target) {
        return Some(RuleHit::full(format!(
            "Calorie range covers your {} kcal target",
            target
        )));
    }

    // Partial credit within 10% of the nearest bound
    let nearest = if target < min { min } else { max };
    let gap = target.abs_diff(nearest) as f64 / target as f64;
    (gap <= 0.10).then(|| {
        RuleHit::partial(
            1.0 - gap / 0.10 * 0.5,
            format!("Calorie range is close to your {} kcal target", target),
        )
    })
}

fn nutrition_template_protein(ctx: &ScoringContext<'_>, template: &Template) -> Option<RuleHit> {
    let weight = ctx.profile.weight_kg.filter(|w| *w > 0.0)?;
    let protein = template.protein_target_g? as f64;
    let per_kg = protein / weight;
    if (1.6..=2.2).contains(&per_kg) {
        Some(RuleHit::full("Protein target suits your body weight"))
    } else if (1.2..=2.8).contains(&per_kg) {
        Some(RuleHit::partial(0.5, "Protein target is reasonable for your body weight"))
    } else {
        None
    }
}

fn nutrition_template_goal(ctx: &ScoringContext<'_>, template: &Template) -> Option<RuleHit> {
    let goal = GoalKind::from_profile(ctx.profile)?;
    contains_any(&template.searchable_text(), goal.keywords())
        .then(|| RuleHit::full(format!("Meal plan aimed at {}", goal.label())))
}

fn nutrition_template_dietary(ctx: &ScoringContext<'_>, template: &Template) -> Option<RuleHit> {
    dietary_hit(ctx.profile, &template.searchable_text())
}

fn nutrition_template_meal_prep(ctx: &ScoringContext<'_>, template: &Template) -> Option<RuleHit> {
    let preference = normalize_opt(ctx.profile.meal_prep_preference.as_deref())?;
    contains_any(&template.searchable_text(), meal_prep_keywords(&preference))
        .then(|| RuleHit::full("Matches your meal prep style"))
}

/// Workout category rules, most specific first
pub fn workout_category_rules(weights: &CategoryWeights) -> RuleSet<Category> {
    RuleSet::new(vec![
        Rule { key: "goal", weight: weights.goal, eval: category_goal },
        Rule { key: "experience", weight: weights.experience, eval: category_experience },
        Rule { key: "training_style", weight: weights.training_style, eval: category_training_style },
        Rule { key: "equipment", weight: weights.equipment, eval: category_equipment },
        Rule { key: "injuries", weight: weights.injuries, eval: category_injuries },
        Rule { key: "body_composition", weight: weights.body_composition, eval: category_body_composition },
    ])
}

/// Workout template rules, most specific first
pub fn workout_template_rules(weights: &TemplateWeights) -> RuleSet<Template> {
    RuleSet::new(vec![
        Rule { key: "difficulty", weight: weights.difficulty, eval: template_difficulty },
        Rule { key: "days_per_week", weight: weights.days_per_week, eval: template_days_per_week },
        Rule { key: "equipment", weight: weights.equipment, eval: template_equipment },
        Rule { key: "goal", weight: weights.goal, eval: template_goal },
        Rule { key: "session_length", weight: weights.session_length, eval: template_session_length },
        Rule { key: "injuries", weight: weights.injuries, eval: template_injuries },
    ])
}

/// Nutrition category rules
pub fn nutrition_category_rules(weights: &NutritionWeights) -> RuleSet<Category> {
    RuleSet::new(vec![
        Rule { key: "goal", weight: weights.goal, eval: nutrition_category_goal },
        Rule { key: "dietary", weight: weights.dietary, eval: nutrition_category_dietary },
        Rule { key: "meal_prep", weight: weights.meal_prep, eval: nutrition_category_meal_prep },
        Rule { key: "body_composition", weight: weights.body_composition, eval: category_body_composition },
    ])
}

/// Nutrition template rules
pub fn nutrition_template_rules(weights: &NutritionWeights) -> RuleSet<Template> {
    RuleSet::new(vec![
        Rule { key: "calories", weight: weights.calories, eval: nutrition_template_calories },
        Rule { key: "protein", weight: weights.protein, eval: nutrition_template_protein },
        Rule { key: "goal", weight: weights.goal, eval: nutrition_template_goal },
        Rule { key: "dietary", weight: weights.dietary, eval: nutrition_template_dietary },
        Rule { key: "meal_prep", weight: weights.meal_prep, eval: nutrition_template_meal_prep },
    ])
}

/// Category rule table for a catalog kind
pub fn category_rules(kind: CatalogKind, weights: &ScoringWeights) -> RuleSet<Category> {
    match kind {
        CatalogKind::Workout => workout_category_rules(&weights.category),
        CatalogKind::Nutrition => nutrition_category_rules(&weights.nutrition),
    }
}

/// Template rule table for a catalog kind
pub fn template_rules(kind: CatalogKind, weights: &ScoringWeights) -> RuleSet<Template> {
    match kind {
        CatalogKind::Workout => workout_template_rules(&weights.template),
        CatalogKind::Nutrition => nutrition_template_rules(&weights.nutrition),
    }
}
