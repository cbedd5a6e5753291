use crate::core::{
    nutrition::{compute_nutrition_targets, NutritionSettings},
    rules::{RuleSet, ScoringContext},
    scoring::{category_rules, template_rules},
};
use crate::models::{
    CatalogKind, Category, ClientProfile, NutritionTargets, Recommendation, ScoredCandidate,
    ScoringWeights, Template,
};

/// Runner-up templates returned next to the best one
const MAX_ALTERNATIVES: usize = 2;

/// Template recommendation orchestrator - implements the two-stage funnel
///
/// # Pipeline Stages
/// 1. Score every category against the profile and pick the best
/// 2. Keep only templates belonging to that category
/// 3. Score and rank those templates
///
/// Scores are only comparable within one call: every candidate in a call is
/// normalised against the same rule-set maximum.
#[derive(Debug, Clone)]
pub struct TemplateMatcher {
    weights: ScoringWeights,
    nutrition: NutritionSettings,
}

impl TemplateMatcher {
    pub fn new(weights: ScoringWeights, nutrition: NutritionSettings) -> Self {
        Self { weights, nutrition }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), NutritionSettings::default())
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score and rank categories, highest first; ties keep catalog order
    pub fn score_categories(
        &self,
        profile: &ClientProfile,
        categories: &[Category],
        kind: CatalogKind,
    ) -> Vec<ScoredCandidate<Category>> {
        let ctx = ScoringContext::new(profile);
        rank(&category_rules(kind, &self.weights), &ctx, categories.iter())
    }

    /// The single best category, or `None` for an empty catalog
    ///
    /// No minimum score applies; use the match quality to judge a weak winner.
    pub fn recommend_category(
        &self,
        profile: &ClientProfile,
        categories: &[Category],
        kind: CatalogKind,
    ) -> Option<ScoredCandidate<Category>> {
        self.score_categories(profile, categories, kind).into_iter().next()
    }

    /// Score and rank the templates that belong to `category`
    ///
    /// Templates from other categories are never returned, whatever they would score.
    pub fn score_templates(
        &self,
        profile: &ClientProfile,
        templates: &[Template],
        category: &Category,
        kind: CatalogKind,
    ) -> Vec<ScoredCandidate<Template>> {
        let targets = match kind {
            CatalogKind::Nutrition => self.nutrition_targets(profile),
            CatalogKind::Workout => NutritionTargets::default(),
        };
        let ctx = ScoringContext::with_targets(profile, targets);
        self.rank_templates(&ctx, templates, category, kind)
    }

    /// BMR, TDEE and calorie target with this matcher's offsets
    pub fn nutrition_targets(&self, profile: &ClientProfile) -> NutritionTargets {
        compute_nutrition_targets(profile, &self.nutrition)
    }

    /// Workout recommendation: best category, then its best template
    pub fn recommend(
        &self,
        profile: &ClientProfile,
        categories: &[Category],
        templates: &[Template],
    ) -> Option<Recommendation> {
        let ctx = ScoringContext::new(profile);
        self.funnel(&ctx, categories, templates, CatalogKind::Workout)
    }

    /// Nutrition recommendation, carrying TDEE and calorie target when computable
    pub fn recommend_nutrition(
        &self,
        profile: &ClientProfile,
        categories: &[Category],
        templates: &[Template],
    ) -> Option<Recommendation> {
        let targets = self.nutrition_targets(profile);
        if targets.tdee.is_none() {
            tracing::debug!("No numeric nutrition target available; scoring without calories");
        }

        let ctx = ScoringContext::with_targets(profile, targets);
        let mut recommendation = self.funnel(&ctx, categories, templates, CatalogKind::Nutrition)?;
        recommendation.tdee = targets.tdee;
        recommendation.target_calories = targets.target_calories;
        Some(recommendation)
    }

    fn funnel(
        &self,
        ctx: &ScoringContext<'_>,
        categories: &[Category],
        templates: &[Template],
        kind: CatalogKind,
    ) -> Option<Recommendation> {
        // Stage 1: category
        let category = rank(&category_rules(kind, &self.weights), ctx, categories.iter())
            .into_iter()
            .next()?;

        // Stage 2 & 3: templates within the chosen category
        let mut ranked = self
            .rank_templates(ctx, templates, &category.candidate, kind)
            .into_iter();
        let template = ranked.next();
        let alternatives: Vec<_> = ranked.take(MAX_ALTERNATIVES).collect();

        tracing::debug!(
            "Recommended category {} (score {}) with template {:?} ({} alternatives)",
            category.candidate.id,
            category.score,
            template.as_ref().map(|t| t.candidate.id.as_str()),
            alternatives.len()
        );

        Some(Recommendation {
            category,
            template,
            alternatives,
            tdee: None,
            target_calories: None,
        })
    }

    fn rank_templates(
        &self,
        ctx: &ScoringContext<'_>,
        templates: &[Template],
        category: &Category,
        kind: CatalogKind,
    ) -> Vec<ScoredCandidate<Template>> {
        let in_category = templates.iter().filter(|t| t.category_id == category.id);
        rank(&template_rules(kind, &self.weights), ctx, in_category)
    }
}

impl Default for TemplateMatcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Score every candidate with one rule set and sort descending
///
/// `sort_by` is stable, so equal scores keep their input order.
fn rank<'c, C: Clone + 'c>(
    rules: &RuleSet<C>,
    ctx: &ScoringContext<'_>,
    candidates: impl Iterator<Item = &'c C>,
) -> Vec<ScoredCandidate<C>> {
    let mut scored: Vec<ScoredCandidate<C>> = candidates
        .map(|candidate| {
            let (score, reasons) = rules.score(ctx, candidate);
            ScoredCandidate {
                candidate: candidate.clone(),
                score,
                reasons,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_category(id: &str, name: &str, description: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            target_profile: None,
            criteria: vec![],
        }
    }

    fn create_template(id: &str, category_id: &str, difficulty: &str, days: u8) -> Template {
        Template {
            id: id.to_string(),
            category_id: category_id.to_string(),
            name: format!("Template {}", id),
            description: None,
            difficulty: Some(difficulty.to_string()),
            days_per_week: Some(days),
            equipment: vec![],
            session_minutes: None,
            calorie_min: None,
            calorie_max: None,
            protein_target_g: None,
            tags: vec![],
        }
    }

    fn create_profile() -> ClientProfile {
        ClientProfile {
            experience_level: Some("Advanced".to_string()),
            goal: Some("Build muscle".to_string()),
            training_days_per_week: Some(4),
            equipment: Some(vec!["Full gym".to_string()]),
            ..Default::default()
        }
    }

    fn create_catalog() -> Vec<Category> {
        vec![
            create_category("fat", "Fat Loss Foundations", "Beginner conditioning at home"),
            create_category("hyp", "Advanced Hypertrophy", "Muscle building for experienced gym lifters"),
            create_category("gen", "General Fitness", "Balanced plan for all levels"),
        ]
    }

    #[test]
    fn test_best_category_first() {
        let matcher = TemplateMatcher::with_default_weights();
        let ranked = matcher.score_categories(&create_profile(), &create_catalog(), CatalogKind::Workout);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].candidate.id, "hyp");
        assert!(ranked[0].score > ranked[1].score);
        assert!(!ranked[0].reasons.is_empty());
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        let matcher = TemplateMatcher::with_default_weights();
        let ranked = matcher.score_categories(&ClientProfile::default(), &create_catalog(), CatalogKind::Workout);

        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().all(|c| c.score == 0 && c.reasons.is_empty()));
        // All tied, so catalog order is preserved
        let ids: Vec<_> = ranked.iter().map(|c| c.candidate.id.as_str()).collect();
        assert_eq!(ids, vec!["fat", "hyp", "gen"]);
    }

    #[test]
    fn test_recommend_category_without_floor() {
        let matcher = TemplateMatcher::with_default_weights();
        let only = vec![create_category("x", "Yoga", "Flexibility")];

        let best = matcher
            .recommend_category(&ClientProfile::default(), &only, CatalogKind::Workout)
            .unwrap();
        assert_eq!(best.score, 0);
        assert!(matcher.recommend_category(&create_profile(), &[], CatalogKind::Workout).is_none());
    }

    #[test]
    fn test_templates_scoped_to_category() {
        let matcher = TemplateMatcher::with_default_weights();
        let catalog = create_catalog();
        let templates = vec![
            create_template("perfect-elsewhere", "gen", "advanced", 4),
            create_template("in-a", "hyp", "intermediate", 5),
            create_template("in-b", "hyp", "advanced", 4),
        ];

        let ranked = matcher.score_templates(&create_profile(), &templates, &catalog[1], CatalogKind::Workout);

        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|t| t.candidate.category_id == "hyp"));
        assert_eq!(ranked[0].candidate.id, "in-b");
    }

    #[test]
    fn test_recommend_funnel() {
        let matcher = TemplateMatcher::with_default_weights();
        let templates = vec![
            create_template("a", "hyp", "advanced", 3),
            create_template("b", "hyp", "advanced", 4),
            create_template("c", "hyp", "beginner", 2),
            create_template("d", "hyp", "beginner", 6),
            create_template("e", "fat", "advanced", 4),
        ];

        let recommendation = matcher.recommend(&create_profile(), &create_catalog(), &templates).unwrap();

        assert_eq!(recommendation.category.candidate.id, "hyp");
        assert_eq!(recommendation.template.as_ref().unwrap().candidate.id, "b");
        assert_eq!(recommendation.alternatives.len(), MAX_ALTERNATIVES);
        assert_eq!(recommendation.alternatives[0].candidate.id, "a");
        assert!(recommendation.tdee.is_none());
    }

    #[test]
    fn test_recommend_without_templates() {
        let matcher = TemplateMatcher::with_default_weights();
        let recommendation = matcher.recommend(&create_profile(), &create_catalog(), &[]).unwrap();
        assert!(recommendation.template.is_none());
        assert!(recommendation.alternatives.is_empty());
    }
}
