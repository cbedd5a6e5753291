use serde::{Deserialize, Serialize};
use validator::Validate;

/// Self-reported client attributes, as read from the profile store
///
/// Every field is optional. Free-text fields are compared after normalisation,
/// so callers can pass values straight from intake forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClientProfile {
    #[serde(alias = "experienceLevel")]
    pub experience_level: Option<String>,
    pub goal: Option<String>,
    #[serde(alias = "bodyFat")]
    pub body_fat: Option<String>,
    #[serde(alias = "activityLevel")]
    pub activity_level: Option<String>,
    #[validate(range(min = 1, max = 7))]
    #[serde(alias = "trainingDaysPerWeek")]
    pub training_days_per_week: Option<u8>,
    pub equipment: Option<Vec<String>>,
    pub injuries: Option<String>,
    #[serde(alias = "trainingStyle")]
    pub training_style: Option<String>,
    #[serde(alias = "sessionLength")]
    pub session_length: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "weightKg")]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "heightCm")]
    pub height_cm: Option<f64>,
    #[validate(range(min = 1, max = 120))]
    pub age: Option<u8>,
    pub gender: Option<String>,
    #[serde(alias = "dietaryRestrictions")]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(alias = "mealPrepPreference")]
    pub meal_prep_preference: Option<String>,
    #[serde(alias = "goalType")]
    pub goal_type: Option<String>,
}

impl ClientProfile {
    /// Helper to get the equipment list, empty when not reported
    pub fn equipment_list(&self) -> &[String] {
        self.equipment.as_deref().unwrap_or(&[])
    }

    /// Helper to get dietary restrictions, empty when not reported
    pub fn restrictions(&self) -> &[String] {
        self.dietary_restrictions.as_deref().unwrap_or(&[])
    }

    /// Reported injuries, ignoring placeholder answers like "none" or "n/a"
    pub fn reported_injuries(&self) -> Option<&str> {
        let injuries = self.injuries.as_deref()?.trim();
        let lowered = injuries.to_lowercase();
        if injuries.is_empty() || matches!(lowered.as_str(), "none" | "no" | "n/a" | "na" | "-") {
            return None;
        }
        Some(injuries)
    }
}

/// A grouping of templates sharing one training or nutrition philosophy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "targetProfile")]
    pub target_profile: Option<String>,
    #[serde(default)]
    pub criteria: Vec<String>,
}

impl Category {
    /// All descriptive text the category carries, lower-cased, for keyword matching
    pub fn searchable_text(&self) -> String {
        let mut text = self.name.to_lowercase();
        for part in [&self.description, &self.target_profile].into_iter().flatten() {
            text.push(' ');
            text.push_str(&part.to_lowercase());
        }
        for tag in &self.criteria {
            text.push(' ');
            text.push_str(&tag.to_lowercase());
        }
        text
    }
}

/// A concrete, assignable workout or meal plan belonging to one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(alias = "categoryId")]
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default, alias = "daysPerWeek")]
    pub days_per_week: Option<u8>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default, alias = "sessionMinutes")]
    pub session_minutes: Option<u16>,
    #[serde(default, alias = "calorieMin")]
    pub calorie_min: Option<u32>,
    #[serde(default, alias = "calorieMax")]
    pub calorie_max: Option<u32>,
    #[serde(default, alias = "proteinTargetG")]
    pub protein_target_g: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Template {
    /// Name, description and tags, lower-cased, for keyword matching
    pub fn searchable_text(&self) -> String {
        let mut text = self.name.to_lowercase();
        if let Some(description) = &self.description {
            text.push(' ');
            text.push_str(&description.to_lowercase());
        }
        for tag in &self.tags {
            text.push(' ');
            text.push_str(&tag.to_lowercase());
        }
        text
    }
}

/// Which rule tables a catalog is scored with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    #[default]
    Workout,
    Nutrition,
}

/// A candidate together with its 0-100 match score and the rules that fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate<T> {
    pub candidate: T,
    pub score: u8,
    pub reasons: Vec<String>,
}

impl<T> ScoredCandidate<T> {
    /// The first `n` reasons, most specific rules first
    pub fn top_reasons(&self, n: usize) -> &[String] {
        &self.reasons[..self.reasons.len().min(n)]
    }
}

/// Estimated energy needs derived from the profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTargets {
    pub bmr: Option<u32>,
    pub tdee: Option<u32>,
    pub target_calories: Option<u32>,
}

/// Category-then-template recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: ScoredCandidate<Category>,
    pub template: Option<ScoredCandidate<Template>>,
    #[serde(default)]
    pub alternatives: Vec<ScoredCandidate<Template>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tdee: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_calories: Option<u32>,
}

/// Category rule weights (points awarded when the rule fully fires)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub experience: f64,
    pub goal: f64,
    pub training_style: f64,
    pub equipment: f64,
    pub injuries: f64,
    pub body_composition: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            experience: 25.0,
            goal: 30.0,
            training_style: 15.0,
            equipment: 15.0,
            injuries: 10.0,
            body_composition: 5.0,
        }
    }
}

/// Template rule weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateWeights {
    pub difficulty: f64,
    pub days_per_week: f64,
    pub equipment: f64,
    pub goal: f64,
    pub session_length: f64,
    pub injuries: f64,
}

impl Default for TemplateWeights {
    fn default() -> Self {
        Self {
            difficulty: 25.0,
            days_per_week: 25.0,
            equipment: 20.0,
            goal: 15.0,
            session_length: 10.0,
            injuries: 5.0,
        }
    }
}

/// Nutrition category and template rule weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionWeights {
    pub goal: f64,
    pub dietary: f64,
    pub meal_prep: f64,
    pub body_composition: f64,
    pub calories: f64,
    pub protein: f64,
}

impl Default for NutritionWeights {
    fn default() -> Self {
        Self {
            goal: 35.0,
            dietary: 25.0,
            meal_prep: 15.0,
            body_composition: 10.0,
            calories: 35.0,
            protein: 20.0,
        }
    }
}

/// Scoring weights for every rule table
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub category: CategoryWeights,
    pub template: TemplateWeights,
    pub nutrition: NutritionWeights,
}
