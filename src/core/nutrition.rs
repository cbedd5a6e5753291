use serde::{Deserialize, Serialize};

use crate::core::rules::{contains_any, normalize, GoalKind};
use crate::models::{ClientProfile, NutritionTargets};

/// Mifflin-St Jeor sex constants; the midpoint is used when sex is unknown
const MALE_CONSTANT: f64 = 5.0;
const FEMALE_CONSTANT: f64 = -161.0;
const UNKNOWN_SEX_CONSTANT: f64 = -78.0;

/// Calorie offsets and floor applied on top of TDEE
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionSettings {
    pub fat_loss_deficit: u32,
    pub muscle_gain_surplus: u32,
    pub recomposition_deficit: u32,
    pub minimum_calories: u32,
}

impl Default for NutritionSettings {
    fn default() -> Self {
        Self {
            fat_loss_deficit: 500,
            muscle_gain_surplus: 300,
            recomposition_deficit: 0,
            minimum_calories: 1200,
        }
    }
}

/// Activity multiplier for a free-text activity level
///
/// - Sedentary: 1.2 (also used when the level is missing or unrecognised)
/// - Lightly active: 1.375
/// - Moderately active: 1.55
/// - Very active: 1.725
/// - Extra active: 1.9
pub fn activity_multiplier(activity_level: Option<&str>) -> f64 {
    let Some(level) = activity_level.map(normalize) else {
        return 1.2;
    };

    if contains_any(&level, &["extra", "extremely", "athlete", "physical job", "twice"]) {
        1.9
    } else if contains_any(&level, &["very"]) {
        1.725
    } else if contains_any(&level, &["moderate"]) {
        1.55
    } else if contains_any(&level, &["light"]) {
        1.375
    } else {
        1.2
    }
}

/// Basal metabolic rate via Mifflin-St Jeor, `None` for missing or non-positive inputs
pub fn basal_metabolic_rate(profile: &ClientProfile) -> Option<f64> {
    let weight = profile.weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
    let height = profile.height_cm.filter(|h| h.is_finite() && *h > 0.0)?;
    let age = f64::from(profile.age.filter(|a| *a > 0)?);

    let sex_constant = match profile.gender.as_deref().map(normalize).as_deref() {
        Some("male" | "m" | "man") => MALE_CONSTANT,
        Some("female" | "f" | "woman") => FEMALE_CONSTANT,
        _ => UNKNOWN_SEX_CONSTANT,
    };

    let bmr = 10.0 * weight + 6.25 * height - 5.0 * age + sex_constant;
    (bmr > 0.0).then_some(bmr)
}

/// Estimate BMR, TDEE and a goal-adjusted calorie target
///
/// Never produces NaN: when weight, height or age is missing every field is `None`.
pub fn compute_nutrition_targets(
    profile: &ClientProfile,
    settings: &NutritionSettings,
) -> NutritionTargets {
    let Some(bmr) = basal_metabolic_rate(profile) else {
        return NutritionTargets::default();
    };

    let tdee = bmr * activity_multiplier(profile.activity_level.as_deref());

    let adjusted = match GoalKind::from_profile(profile) {
        Some(GoalKind::FatLoss) => tdee - f64::from(settings.fat_loss_deficit),
        Some(GoalKind::MuscleGain) => tdee + f64::from(settings.muscle_gain_surplus),
        Some(GoalKind::Recomposition) => tdee - f64::from(settings.recomposition_deficit),
        Some(GoalKind::Maintenance) | None => tdee,
    };
    let target = adjusted.max(f64::from(settings.minimum_calories));

    NutritionTargets {
        bmr: Some(bmr.round() as u32),
        tdee: Some(tdee.round() as u32),
        target_calories: Some(target.round() as u32),
    }
}
