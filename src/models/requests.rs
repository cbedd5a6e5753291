use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{CatalogKind, Category, ClientProfile, Template};

/// Request for a category-then-template recommendation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(nested)]
    #[serde(default)]
    pub profile: ClientProfile,
    pub categories: Vec<Category>,
    #[serde(default)]
    pub templates: Vec<Template>,
}

/// Request to rank a category catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreCategoriesRequest {
    #[validate(nested)]
    #[serde(default)]
    pub profile: ClientProfile,
    pub categories: Vec<Category>,
    #[serde(default)]
    pub kind: CatalogKind,
}

/// Request to rank the templates of one category
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreTemplatesRequest {
    #[validate(nested)]
    #[serde(default)]
    pub profile: ClientProfile,
    pub category: Category,
    pub templates: Vec<Template>,
    #[serde(default)]
    pub kind: CatalogKind,
}

/// Request to estimate energy needs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NutritionTargetsRequest {
    #[validate(nested)]
    #[serde(default)]
    pub profile: ClientProfile,
}

/// Raw model output to salvage a JSON array from
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExtractRequest {
    #[validate(length(min = 1))]
    pub raw: String,
}
