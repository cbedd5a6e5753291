use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::QualityBadge;
use crate::models::domain::{Category, NutritionTargets, Recommendation, ScoredCandidate, Template};

/// Response for the recommendation endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub request_id: String,
    pub recommendation: Option<Recommendation>,
    pub category_quality: Option<QualityBadge>,
    pub template_quality: Option<QualityBadge>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Ranked categories
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCategoriesResponse {
    pub categories: Vec<ScoredCandidate<Category>>,
    pub total_results: usize,
}

/// Ranked templates of one category
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTemplatesResponse {
    pub category_id: String,
    pub templates: Vec<ScoredCandidate<Template>>,
    pub total_results: usize,
}

/// Estimated energy needs
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTargetsResponse {
    #[serde(flatten)]
    pub targets: NutritionTargets,
    pub available: bool,
}

/// Array salvaged from model output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub items: Vec<Value>,
    pub count: usize,
    pub recovered: bool,
    pub discarded_bytes: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
