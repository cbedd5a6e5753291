// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CatalogKind, Category, CategoryWeights, ClientProfile, NutritionTargets, NutritionWeights,
    Recommendation, ScoredCandidate, ScoringWeights, Template, TemplateWeights,
};
pub use requests::{
    ExtractRequest, NutritionTargetsRequest, RecommendRequest, ScoreCategoriesRequest,
    ScoreTemplatesRequest,
};
pub use responses::{
    ErrorResponse, ExtractResponse, HealthResponse, NutritionTargetsResponse, RecommendResponse,
    ScoredCategoriesResponse, ScoredTemplatesResponse,
};
