use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{match_quality, QualityBadge};
use crate::models::{
    HealthResponse, NutritionTargetsRequest, NutritionTargetsResponse,
    Recommendation, RecommendRequest, RecommendResponse, ScoreCategoriesRequest,
    ScoreTemplatesRequest, ScoredCategoriesResponse, ScoredTemplatesResponse,
};
use crate::routes::{validation_failed, AppState};

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations/workout", web::post().to(recommend_workout))
        .route("/recommendations/nutrition", web::post().to(recommend_nutrition))
        .route("/categories/score", web::post().to(score_categories))
        .route("/templates/score", web::post().to(score_templates))
        .route("/nutrition/targets", web::post().to(nutrition_targets));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn recommend_response(recommendation: Option<Recommendation>) -> RecommendResponse {
    let category_quality = recommendation
        .as_ref()
        .map(|r| QualityBadge::from(match_quality(i64::from(r.category.score))));
    let template_quality = recommendation
        .as_ref()
        .and_then(|r| r.template.as_ref())
        .map(|t| QualityBadge::from(match_quality(i64::from(t.score))));

    RecommendResponse {
        request_id: uuid::Uuid::new_v4().to_string(),
        recommendation,
        category_quality,
        template_quality,
        generated_at: chrono::Utc::now(),
    }
}

/// Workout recommendation endpoint
///
/// POST /api/v1/recommendations/workout
///
/// Request body:
/// ```json
/// {
///   "profile": { "experienceLevel": "beginner", "trainingDaysPerWeek": 3 },
///   "categories": [ { "id": "c1", "name": "Foundations" } ],
///   "templates": [ { "id": "t1", "categoryId": "c1", "name": "3-Day Full Body" } ]
/// }
/// ```
async fn recommend_workout(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    tracing::info!(
        "Recommending workout from {} categories and {} templates",
        req.categories.len(),
        req.templates.len()
    );

    let recommendation = state
        .matcher
        .recommend(&req.profile, &req.categories, &req.templates);

    if recommendation.is_none() {
        tracing::info!("Empty category catalog, no workout recommendation");
    }

    HttpResponse::Ok().json(recommend_response(recommendation))
}

/// Nutrition recommendation endpoint
///
/// POST /api/v1/recommendations/nutrition
async fn recommend_nutrition(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    tracing::info!(
        "Recommending nutrition plan from {} categories and {} templates",
        req.categories.len(),
        req.templates.len()
    );

    let recommendation = state
        .matcher
        .recommend_nutrition(&req.profile, &req.categories, &req.templates);

    HttpResponse::Ok().json(recommend_response(recommendation))
}

/// Rank a category catalog
///
/// POST /api/v1/categories/score
async fn score_categories(
    state: web::Data<AppState>,
    req: web::Json<ScoreCategoriesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let categories = state
        .matcher
        .score_categories(&req.profile, &req.categories, req.kind);

    tracing::debug!("Scored {} {:?} categories", categories.len(), req.kind);

    HttpResponse::Ok().json(ScoredCategoriesResponse {
        total_results: categories.len(),
        categories,
    })
}

/// Rank the templates of one category
///
/// POST /api/v1/templates/score
async fn score_templates(
    state: web::Data<AppState>,
    req: web::Json<ScoreTemplatesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let templates = state
        .matcher
        .score_templates(&req.profile, &req.templates, &req.category, req.kind);

    tracing::debug!(
        "Scored {} of {} templates in category {}",
        templates.len(),
        req.templates.len(),
        req.category.id
    );

    HttpResponse::Ok().json(ScoredTemplatesResponse {
        category_id: req.category.id.clone(),
        total_results: templates.len(),
        templates,
    })
}

/// Estimate BMR, TDEE and calorie target
///
/// POST /api/v1/nutrition/targets
async fn nutrition_targets(
    state: web::Data<AppState>,
    req: web::Json<NutritionTargetsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let targets = state.matcher.nutrition_targets(&req.profile);

    HttpResponse::Ok().json(NutritionTargetsResponse {
        available: targets.tdee.is_some(),
        targets,
    })
}
