//! Coach Engine - template recommendation and LLM payload recovery
//!
//! This library provides the pure algorithms behind the coaching platform's
//! "recommended for you" cards and its content-generation functions:
//! a two-stage category/template matcher driven by weighted rules, nutrition
//! target estimation, and a resilient extractor for truncated JSON arrays.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{
    compute_nutrition_targets, extract_array, extract_array_with_report, extract_items,
    match_quality, MatchQuality, NutritionSettings, TemplateMatcher, UnrecoverableParseError,
};
pub use crate::models::{
    CatalogKind, Category, ClientProfile, NutritionTargets, Recommendation, ScoredCandidate,
    ScoringWeights, Template,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(match_quality(85), MatchQuality::Excellent);
        assert!(extract_array("[]").unwrap().is_empty());
    }
}
