// Core algorithm exports
pub mod matcher;
pub mod nutrition;
pub mod quality;
pub mod recovery;
pub mod rules;
pub mod scoring;

pub use matcher::TemplateMatcher;
pub use nutrition::{compute_nutrition_targets, NutritionSettings};
pub use quality::{match_quality, MatchQuality, QualityBadge};
pub use recovery::{extract_array, extract_array_with_report, extract_items, ExtractedArray, UnrecoverableParseError};
pub use rules::{normalize_score, Rule, RuleHit, RuleSet, ScoringContext};
