use serde::{Deserialize, Serialize};

/// Display tier for a match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchQuality {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            Self::Excellent => "text-green-600",
            Self::Good => "text-blue-600",
            Self::Fair => "text-yellow-600",
            Self::Poor => "text-red-600",
        }
    }
}

/// Label and color class pair, as rendered next to a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityBadge {
    pub tier: MatchQuality,
    pub label: String,
    pub color_class: String,
}

impl From<MatchQuality> for QualityBadge {
    fn from(tier: MatchQuality) -> Self {
        Self {
            tier,
            label: tier.label().to_string(),
            color_class: tier.color_class().to_string(),
        }
    }
}

/// Map any score to its quality tier
///
/// Out-of-range input is clamped to 0-100 first:
/// >= 85 Excellent, >= 70 Good, >= 50 Fair, otherwise Poor.
#[inline]
pub fn match_quality(score: i64) -> MatchQuality {
    match score.clamp(0, 100) {
        85..=100 => MatchQuality::Excellent,
        70..=84 => MatchQuality::Good,
        50..=69 => MatchQuality::Fair,
        _ => MatchQuality::Poor,
    }
}
