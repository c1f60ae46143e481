//! Presentation of match scores: display rounding and ATS compatibility tiers

use serde::{Deserialize, Serialize};

/// Score boundaries (percentages) between tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreThresholds {
    pub good_threshold: f64,
    pub excellent_threshold: f64,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            good_threshold: 70.0,
            excellent_threshold: 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTier {
    NeedsWork,
    Good,
    Excellent,
}

impl ScoreTier {
    /// Classify an unrounded score.
    pub fn from_score(score: f64, thresholds: &ScoreThresholds) -> Self {
        if score >= thresholds.excellent_threshold {
            ScoreTier::Excellent
        } else if score >= thresholds.good_threshold {
            ScoreTier::Good
        } else {
            ScoreTier::NeedsWork
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::NeedsWork => "NEEDS WORK",
            ScoreTier::Good => "GOOD",
            ScoreTier::Excellent => "EXCELLENT",
        }
    }

    pub fn message(&self, thresholds: &ScoreThresholds) -> String {
        match self {
            ScoreTier::NeedsWork => format!(
                "Aim for a score of {}% or higher for better ATS compatibility. Consider incorporating more missing keywords.",
                thresholds.good_threshold
            ),
            ScoreTier::Good => {
                "Good job! This score indicates good ATS compatibility. You can still aim higher!".to_string()
            }
            ScoreTier::Excellent => {
                "Excellent! Your resume is highly aligned with the job description keywords.".to_string()
            }
        }
    }
}

/// Score as shown to the user: rounded half away from zero, clamped to 0..=100.
pub fn display_percentage(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}

/// Everything the output layer needs to present a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: f64,
    pub percentage: u8,
    pub tier: ScoreTier,
    pub message: String,
}

impl ScoreSummary {
    pub fn new(score: f64, thresholds: &ScoreThresholds) -> Self {
        let tier = ScoreTier::from_score(score, thresholds);
        Self {
            score,
            percentage: display_percentage(score),
            tier,
            message: tier.message(thresholds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounding() {
        assert_eq!(display_percentage(12.5), 13);
        assert_eq!(display_percentage(33.333), 33);
        assert_eq!(display_percentage(66.666), 67);
        assert_eq!(display_percentage(0.0), 0);
        assert_eq!(display_percentage(100.0), 100);
        assert_eq!(display_percentage(f64::NAN), 0);
    }

    #[test]
    fn test_tier_boundaries_use_unrounded_score() {
        let thresholds = ScoreThresholds::default();
        assert_eq!(ScoreTier::from_score(69.9, &thresholds), ScoreTier::NeedsWork);
        assert_eq!(ScoreTier::from_score(70.0, &thresholds), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(89.99, &thresholds), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(90.0, &thresholds), ScoreTier::Excellent);
    }

    #[test]
    fn test_summary_messages() {
        let thresholds = ScoreThresholds::default();
        let summary = ScoreSummary::new(25.0, &thresholds);
        assert_eq!(summary.percentage, 25);
        assert!(summary.message.starts_with("Aim for a score of 70%"));

        let summary = ScoreSummary::new(95.0, &thresholds);
        assert_eq!(summary.tier, ScoreTier::Excellent);
        assert!(summary.message.starts_with("Excellent!"));
    }
}
