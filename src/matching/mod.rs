//! Keyword matching and scoring module

pub mod matcher;
pub mod score;

pub use matcher::{match_keywords, match_texts, MatchClass, MatchResult};
pub use score::{display_percentage, ScoreSummary, ScoreThresholds, ScoreTier};
