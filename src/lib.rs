//! ATS optimizer library: resume keyword extraction, job description
//! matching, highlighting and keyword placement suggestions

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod highlight;
pub mod input;
pub mod keywords;
pub mod matching;
pub mod output;
pub mod suggestions;

pub use analysis::AnalysisEngine;
pub use config::Config;
pub use error::{AtsOptimizerError, Result};
pub use highlight::{highlight, HighlightSegment, Highlighter};
pub use keywords::{extract_keywords, KeywordSet};
pub use matching::{match_keywords, MatchClass, MatchResult};
