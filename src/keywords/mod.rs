//! Keyword extraction module

pub mod stop_words;
pub mod tokenizer;

pub use tokenizer::{extract_keywords, KeywordSet};
