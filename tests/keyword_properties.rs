//! Property tests for keyword extraction, matching and highlighting

use ats_optimizer::keywords::stop_words::is_stop_word;
use ats_optimizer::keywords::tokenizer::is_numeric_token;
use ats_optimizer::{extract_keywords, highlight, match_keywords, MatchClass};
use proptest::prelude::*;
use std::collections::HashSet;

fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        "[A-Z][a-z]{1,6}",
        "[0-9]{1,4}",
        Just("c++".to_string()),
        Just("Node.js".to_string()),
        Just("the".to_string()),
        Just("e.g.".to_string()),
        Just("-".to_string()),
        Just("'quoted'".to_string()),
        Just("café".to_string()),
        Just("Résumé".to_string()),
        Just("naïve".to_string()),
        Just("Zürich".to_string()),
    ]
}

fn is_ascii_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn document() -> impl Strategy<Value = String> {
    let separator = prop_oneof![Just(" "), Just(", "), Just(".\n"), Just(" - "), Just("\t"), Just("; ")];
    prop::collection::vec((word(), separator), 0..40)
        .prop_map(|parts| parts.into_iter().map(|(w, sep)| w + sep).collect())
}

proptest! {
    #[test]
    fn extracted_keywords_are_significant(text in "\\PC{0,200}") {
        let keywords = extract_keywords(&text);
        let mut seen = HashSet::new();
        for keyword in &keywords {
            prop_assert!(keyword.len() >= 2);
            prop_assert!(!is_stop_word(keyword));
            prop_assert!(!is_numeric_token(keyword));
            prop_assert!(!keyword.chars().any(char::is_whitespace));
            prop_assert_eq!(keyword.to_lowercase(), keyword.clone());
            prop_assert!(seen.insert(keyword.clone()));
        }
    }

    #[test]
    fn extraction_is_idempotent(text in "[a-z0-9 .'#+\\-]{0,120}") {
        let keywords = extract_keywords(&text);
        let joined = keywords.as_slice().join(" ");
        prop_assert_eq!(extract_keywords(&joined), keywords);
    }

    #[test]
    fn match_partitions_job_keywords(resume in document(), job in document()) {
        let resume_keywords = extract_keywords(&resume);
        let job_keywords = extract_keywords(&job);
        let result = match_keywords(&resume_keywords, &job_keywords);

        prop_assert_eq!(
            result.matched_keywords.len() + result.missing_keywords.len(),
            job_keywords.len()
        );
        for keyword in &result.matched_keywords {
            prop_assert!(resume_keywords.contains(keyword));
            prop_assert!(!result.missing_keywords.contains(keyword));
        }
        for keyword in &result.missing_keywords {
            prop_assert!(!resume_keywords.contains(keyword));
        }
        prop_assert!((0.0..=100.0).contains(&result.match_score));
        if job_keywords.is_empty() {
            prop_assert_eq!(result.match_score, 0.0);
        }
    }

    #[test]
    fn highlight_is_lossless(
        text in "\\PC{0,200}",
        keywords in prop::collection::vec("\\PC{0,6}", 0..8),
    ) {
        let segments = highlight(&text, &keywords, |_| MatchClass::Matched);
        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        prop_assert_eq!(rebuilt, text.clone());
        for segment in &segments {
            prop_assert_eq!(segment.is_keyword, segment.match_class.is_some());
        }
    }

    #[test]
    fn highlight_finds_extracted_keywords(text in document()) {
        let keywords = extract_keywords(&text);
        let segments = highlight(&text, &keywords, |_| MatchClass::Matched);
        let found: HashSet<String> = segments
            .iter()
            .filter(|s| s.is_keyword)
            .map(|s| s.text.to_lowercase())
            .collect();
        for found_keyword in &found {
            prop_assert!(keywords.contains(found_keyword));
        }
        // Keywords bounded by ASCII word characters are always located,
        // including next to accented letters.
        for keyword in &keywords {
            let bounded = keyword.starts_with(is_ascii_word) && keyword.ends_with(is_ascii_word);
            if bounded {
                prop_assert!(found.contains(keyword), "{} not highlighted in {:?}", keyword, text);
            }
        }
    }
}
