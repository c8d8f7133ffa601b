use proptest::prelude::*;

use syllabus_core::text::{slugify, summarize_text};

proptest! {
    #[test]
    fn summary_never_exceeds_budget(text in "\\PC{0,400}", limit in 4_usize..300) {
        let summary = summarize_text(&text, limit);
        prop_assert!(summary.chars().count() <= limit);
    }

    #[test]
    fn summary_has_no_repeated_whitespace(text in "[a-z \\t\\n]{0,200}") {
        let summary = summarize_text(&text, 500);
        prop_assert!(!summary.contains("  "));
        prop_assert_eq!(summary.trim(), summary.as_str());
    }

    #[test]
    fn slug_has_no_empty_segments(text in "\\PC{0,80}") {
        let slug = slugify(&text);
        prop_assert!(!slug.is_empty());
        prop_assert!(slug.split('-').all(|part| !part.is_empty()));
    }
}
