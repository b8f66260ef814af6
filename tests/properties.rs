//! Property tests for normalization, run reconstruction and tokenization.

use proptest::prelude::*;
use proptest::sample::subsequence;

use seqmatch::{
    ScorableTextItem, fuzzy_score, fuzzy_sequential_match, normalize, to_segments,
    tokenize_match_info,
};

/// Latin text with accented letters, separators and mixed case.
const TEXT: &str = "[a-zA-Z\u{00c0}-\u{00ff} ._-]{0,40}";

/// A string length together with an ascending subset of its positions.
fn positions_in(max_len: usize) -> impl Strategy<Value = (usize, Vec<usize>)> {
    (0..=max_len).prop_flat_map(|len| {
        let all: Vec<usize> = (0..len).collect();
        (Just(len), subsequence(all, 0..=len))
    })
}

/// A string and an ascending subset of its char positions.
fn text_and_positions() -> impl Strategy<Value = (String, Vec<usize>)> {
    TEXT.prop_flat_map(|text| {
        let len = text.chars().count();
        let all: Vec<usize> = (0..len).collect();
        (Just(text), subsequence(all, 0..=len))
    })
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in TEXT) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn segments_partition_the_string((len, positions) in positions_in(64)) {
        let segments = to_segments(&positions, len);
        let mut cursor = 0;
        for segment in &segments {
            prop_assert_eq!(segment.start, cursor);
            prop_assert!(segment.length > 0);
            cursor = segment.end();
        }
        prop_assert_eq!(cursor, len);

        let matched: Vec<usize> = segments
            .iter()
            .filter(|s| s.matched)
            .flat_map(|s| s.start..s.end())
            .collect();
        prop_assert_eq!(matched, positions);
    }

    #[test]
    fn tokens_reassemble_the_text((text, positions) in text_and_positions()) {
        let segments = to_segments(&positions, text.chars().count());
        let tokens = tokenize_match_info(&text, Some(&segments));
        let joined: String = tokens.iter().map(|t| t.text).collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn any_subsequence_of_the_candidate_matches((text, positions) in text_and_positions()) {
        let chars: Vec<char> = text.chars().collect();
        let query: String = positions.iter().map(|&p| chars[p]).collect();

        let found = fuzzy_score(&query, &text);
        prop_assert!(found.is_some(), "{:?} should match {:?}", query, text);
        let found = found.unwrap();
        prop_assert!(found.positions.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(found.positions.iter().all(|&p| p < chars.len()));
        prop_assert_eq!(found.positions.len(), normalize(&query).chars().count());
    }

    #[test]
    fn best_match_segments_cover_the_winning_string(
        text in TEXT,
        query in "[a-z ]{0,4}",
    ) {
        let item = ScorableTextItem::new([text.clone()]);
        if let Some(found) = fuzzy_sequential_match(&query, &item) {
            prop_assert_ne!(found.score, 0);
            let covered: usize = found.match_info.segments.iter().map(|s| s.length).sum();
            prop_assert_eq!(covered, text.chars().count());
        }
    }
}
