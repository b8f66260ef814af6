#![warn(missing_docs)]

//! Fuzzy sequential string matching for searchable pickers.
//!
//! `seqmatch` decides whether the characters of a query appear, in order,
//! inside a candidate string, ranks the candidates so that prefix and
//! contiguous matches come first, and reports which spans matched so they
//! can be highlighted.
//!
//! ```
//! use seqmatch::{ScorableText, ScorableTextItem, fuzzy_filter_sort, tokenize_match_info};
//!
//! let mut items = vec![
//!     ScorableTextItem::new(["light.living_room", "Living Room Light"]),
//!     ScorableTextItem::new(["switch.porch", "Porch Switch"]),
//! ];
//! fuzzy_filter_sort("lvrm", &mut items);
//! assert_eq!(items.len(), 1);
//!
//! let info = items[0].match_info().unwrap();
//! let text = &items[0].strings()[info.index];
//! let tokens = tokenize_match_info(text, Some(&info.segments));
//! let joined: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(&joined, text);
//! ```

/// Diacritics stripping and case folding.
pub mod normalize;

/// Configuration options for matching.
pub mod options;

/// Fuzzy sequential scoring of a query against one string.
pub mod scoring;

/// Matched / unmatched runs and their reconstruction.
pub mod segments;

/// Scorable items, best-alias selection and batch filtering.
pub mod sequence;

/// Ordering of matched items.
pub mod sort;

/// Text tokens for highlighting.
pub mod tokenize;

// Re-export primary public API types and functions at the crate root.
pub use normalize::{StripDiacritics, normalize, strip_diacritics};
pub use options::MatchOptions;
pub use scoring::{FuzzyScore, MAX_MATCH_LEN, fuzzy_score, fuzzy_score_with, is_pattern_in_word};
pub use segments::{MatchSegment, split_segments, to_segments};
pub use sequence::{
    MatchInfo, ScorableText, ScorableTextItem, SequenceMatch, fuzzy_filter_sort,
    fuzzy_filter_sort_with, fuzzy_sequential_match, fuzzy_sequential_match_with,
};
pub use sort::sort_by_score;
pub use tokenize::{MatchToken, tokenize_all, tokenize_concatenated_match_info, tokenize_match_info};
