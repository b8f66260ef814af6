//! Literal text tokens for highlighting matched spans.
//!
//! A token list is the text of a string cut at segment boundaries, each
//! piece tagged with whether it matched. Joining the token texts gives
//! back the original string.

use crate::segments::{MatchSegment, split_segments};

/// A literal slice of a candidate string and whether it matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MatchToken<'a> {
    /// The text of the span.
    pub text: &'a str,
    /// Whether the span lies inside a matched segment.
    #[cfg_attr(feature = "serde", serde(rename = "match"))]
    pub matched: bool,
}

/// Cut `text` into tokens along `segments`.
///
/// Segment bounds are character positions. Bounds past the end of `text`
/// are clamped to it. With `segments` set to `None` the whole text is one
/// unmatched token.
///
/// # Examples
///
/// ```
/// use seqmatch::{MatchSegment, MatchToken, tokenize_match_info};
///
/// let segments = [MatchSegment::matched(0, 3), MatchSegment::gap(3, 3)];
/// let tokens = tokenize_match_info("Reload", Some(&segments));
/// assert_eq!(
///     tokens,
///     vec![
///         MatchToken { text: "Rel", matched: true },
///         MatchToken { text: "oad", matched: false },
///     ],
/// );
///
/// let plain = tokenize_match_info("Reload", None);
/// assert_eq!(plain, vec![MatchToken { text: "Reload", matched: false }]);
/// ```
pub fn tokenize_match_info<'a>(
    text: &'a str,
    segments: Option<&[MatchSegment]>,
) -> Vec<MatchToken<'a>> {
    let Some(segments) = segments else {
        return vec![MatchToken {
            text,
            matched: false,
        }];
    };

    // Byte offset of every char boundary, including the end of the text.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect();
    let byte_at = |char_pos: usize| boundaries[char_pos.min(boundaries.len() - 1)];

    segments
        .iter()
        .map(|segment| MatchToken {
            text: &text[byte_at(segment.start)..byte_at(segment.end())],
            matched: segment.matched,
        })
        .collect()
}

/// Tokenize several strings, each with its own segments.
///
/// # Examples
///
/// ```
/// use seqmatch::{MatchSegment, tokenize_all};
///
/// let first = [MatchSegment::matched(0, 1), MatchSegment::gap(1, 2)];
/// let tokens = tokenize_all(&[("abc", Some(&first[..])), ("xyz", None)]);
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[0][0].text, "a");
/// assert_eq!(tokens[1][0].text, "xyz");
/// ```
pub fn tokenize_all<'a>(entries: &[(&'a str, Option<&[MatchSegment]>)]) -> Vec<Vec<MatchToken<'a>>> {
    entries
        .iter()
        .map(|&(text, segments)| tokenize_match_info(text, segments))
        .collect()
}

/// Tokenize the parts of a concatenated string from the segments of the
/// whole.
///
/// Used when several fields were joined into one string for matching and
/// each field is rendered on its own. See
/// [`split_segments`](crate::split_segments) for how segments are cut at
/// part boundaries.
///
/// # Examples
///
/// ```
/// use seqmatch::{ScorableTextItem, fuzzy_sequential_match, tokenize_concatenated_match_info};
///
/// let parts = ["Reload", " ", "Automations"];
/// let item = ScorableTextItem::new([parts.concat()]);
/// let found = fuzzy_sequential_match("relauto", &item).unwrap();
///
/// let tokens = tokenize_concatenated_match_info(&parts, Some(&found.match_info.segments));
/// let rendered: Vec<Vec<(&str, bool)>> = tokens
///     .iter()
///     .map(|part| part.iter().map(|t| (t.text, t.matched)).collect())
///     .collect();
/// assert_eq!(
///     rendered,
///     vec![
///         vec![("Rel", true), ("oad", false)],
///         vec![(" ", false)],
///         vec![("Auto", true), ("mations", false)],
///     ],
/// );
/// ```
pub fn tokenize_concatenated_match_info<'a, S: AsRef<str>>(
    parts: &'a [S],
    segments: Option<&[MatchSegment]>,
) -> Vec<Vec<MatchToken<'a>>> {
    parts
        .iter()
        .zip(split_segments(parts, segments))
        .map(|(part, part_segments)| tokenize_match_info(part.as_ref(), Some(&part_segments)))
        .collect()
}
