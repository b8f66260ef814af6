//! Match segments: contiguous matched / unmatched runs of a candidate.
//!
//! [`to_segments`] turns the ascending matched positions produced by the
//! scorer into runs covering the whole string. [`split_segments`] maps the
//! runs of a concatenated string back onto the parts it was built from.

/// A contiguous span `[start, start + length)` of a candidate string, in
/// characters, that either matched query characters or is a gap.
///
/// Within one segment list the segments are ordered, contiguous and cover
/// the string exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSegment {
    /// First character of the span.
    pub start: usize,
    /// Number of characters in the span; never zero.
    pub length: usize,
    /// Whether every character of the span matched a query character.
    pub matched: bool,
}

impl MatchSegment {
    /// A span of matched characters.
    pub fn matched(start: usize, length: usize) -> Self {
        Self {
            start,
            length,
            matched: true,
        }
    }

    /// A span of unmatched characters.
    pub fn gap(start: usize, length: usize) -> Self {
        Self {
            start,
            length,
            matched: false,
        }
    }

    /// One past the last character of the span.
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Build the run structure of a string from its matched positions.
///
/// Consecutive positions are merged into one matched segment; the
/// characters between them, before the first and after the last become
/// unmatched segments. With no positions the whole string is one gap, and
/// an empty string has no segments.
///
/// `positions` must be strictly ascending and below `len`.
///
/// # Examples
///
/// ```
/// use seqmatch::{MatchSegment, to_segments};
///
/// assert_eq!(
///     to_segments(&[1, 2, 5], 7),
///     vec![
///         MatchSegment::gap(0, 1),
///         MatchSegment::matched(1, 2),
///         MatchSegment::gap(3, 2),
///         MatchSegment::matched(5, 1),
///         MatchSegment::gap(6, 1),
///     ],
/// );
/// assert_eq!(to_segments(&[], 3), vec![MatchSegment::gap(0, 3)]);
/// assert!(to_segments(&[], 0).is_empty());
/// ```
pub fn to_segments(positions: &[usize], len: usize) -> Vec<MatchSegment> {
    debug_assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "matched positions must be strictly ascending"
    );
    debug_assert!(
        positions.last().is_none_or(|&last| last < len),
        "matched position past the end of the string"
    );

    let mut segments = Vec::with_capacity(2 * positions.len() + 1);
    // `cursor` is the first character not yet covered by a segment.
    let mut cursor = 0;
    let mut iter = positions.iter().copied().peekable();

    while let Some(start) = iter.next() {
        if start > cursor {
            segments.push(MatchSegment::gap(cursor, start - cursor));
        }
        let mut end = start + 1;
        while iter.next_if_eq(&end).is_some() {
            end += 1;
        }
        segments.push(MatchSegment::matched(start, end - start));
        cursor = end;
    }

    if len > cursor {
        segments.push(MatchSegment::gap(cursor, len - cursor));
    }

    segments
}

/// Split the segments of a concatenated string into per-part segments.
///
/// `parts` are the strings that were joined, in order, to form the string
/// the segments describe; their character lengths must add up to the
/// length it covers. Each returned list is rebased to its part, so
/// position 0 is the first character of that part. A segment straddling a
/// part boundary is cut in two.
///
/// When `segments` is `None` or empty, every non-empty part gets a single
/// gap covering it.
///
/// # Examples
///
/// ```
/// use seqmatch::{MatchSegment, split_segments};
///
/// // "Reload Automations" matched by "relauto"
/// let segments = [
///     MatchSegment::matched(0, 3),
///     MatchSegment::gap(3, 4),
///     MatchSegment::matched(7, 4),
///     MatchSegment::gap(11, 7),
/// ];
/// let split = split_segments(&["Reload", " ", "Automations"], Some(&segments));
/// assert_eq!(split[0], vec![MatchSegment::matched(0, 3), MatchSegment::gap(3, 3)]);
/// assert_eq!(split[1], vec![MatchSegment::gap(0, 1)]);
/// assert_eq!(split[2], vec![MatchSegment::matched(0, 4), MatchSegment::gap(4, 7)]);
/// ```
pub fn split_segments<S: AsRef<str>>(
    parts: &[S],
    segments: Option<&[MatchSegment]>,
) -> Vec<Vec<MatchSegment>> {
    let lengths: Vec<usize> = parts.iter().map(|p| p.as_ref().chars().count()).collect();

    let segments = match segments {
        Some(segments) if !segments.is_empty() => segments,
        _ => {
            return lengths
                .into_iter()
                .map(|len| to_segments(&[], len))
                .collect();
        }
    };

    debug_assert_eq!(
        lengths.iter().sum::<usize>(),
        segments.last().map_or(0, MatchSegment::end),
        "parts and segments cover different lengths"
    );

    let mut result = Vec::with_capacity(parts.len());
    let mut next = 0;
    let mut offset = 0;

    for len in lengths {
        let part_end = offset + len;
        let mut local = Vec::new();

        while let Some(segment) = segments.get(next) {
            let start = segment.start.max(offset);
            let end = segment.end().min(part_end);
            if end > start {
                local.push(MatchSegment {
                    start: start - offset,
                    length: end - start,
                    matched: segment.matched,
                });
            }
            if segment.end() > part_end {
                // The rest of this segment belongs to the next part.
                break;
            }
            next += 1;
        }

        result.push(local);
        offset = part_end;
    }

    result
}
