//! Fuzzy sequential scoring of a query against one candidate string.
//!
//! Every query character must be found in the candidate, in order, with
//! gaps allowed. Among all such alignments the scorer picks the one with
//! the highest score, which favors:
//!
//! - matches that start at the beginning of the candidate,
//! - contiguous runs of matched characters,
//! - characters landing on word boundaries (after a separator, on an
//!   uppercase hump, or on a common prefix with the query).
//!
//! Scores are signed: a strong prefix match is large and positive, a late,
//! fragmented match goes negative. Only the relative order of scores is
//! meaningful.

use tracing::trace;

use crate::normalize::{FoldedChar, fold_char};
use crate::options::MatchOptions;

/// Maximum number of folded query characters. Longer queries never match.
///
/// The candidate is not bounded: every one of its characters can match.
pub const MAX_MATCH_LEN: usize = 128;

/// Score of a query char on a plain mid-word position.
const WEAK: i32 = 1;
/// Score of a query char on a word boundary, prefix or uppercase hump.
const STRONG: i32 = 5;
/// Same as [`STRONG`] when the characters also agree in case.
const STRONG_EXACT_CASE: i32 = 7;
/// Penalty for the first skipped character between two matched characters.
const GAP_OPEN: i32 = 5;
/// Penalty for every further skipped character of the same gap.
const GAP_EXTEND: i32 = 1;
/// Penalty per unmatched character before the first match.
const LATE_START_PER_CHAR: i32 = 3;
/// Cap on the late start penalty.
const LATE_START_MAX: i32 = 9;
/// Bonus when query and candidate have the same length.
const EQUAL_LENGTH_BONUS: i32 = 1;

/// Result of a successful fuzzy sequential match against one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyScore {
    /// Raw score of the best alignment. Higher is better; may be negative.
    pub score: i32,
    /// Character (not byte) positions in the candidate that matched query
    /// characters, strictly ascending. Empty for an empty query.
    pub positions: Vec<usize>,
}

/// Score `query` against `candidate` with default [`MatchOptions`].
///
/// Returns `None` when some query character cannot be found, in order,
/// in the candidate.
///
/// # Examples
///
/// ```
/// use seqmatch::fuzzy_score;
///
/// let exact = fuzzy_score("ticker", "ticker").unwrap();
/// let inner = fuzzy_score("ticker", "automation.ticker").unwrap();
/// assert!(exact.score > inner.score);
/// assert_eq!(inner.positions, vec![11, 12, 13, 14, 15, 16]);
///
/// assert_eq!(fuzzy_score("xyz", "abc"), None);
/// ```
pub fn fuzzy_score(query: &str, candidate: &str) -> Option<FuzzyScore> {
    fuzzy_score_with(query, candidate, &MatchOptions::default())
}

/// Score `query` against `candidate`.
///
/// Both strings are folded character by character (lowercased, and with
/// diacritics stripped unless `options.keep_diacritics` is set). An empty
/// query, or one made only of combining marks, matches every candidate
/// with a score of 0 and no positions.
///
/// # Arguments
///
/// * `query` - The search text typed by the user
/// * `candidate` - The string being evaluated
/// * `options` - Diacritics handling and weak-start policy
///
/// # Returns
///
/// `Some(FuzzyScore)` for the best alignment, `None` when there is none.
pub fn fuzzy_score_with(
    query: &str,
    candidate: &str,
    options: &MatchOptions,
) -> Option<FuzzyScore> {
    let keep = options.keep_diacritics;
    let pattern: Vec<FoldedChar> = query
        .chars()
        .filter_map(|c| fold_char(c, keep))
        .collect();

    if pattern.is_empty() {
        return Some(FuzzyScore {
            score: 0,
            positions: Vec::new(),
        });
    }

    if pattern.len() > MAX_MATCH_LEN {
        trace!(pattern_len = pattern.len(), "query longer than the match limit");
        return None;
    }

    let word: Vec<FoldedChar> = candidate
        .chars()
        .map(|c| fold_char(c, keep).unwrap_or(FoldedChar { base: c, lower: c }))
        .collect();

    if pattern.len() > word.len() {
        trace!(
            pattern_len = pattern.len(),
            word_len = word.len(),
            "query longer than candidate"
        );
        return None;
    }

    if !pattern_in_word(&pattern, &word, candidate) {
        return None;
    }

    let result = Lattice::build(&pattern, &word, options.first_match_can_be_weak).best();
    match &result {
        Some(found) => trace!(
            pattern_len = pattern.len(),
            word_len = word.len(),
            score = found.score,
            "scored candidate"
        ),
        None => trace!(
            pattern_len = pattern.len(),
            word_len = word.len(),
            "no alignment with a strong first match"
        ),
    }
    result
}

/// Case-insensitive check that every character of `pattern` occurs in
/// `word` in order, gaps allowed.
///
/// This is the cheap precheck run before scoring; it does not strip
/// diacritics.
///
/// # Examples
///
/// ```
/// use seqmatch::is_pattern_in_word;
///
/// assert!(is_pattern_in_word("lvrm", "Living Room"));
/// assert!(!is_pattern_in_word("mrlv", "Living Room"));
/// assert!(is_pattern_in_word("", "anything"));
/// ```
pub fn is_pattern_in_word(pattern: &str, word: &str) -> bool {
    let pattern = pattern.to_lowercase();
    let word = word.to_lowercase();
    if pattern.is_ascii() && word.is_ascii() {
        return ascii_subsequence(pattern.bytes(), word.as_bytes());
    }
    let mut rest = word.chars();
    pattern.chars().all(|p| rest.any(|w| w == p))
}

fn pattern_in_word(pattern: &[FoldedChar], word: &[FoldedChar], candidate: &str) -> bool {
    // Folding is the identity on ASCII apart from case, so the raw bytes
    // can be searched directly.
    if candidate.is_ascii() && pattern.iter().all(|p| p.lower.is_ascii()) {
        return ascii_subsequence(pattern.iter().map(|p| p.lower as u8), candidate.as_bytes());
    }
    let mut rest = word.iter();
    pattern.iter().all(|p| rest.any(|w| w.lower == p.lower))
}

/// Ordered subsequence test over ASCII bytes, matching either case of
/// each (lowercase) needle byte.
fn ascii_subsequence(needles: impl IntoIterator<Item = u8>, haystack: &[u8]) -> bool {
    let mut rest = haystack;
    for needle in needles {
        match memchr::memchr2(needle, needle.to_ascii_uppercase(), rest) {
            Some(pos) => rest = &rest[pos + 1..],
            None => return false,
        }
    }
    true
}

/// Returns whether `c` separates words in identifiers and labels.
fn is_separator(c: char) -> bool {
    matches!(
        c,
        '_' | '-' | '.' | ' ' | '/' | '\\' | '\'' | '"' | ':' | '$'
    )
}

fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Score for aligning query char `i` with candidate char `j`, or `None`
/// when the folded characters differ.
fn char_score(pattern: &[FoldedChar], i: usize, word: &[FoldedChar], j: usize) -> Option<i32> {
    let (p, w) = (pattern[i], word[j]);
    if p.lower != w.lower {
        return None;
    }
    let prev = j.checked_sub(1).map(|k| word[k]);
    let strong_or_exact = if p.base == w.base {
        STRONG_EXACT_CASE
    } else {
        STRONG
    };

    // same position as in the query: `gar` in `garage`
    if j == i {
        return Some(strong_or_exact);
    }
    // start of an uppercase run: `o` in `forOthers`
    if w.is_upper() && !prev.is_some_and(|c| c.is_upper()) {
        return Some(strong_or_exact);
    }
    // the separator itself: `.` in `light.porch`
    if is_separator(w.lower) && !prev.is_some_and(|c| is_separator(c.lower)) {
        return Some(STRONG);
    }
    // first char of a word: `d` in `garage_door`
    if prev.is_some_and(|c| is_separator(c.lower) || is_whitespace(c.lower)) {
        return Some(STRONG);
    }
    Some(WEAK)
}

/// Bonus carried by weak matches that continue a run which passed through
/// a strong match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boost {
    None,
    Strong,
    StrongExactCase,
}

impl Boost {
    const ALL: [Boost; 3] = [Boost::None, Boost::Strong, Boost::StrongExactCase];

    fn index(self) -> usize {
        self as usize
    }

    fn value(self) -> i32 {
        match self {
            Boost::None => 0,
            Boost::Strong => STRONG - 1,
            Boost::StrongExactCase => STRONG_EXACT_CASE - 1,
        }
    }

    fn after_strong(score: i32) -> Boost {
        if score >= STRONG_EXACT_CASE {
            Boost::StrongExactCase
        } else {
            Boost::Strong
        }
    }
}

/// Contribution of a match with char score `score` and the boost state it
/// leaves behind. `boost` is the state of the run it continues, if any.
fn step(score: i32, boost: Boost) -> (i32, Boost) {
    if score == WEAK {
        (WEAK + boost.value(), boost)
    } else {
        (score + 1, Boost::after_strong(score))
    }
}

fn late_start_penalty(lead: usize) -> i32 {
    i32::try_from(lead)
        .map(|lead| lead.saturating_mul(LATE_START_PER_CHAR).min(LATE_START_MAX))
        .unwrap_or(LATE_START_MAX)
}

/// Best alignment ending with one query char on one candidate char, in one
/// boost state.
#[derive(Debug, Clone, Copy)]
struct Cell {
    total: i32,
    /// Candidate position and boost state of the previous query char.
    prev: Option<(usize, Boost)>,
}

/// Dynamic programming table over (query char, candidate char, boost).
struct Lattice<'a> {
    pattern: &'a [FoldedChar],
    word: &'a [FoldedChar],
    cells: Vec<Option<Cell>>,
}

impl<'a> Lattice<'a> {
    fn build(pattern: &'a [FoldedChar], word: &'a [FoldedChar], first_can_be_weak: bool) -> Self {
        let mut lattice = Lattice {
            pattern,
            word,
            cells: vec![None; pattern.len() * word.len() * Boost::ALL.len()],
        };

        for j in 0..word.len() {
            let Some(score) = char_score(pattern, 0, word, j) else {
                continue;
            };
            if score == WEAK && !first_can_be_weak {
                continue;
            }
            let (gain, boost) = step(score, Boost::None);
            lattice.offer(0, j, boost, gain - late_start_penalty(j), None);
        }

        for i in 1..pattern.len() {
            // Best (total + GAP_EXTEND * j) over cells of row i - 1 that are
            // at least two columns to the left of the current one.
            let mut gap_source: Option<(i32, usize, Boost)> = None;

            for j in i..word.len() {
                if j >= 2 {
                    for boost in Boost::ALL {
                        if let Some(cell) = lattice.get(i - 1, j - 2, boost) {
                            let key = cell.total + GAP_EXTEND * column(j - 2);
                            if gap_source.is_none_or(|(best, _, _)| key > best) {
                                gap_source = Some((key, j - 2, boost));
                            }
                        }
                    }
                }

                let Some(score) = char_score(pattern, i, word, j) else {
                    continue;
                };

                if let Some((key, prev_j, prev_boost)) = gap_source {
                    let penalty = GAP_OPEN - 2 * GAP_EXTEND;
                    let (gain, boost) = step(score, Boost::None);
                    let total = key - GAP_EXTEND * column(j) - penalty + gain;
                    lattice.offer(i, j, boost, total, Some((prev_j, prev_boost)));
                }

                for prev_boost in Boost::ALL {
                    if let Some(cell) = lattice.get(i - 1, j - 1, prev_boost) {
                        let (gain, boost) = step(score, prev_boost);
                        lattice.offer(i, j, boost, cell.total + gain, Some((j - 1, prev_boost)));
                    }
                }
            }
        }

        lattice
    }

    fn slot(&self, i: usize, j: usize, boost: Boost) -> usize {
        (i * self.word.len() + j) * Boost::ALL.len() + boost.index()
    }

    fn get(&self, i: usize, j: usize, boost: Boost) -> Option<Cell> {
        self.cells[self.slot(i, j, boost)]
    }

    /// Record a candidate alignment; earlier offers win ties.
    fn offer(&mut self, i: usize, j: usize, boost: Boost, total: i32, prev: Option<(usize, Boost)>) {
        let slot = self.slot(i, j, boost);
        if self.cells[slot].is_none_or(|cell| total > cell.total) {
            self.cells[slot] = Some(Cell { total, prev });
        }
    }

    /// Walk back from the best final cell and collect matched positions.
    fn best(&self) -> Option<FuzzyScore> {
        let last = self.pattern.len() - 1;
        let mut best: Option<(i32, usize, Boost)> = None;
        for j in last..self.word.len() {
            for boost in Boost::ALL {
                if let Some(cell) = self.get(last, j, boost) {
                    if best.is_none_or(|(total, _, _)| cell.total > total) {
                        best = Some((cell.total, j, boost));
                    }
                }
            }
        }

        let (mut score, end, end_boost) = best?;
        if self.pattern.len() == self.word.len() {
            score += EQUAL_LENGTH_BONUS;
        }

        let mut positions = Vec::with_capacity(self.pattern.len());
        let mut cursor = Some((end, end_boost));
        let mut row = last;
        while let Some((j, boost)) = cursor {
            positions.push(j);
            cursor = self.get(row, j, boost).and_then(|cell| cell.prev);
            row = row.saturating_sub(1);
        }
        positions.reverse();
        debug_assert_eq!(positions.len(), self.pattern.len());

        Some(FuzzyScore { score, positions })
    }
}

fn column(j: usize) -> i32 {
    i32::try_from(j).unwrap_or(i32::MAX)
}
