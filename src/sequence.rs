//! Scorable items, best-alias selection and batch filtering.
//!
//! A [`ScorableText`] item exposes one or more alias strings (an entity id,
//! a friendly name, a list of aliases...). [`fuzzy_sequential_match`]
//! scores the query against each alias and keeps the best one;
//! [`fuzzy_filter_sort`] does that for a whole list, records the result on
//! every item, drops the non-matches and sorts the rest.

use tracing::{debug, trace};

use crate::options::MatchOptions;
use crate::scoring::fuzzy_score_with;
use crate::segments::{MatchSegment, to_segments};
use crate::sort::sort_by_score;

/// Which alias produced the best match, and its run structure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchInfo {
    /// Position of the winning string in the item's string list.
    pub index: usize,
    /// Matched and unmatched runs of the winning string.
    pub segments: Vec<MatchSegment>,
}

/// The best match of a query against an item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceMatch {
    /// Score of the winning string. Never 0: a raw score of 0 is reported
    /// as 1.
    pub score: i32,
    /// Where the match was found.
    pub match_info: MatchInfo,
}

/// An item that can be fuzzy-matched through its alias strings and can
/// record the outcome.
///
/// The order of [`strings`](ScorableText::strings) matters: it defines
/// [`MatchInfo::index`] and breaks ties between equally scored aliases in
/// favor of the earlier one.
pub trait ScorableText {
    /// The alias strings to search, in priority order.
    fn strings(&self) -> &[String];

    /// The match recorded by the last filter pass, if any.
    fn sequence_match(&self) -> Option<&SequenceMatch>;

    /// Record the outcome of a filter pass, clearing any previous match.
    fn set_sequence_match(&mut self, found: Option<SequenceMatch>);

    /// Score recorded by the last filter pass.
    fn score(&self) -> Option<i32> {
        self.sequence_match().map(|found| found.score)
    }

    /// Match info recorded by the last filter pass.
    fn match_info(&self) -> Option<&MatchInfo> {
        self.sequence_match().map(|found| &found.match_info)
    }
}

impl<T: ScorableText + ?Sized> ScorableText for &mut T {
    fn strings(&self) -> &[String] {
        (**self).strings()
    }

    fn sequence_match(&self) -> Option<&SequenceMatch> {
        (**self).sequence_match()
    }

    fn set_sequence_match(&mut self, found: Option<SequenceMatch>) {
        (**self).set_sequence_match(found);
    }
}

impl<T: ScorableText + ?Sized> ScorableText for Box<T> {
    fn strings(&self) -> &[String] {
        (**self).strings()
    }

    fn sequence_match(&self) -> Option<&SequenceMatch> {
        (**self).sequence_match()
    }

    fn set_sequence_match(&mut self, found: Option<SequenceMatch>) {
        (**self).set_sequence_match(found);
    }
}

/// A plain list of alias strings with a slot for the match result.
///
/// Use it directly, or embed it in a domain record and implement
/// [`ScorableText`] by delegating to it.
///
/// # Examples
///
/// ```
/// use seqmatch::{ScorableText, ScorableTextItem};
///
/// let item = ScorableTextItem::new(["light.kitchen", "Kitchen Light"]);
/// assert_eq!(item.strings().len(), 2);
/// assert_eq!(item.score(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScorableTextItem {
    /// The alias strings to search.
    pub strings: Vec<String>,
    /// The match recorded by the last filter pass.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub found: Option<SequenceMatch>,
}

impl ScorableTextItem {
    /// Build an item from its alias strings, with no recorded match.
    pub fn new<I>(strings: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            strings: strings.into_iter().map(Into::into).collect(),
            found: None,
        }
    }
}

impl ScorableText for ScorableTextItem {
    fn strings(&self) -> &[String] {
        &self.strings
    }

    fn sequence_match(&self) -> Option<&SequenceMatch> {
        self.found.as_ref()
    }

    fn set_sequence_match(&mut self, found: Option<SequenceMatch>) {
        self.found = found;
    }
}

/// Find the best-matching alias of `item` with default [`MatchOptions`].
///
/// # Examples
///
/// ```
/// use seqmatch::{ScorableTextItem, fuzzy_sequential_match};
///
/// let item = ScorableTextItem::new(["binary_sensor.garage_door", "Garage Door"]);
/// let found = fuzzy_sequential_match("garage door", &item).unwrap();
/// assert_eq!(found.match_info.index, 1);
///
/// assert!(fuzzy_sequential_match("window", &item).is_none());
/// ```
pub fn fuzzy_sequential_match<T: ScorableText + ?Sized>(
    query: &str,
    item: &T,
) -> Option<SequenceMatch> {
    fuzzy_sequential_match_with(query, item, &MatchOptions::default())
}

/// Find the best-matching alias of `item`.
///
/// Each string is scored in order. A raw score of 0 (the empty query, for
/// instance) is reported as 1 so that a match always carries a non-zero
/// score. The remap happens per string, before comparing: a later string
/// replaces the current best only with a strictly higher reported score,
/// so a raw 1 does not displace an earlier raw 0.
///
/// # Returns
///
/// `None` when no string matches, otherwise the winning score together
/// with the index and segments of the winning string.
pub fn fuzzy_sequential_match_with<T: ScorableText + ?Sized>(
    query: &str,
    item: &T,
    options: &MatchOptions,
) -> Option<SequenceMatch> {
    let mut best: Option<(i32, usize, Vec<usize>)> = None;

    for (index, candidate) in item.strings().iter().enumerate() {
        let Some(found) = fuzzy_score_with(query, candidate, options) else {
            continue;
        };
        let score = if found.score == 0 { 1 } else { found.score };
        if best.as_ref().is_none_or(|(top, _, _)| score > *top) {
            best = Some((score, index, found.positions));
        }
    }

    let (score, index, positions) = best?;
    let len = item.strings()[index].chars().count();
    Some(SequenceMatch {
        score,
        match_info: MatchInfo {
            index,
            segments: to_segments(&positions, len),
        },
    })
}

/// Score, filter and sort `items` against `query` with default
/// [`MatchOptions`].
///
/// # Examples
///
/// ```
/// use seqmatch::{ScorableText, ScorableTextItem, fuzzy_filter_sort};
///
/// let mut items = vec![
///     ScorableTextItem::new(["automation.ticker"]),
///     ScorableTextItem::new(["light.bedroom"]),
///     ScorableTextItem::new(["ticker"]),
/// ];
/// fuzzy_filter_sort("ticker", &mut items);
///
/// assert_eq!(items.len(), 2);
/// assert_eq!(items[0].strings()[0], "ticker");
/// assert_eq!(items[1].strings()[0], "automation.ticker");
/// ```
pub fn fuzzy_filter_sort<T: ScorableText>(query: &str, items: &mut Vec<T>) {
    fuzzy_filter_sort_with(query, items, &MatchOptions::default());
}

/// Score, filter and sort `items` against `query`, in place.
///
/// Every item gets its match slot overwritten: with the new match, or with
/// `None` when it no longer matches. Items without a match are then
/// removed and the rest are sorted by descending score. The sort is
/// stable, so items with equal scores keep their input order.
///
/// Pass a `Vec<&mut T>` to keep ownership of the items and still observe
/// the recorded results on the ones that were filtered out.
pub fn fuzzy_filter_sort_with<T: ScorableText>(
    query: &str,
    items: &mut Vec<T>,
    options: &MatchOptions,
) {
    let total = items.len();

    for item in items.iter_mut() {
        let found = fuzzy_sequential_match_with(query, &*item, options);
        trace!(
            score = ?found.as_ref().map(|f| f.score),
            index = ?found.as_ref().map(|f| f.match_info.index),
            "scored item"
        );
        item.set_sequence_match(found);
    }

    items.retain(|item| item.sequence_match().is_some());
    items.sort_by(sort_by_score);

    debug!(total, kept = items.len(), "fuzzy filter sort");
}
