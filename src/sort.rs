//! Ordering of matched items for the batch filter.
//!
//! Items are ordered by descending score. The comparator reports equal
//! scores as [`Ordering::Equal`], so a stable sort keeps their input order.

use std::cmp::Ordering;

use crate::sequence::ScorableText;

/// Compare two items by descending recorded score.
///
/// Items without a recorded match sort after every matched item.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use seqmatch::{ScorableTextItem, fuzzy_sequential_match, ScorableText, sort_by_score};
///
/// let mut strong = ScorableTextItem::new(["door"]);
/// let mut weak = ScorableTextItem::new(["front door"]);
/// strong.set_sequence_match(fuzzy_sequential_match("door", &strong));
/// weak.set_sequence_match(fuzzy_sequential_match("door", &weak));
///
/// assert_eq!(sort_by_score(&strong, &weak), Ordering::Less);
/// ```
pub fn sort_by_score<T: ScorableText + ?Sized>(a: &T, b: &T) -> Ordering {
    // `None < Some(_)`, so unmatched items land last in descending order.
    b.score().cmp(&a.score())
}
