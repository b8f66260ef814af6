//! Diacritics stripping and case folding.
//!
//! Both the whole-string helpers ([`strip_diacritics`], [`normalize`]) and
//! the per-character folding used by the scorer decompose characters with
//! Unicode NFD and drop the combining diacritical marks block
//! (U+0300..=U+036F).

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

/// Returns whether `c` lies in the Combining Diacritical Marks block.
fn is_combining_diacritic(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

/// Strip diacritical marks from a string.
///
/// Applies Unicode canonical decomposition (NFD) and removes every code
/// point in the Combining Diacritical Marks block (U+0300..=U+036F). Case is
/// left untouched.
///
/// Returns [`Cow::Borrowed`] when the input is unchanged, which is always
/// the case for ASCII input.
///
/// # Examples
///
/// ```
/// use seqmatch::strip_diacritics;
///
/// assert_eq!(strip_diacritics("Caf\u{00e9} cr\u{00e8}me"), "Cafe creme");
/// assert!(matches!(strip_diacritics("plain"), std::borrow::Cow::Borrowed(_)));
/// ```
pub fn strip_diacritics(s: &str) -> Cow<'_, str> {
    if s.is_ascii() {
        return Cow::Borrowed(s);
    }

    let stripped: String = s.nfd().filter(|c| !is_combining_diacritic(*c)).collect();

    if stripped == s {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(stripped)
    }
}

/// Lowercase a string and strip its diacritical marks.
///
/// This is the comparison form used for case- and accent-insensitive
/// matching. Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use seqmatch::normalize;
///
/// assert_eq!(normalize("\u{00c9}COLE"), "ecole");
/// assert_eq!(normalize(&normalize("\u{00c9}COLE")), "ecole");
/// ```
pub fn normalize(s: &str) -> String {
    let lower = s.to_lowercase();
    strip_diacritics(&lower).into_owned()
}

/// Diacritics stripping for strings, string sequences and optional values.
///
/// Sequences are transformed element-wise, preserving order and length.
/// `None` passes through unchanged, which lets optional fields be handled
/// without unwrapping at the call site.
///
/// Like [`strip_diacritics`], this leaves case untouched. Use [`normalize`]
/// for the lowercased comparison form.
///
/// # Examples
///
/// ```
/// use seqmatch::StripDiacritics;
///
/// assert_eq!("na\u{00ef}ve".strip_diacritics(), "naive");
/// assert_eq!(
///     vec!["\u{00e0}", "b", "\u{00e7}"].strip_diacritics(),
///     vec!["a", "b", "c"],
/// );
/// assert_eq!(None::<&str>.strip_diacritics(), None);
/// assert_eq!(Some("\u{00f1}").strip_diacritics(), Some("n".to_owned()));
/// assert_eq!(vec!["\u{00c9}t\u{00e9}"].strip_diacritics(), vec!["Ete"]);
/// ```
pub trait StripDiacritics {
    /// The owned result of stripping.
    type Output;

    /// Returns a copy of `self` with diacritical marks removed.
    fn strip_diacritics(&self) -> Self::Output;
}

impl StripDiacritics for str {
    type Output = String;

    fn strip_diacritics(&self) -> String {
        strip_diacritics(self).into_owned()
    }
}

impl StripDiacritics for String {
    type Output = String;

    fn strip_diacritics(&self) -> String {
        strip_diacritics(self).into_owned()
    }
}

impl<S: AsRef<str>> StripDiacritics for [S] {
    type Output = Vec<String>;

    fn strip_diacritics(&self) -> Vec<String> {
        self.iter()
            .map(|s| strip_diacritics(s.as_ref()).into_owned())
            .collect()
    }
}

impl<S: AsRef<str>> StripDiacritics for Vec<S> {
    type Output = Vec<String>;

    fn strip_diacritics(&self) -> Vec<String> {
        self.as_slice().strip_diacritics()
    }
}

impl<T: StripDiacritics> StripDiacritics for Option<T> {
    type Output = Option<T::Output>;

    fn strip_diacritics(&self) -> Self::Output {
        self.as_ref().map(T::strip_diacritics)
    }
}

impl<T: StripDiacritics + ?Sized> StripDiacritics for &T {
    type Output = T::Output;

    fn strip_diacritics(&self) -> Self::Output {
        (**self).strip_diacritics()
    }
}

/// A candidate or query character prepared for comparison.
///
/// `base` keeps the original case (diacritics removed unless kept);
/// `lower` is the lowercased `base` used for equality tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FoldedChar {
    pub(crate) base: char,
    pub(crate) lower: char,
}

impl FoldedChar {
    /// Returns whether the original character is an uppercase letter.
    pub(crate) fn is_upper(self) -> bool {
        self.base != self.lower
    }
}

/// Fold one character for comparison.
///
/// Returns `None` for a character that consists only of combining
/// diacritics once decomposed. A character whose decomposition keeps more
/// than one base character (e.g. Hangul syllables) is kept whole so that
/// positions stay one-to-one with the input.
pub(crate) fn fold_char(c: char, keep_diacritics: bool) -> Option<FoldedChar> {
    if c.is_ascii() {
        return Some(FoldedChar {
            base: c,
            lower: c.to_ascii_lowercase(),
        });
    }

    let base = if keep_diacritics { c } else { base_char(c)? };
    Some(FoldedChar {
        base,
        lower: lower_char(base),
    })
}

fn base_char(c: char) -> Option<char> {
    if is_combining_diacritic(c) {
        return None;
    }
    let mut decomposed = c.nfd().filter(|d| !is_combining_diacritic(*d));
    match (decomposed.next(), decomposed.next()) {
        (Some(single), None) => Some(single),
        (None, _) => None,
        _ => Some(c),
    }
}

fn lower_char(c: char) -> char {
    // Multi-char lowercase expansions keep their first char so the folded
    // text stays one char per input char.
    c.to_lowercase().next().unwrap_or(c)
}
