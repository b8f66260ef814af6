//! Configuration options for the fuzzy sequential matcher.
//!
//! [`MatchOptions`] controls global behavior such as diacritics handling and
//! whether an alignment may begin on a weak character. The same options
//! apply to every candidate string of a search.

/// Global options that control fuzzy sequential matching.
///
/// # Defaults
///
/// - `keep_diacritics`: `false` (diacritics are stripped before comparison)
/// - `first_match_can_be_weak`: `true` (the first query character may land
///   anywhere in the candidate)
///
/// # Examples
///
/// ```
/// use seqmatch::MatchOptions;
///
/// let opts = MatchOptions::default();
/// assert!(!opts.keep_diacritics);
/// assert!(opts.first_match_can_be_weak);
///
/// // Only accept alignments that start on a word boundary or the first char
/// let opts = MatchOptions { first_match_can_be_weak: false, ..Default::default() };
/// assert!(!opts.first_match_can_be_weak);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// When `true`, diacritics are preserved during comparison, so "cafe"
    /// no longer matches "caf\u{00e9}". Case folding still applies.
    pub keep_diacritics: bool,
    /// When `false`, an alignment whose first query character matches a
    /// weak position (mid-word, lowercase, not after a separator) is
    /// rejected.
    pub first_match_can_be_weak: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            keep_diacritics: false,
            first_match_can_be_weak: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_strips_diacritics_and_allows_weak_start() {
        let opts = MatchOptions::default();
        assert!(!opts.keep_diacritics);
        assert!(opts.first_match_can_be_weak);
    }

    #[test]
    fn debug_formatting() {
        let opts = MatchOptions {
            keep_diacritics: true,
            ..Default::default()
        };
        let debug_str = format!("{opts:?}");
        assert!(debug_str.contains("keep_diacritics: true"));
        assert!(debug_str.contains("first_match_can_be_weak: true"));
    }

    #[test]
    fn copy_produces_equal_value() {
        let opts = MatchOptions {
            keep_diacritics: true,
            first_match_can_be_weak: false,
        };
        let copied = opts;
        assert_eq!(copied, opts);
    }
}
