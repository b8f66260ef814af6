//! Integration tests for the `seqmatch` public API.
//!
//! These tests drive the batch filter, the best-alias selector and the
//! tokenizers end to end, the way a picker would: domain records are
//! projected into alias strings, filtered against a live query and the
//! winning alias is tokenized for highlighting.

use seqmatch::{
    MatchInfo, MatchOptions, MatchSegment, ScorableText, ScorableTextItem, SequenceMatch,
    fuzzy_filter_sort, fuzzy_filter_sort_with, fuzzy_sequential_match, split_segments,
    tokenize_concatenated_match_info, tokenize_match_info,
};

// ---------------------------------------------------------------------------
// Shared test types
// ---------------------------------------------------------------------------

/// An entity record as a picker sees it: an id, a display name and the
/// cached alias strings searched by the matcher.
#[derive(Debug)]
struct Entity {
    entity_id: String,
    name: String,
    strings: Vec<String>,
    found: Option<SequenceMatch>,
}

impl Entity {
    fn new(entity_id: &str, name: &str) -> Self {
        Self {
            entity_id: entity_id.to_owned(),
            name: name.to_owned(),
            strings: vec![entity_id.to_owned(), name.to_owned()],
            found: None,
        }
    }
}

impl ScorableText for Entity {
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

fn items(strings: &[&[&str]]) -> Vec<ScorableTextItem> {
    strings
        .iter()
        .map(|s| ScorableTextItem::new(s.iter().copied()))
        .collect()
}

fn first_strings(items: &[ScorableTextItem]) -> Vec<&str> {
    items.iter().map(|i| i.strings[0].as_str()).collect()
}

// ---------------------------------------------------------------------------
// 1. Ranking
// ---------------------------------------------------------------------------

/// An exact match ranks above the same word after a separator, which ranks
/// above a scattered match in a longer string.
#[test]
fn exact_beats_substring_beats_scattered() {
    let mut list = items(&[
        &["automation.check_router"],
        &["automation.ticker"],
        &["ticker"],
    ]);
    fuzzy_filter_sort("ticker", &mut list);
    assert_eq!(
        first_strings(&list),
        vec!["ticker", "automation.ticker", "automation.check_router"]
    );
}

/// Scores are strictly decreasing along the sorted list when no ties exist.
#[test]
fn sorted_scores_are_descending() {
    let mut list = items(&[&["office lamp"], &["lamp"], &["a lamp stand"], &["l_a_m_p"]]);
    fuzzy_filter_sort("lamp", &mut list);
    let scores: Vec<i32> = list.iter().map(|i| i.score().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
    assert_eq!(list[0].strings[0], "lamp");
}

/// Equal scores keep their input order.
#[test]
fn ties_keep_input_order() {
    let mut list = items(&[&["fan b"], &["fan a"], &["fan c"]]);
    fuzzy_filter_sort("fan", &mut list);
    assert_eq!(first_strings(&list), vec!["fan b", "fan a", "fan c"]);
}

// ---------------------------------------------------------------------------
// 2. Multi-word queries
// ---------------------------------------------------------------------------

/// Every word of the query must be found, in order, inside one alias.
#[test]
fn garage_binary_requires_one_alias_with_both_words() {
    let mut list = vec![
        Entity::new(
            "binary_sensor.garage_door_opened",
            "Garage Door Opened (Sensor, Binary)",
        ),
        Entity::new("sensor.garage_door_status", "Garage Door Opened (Sensor)"),
    ];
    fuzzy_filter_sort("garage binary", &mut list);

    assert_eq!(list.len(), 1);
    assert_eq!(list[0].entity_id, "binary_sensor.garage_door_opened");
    assert_eq!(list[0].match_info().map(|m| m.index), Some(1));
}

// ---------------------------------------------------------------------------
// 3. Case and diacritics
// ---------------------------------------------------------------------------

#[test]
fn accented_query_matches_uppercase_candidate() {
    let item = ScorableTextItem::new(["CAFE"]);
    let found = fuzzy_sequential_match("caf\u{00e9}", &item).unwrap();
    assert_eq!(found.match_info.segments, vec![MatchSegment::matched(0, 4)]);
}

#[test]
fn plain_query_matches_accented_candidates() {
    let mut list = items(&[&["cafe"], &["caf\u{00e9}"], &["restaurant"]]);
    fuzzy_filter_sort("cafe", &mut list);
    assert_eq!(first_strings(&list), vec!["cafe", "caf\u{00e9}"]);
}

#[test]
fn kept_diacritics_do_not_cross_match() {
    let mut list = items(&[&["cafe"], &["caf\u{00e9}"]]);
    let opts = MatchOptions {
        keep_diacritics: true,
        ..Default::default()
    };
    fuzzy_filter_sort_with("cafe", &mut list, &opts);
    assert_eq!(first_strings(&list), vec!["cafe"]);
}

// ---------------------------------------------------------------------------
// 4. Empty query and no match
// ---------------------------------------------------------------------------

#[test]
fn empty_query_matches_everything_with_score_one() {
    let mut list = items(&[&["Bedroom"], &["Attic"]]);
    fuzzy_filter_sort("", &mut list);
    assert_eq!(first_strings(&list), vec!["Bedroom", "Attic"]);
    for item in &list {
        let info = item.match_info().unwrap();
        assert_eq!(item.score(), Some(1));
        assert_eq!(info.index, 0);
        assert_eq!(
            info.segments,
            vec![MatchSegment::gap(0, item.strings[0].chars().count())]
        );
    }
}

/// A query found nowhere empties the list and clears results recorded by
/// an earlier pass.
#[test]
fn no_match_clears_stale_results() {
    let mut kitchen = Entity::new("light.kitchen", "Kitchen");
    let mut hall = Entity::new("light.hall", "Hall");

    let mut refs = vec![&mut kitchen, &mut hall];
    fuzzy_filter_sort("light", &mut refs);
    assert_eq!(refs.len(), 2);
    drop(refs);
    assert!(kitchen.score().is_some());
    assert!(hall.score().is_some());

    let mut refs = vec![&mut kitchen, &mut hall];
    fuzzy_filter_sort("xyz123", &mut refs);
    assert!(refs.is_empty());
    drop(refs);
    assert!(kitchen.score().is_none() && kitchen.match_info().is_none());
    assert!(hall.score().is_none() && hall.match_info().is_none());
}

/// A long alias is searched to its end, and a long query is never cut short.
#[test]
fn long_strings_match_in_full() {
    let alias = format!("{} kitchen", "x".repeat(130));
    let item = ScorableTextItem::new([alias.as_str()]);
    let found = fuzzy_sequential_match("kitchen", &item).unwrap();
    assert_eq!(
        found.match_info.segments,
        vec![MatchSegment::gap(0, 131), MatchSegment::matched(131, 7)]
    );

    let query = format!("{}z", "a".repeat(128));
    let item = ScorableTextItem::new([format!("{}b", "a".repeat(128))]);
    assert_eq!(fuzzy_sequential_match(&query, &item), None);
}

// ---------------------------------------------------------------------------
// 5. Highlighting
// ---------------------------------------------------------------------------

/// Tokenizing the winning alias reproduces it and marks the matched chars.
#[test]
fn tokens_highlight_the_winning_alias() {
    let mut list = vec![Entity::new("light.living_room", "Living Room Light")];
    fuzzy_filter_sort("room", &mut list);

    let entity = &list[0];
    let MatchInfo { index, segments } = entity.match_info().unwrap();
    let text = &entity.strings()[*index];
    let tokens = tokenize_match_info(text, Some(segments));

    let joined: String = tokens.iter().map(|t| t.text).collect();
    assert_eq!(&joined, text);
    let matched: String = tokens.iter().filter(|t| t.matched).map(|t| t.text).collect();
    assert_eq!(matched.to_lowercase(), "room");
    assert!(!entity.name.is_empty());
}

/// Segments of a concatenated command label map back onto its parts.
#[test]
fn concatenated_label_splits_per_part() {
    let parts = ["Reload", " ", "Automations"];
    let mut list = vec![ScorableTextItem::new([parts.concat()])];
    fuzzy_filter_sort("relauto", &mut list);

    let info = list[0].match_info().unwrap();
    let split = split_segments(&parts, Some(&info.segments));
    assert_eq!(
        split,
        vec![
            vec![MatchSegment::matched(0, 3), MatchSegment::gap(3, 3)],
            vec![MatchSegment::gap(0, 1)],
            vec![MatchSegment::matched(0, 4), MatchSegment::gap(4, 7)],
        ]
    );

    let tokens = tokenize_concatenated_match_info(&parts, Some(&info.segments));
    let rendered: Vec<Vec<(&str, bool)>> = tokens
        .iter()
        .map(|part| part.iter().map(|t| (t.text, t.matched)).collect())
        .collect();
    assert_eq!(
        rendered,
        vec![
            vec![("Rel", true), ("oad", false)],
            vec![(" ", false)],
            vec![("Auto", true), ("mations", false)],
        ]
    );
}

/// Without match info the parts come back as single unmatched tokens.
#[test]
fn concatenated_label_without_match() {
    let parts = ["Toggle", " ", "Fan"];
    let tokens = tokenize_concatenated_match_info(&parts, None);
    assert_eq!(tokens.len(), 3);
    assert!(tokens.iter().all(|part| part.len() == 1 && !part[0].matched));
}

// ---------------------------------------------------------------------------
// 6. Serialization
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
#[test]
fn match_info_serializes_for_rendering() {
    let item = ScorableTextItem::new(["abc"]);
    let found = fuzzy_sequential_match("b", &item).unwrap();
    let json = serde_json::to_value(&found.match_info).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "index": 0,
            "segments": [
                { "start": 0, "length": 1, "matched": false },
                { "start": 1, "length": 1, "matched": true },
                { "start": 2, "length": 1, "matched": false },
            ],
        })
    );

    let tokens = tokenize_match_info("abc", Some(&found.match_info.segments));
    let json = serde_json::to_value(&tokens[1]).unwrap();
    assert_eq!(json, serde_json::json!({ "text": "b", "match": true }));
}
