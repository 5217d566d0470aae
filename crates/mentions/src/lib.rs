//! Place-name recognition in free-form text.
//!
//! Detection runs in two passes:
//! 1. An exact, boundary-aware scan for every gazetteer name, in gazetteer order.
//! 2. An ordered list of heuristic [`Rule`]s that pull a capitalized phrase out of
//!    the text ("City, Region", "in City", "to City", "visit City").
//!
//! The first pass yields [`SelectionEvent::Recognized`]; the second can only yield
//! [`SelectionEvent::Unrecognized`], since anything it finds that is already in the
//! gazetteer is discarded.

mod rules;

use std::sync::Arc;

use gazetteer::{Gazetteer, Place};
use regex::Regex;

pub use rules::{Rule, default_rules};

/// Outcome of resolving a click or a mention.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Recognized(Place),
    /// Looks like a place but is not in the gazetteer.
    Unrecognized(String),
}

#[derive(Debug)]
pub enum MentionError {
    InvalidPattern { name: String, source: regex::Error },
}

impl std::fmt::Display for MentionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MentionError::InvalidPattern { name, source } => {
                write!(f, "invalid pattern for {name}: {source}")
            }
        }
    }
}

impl std::error::Error for MentionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MentionError::InvalidPattern { source, .. } => Some(source),
        }
    }
}

/// Builds the boundary-aware pattern for a place name.
///
/// The name must sit between non-letters (or the ends of the text), and each run of
/// whitespace inside the name matches one or more whitespace characters.
pub fn name_pattern(name: &str) -> String {
    let body = name
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    format!(r"(?i)(?:^|[^\p{{L}}]){body}(?:[^\p{{L}}]|$)")
}

#[derive(Debug, Clone)]
pub struct MentionDetector {
    gazetteer: Arc<Gazetteer>,
    names: Vec<Regex>,
    rules: Vec<Rule>,
}

impl MentionDetector {
    pub fn new(gazetteer: Arc<Gazetteer>) -> Result<Self, MentionError> {
        let rules = default_rules()?;
        Self::with_rules(gazetteer, rules)
    }

    /// Same as [`MentionDetector::new`] with a caller-supplied rule order.
    pub fn with_rules(gazetteer: Arc<Gazetteer>, rules: Vec<Rule>) -> Result<Self, MentionError> {
        let names = gazetteer
            .iter()
            .map(|place| {
                Regex::new(&name_pattern(&place.name)).map_err(|source| {
                    MentionError::InvalidPattern {
                        name: place.name.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            gazetteer,
            names,
            rules,
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns at most one place found in `text`.
    pub fn detect(&self, text: &str) -> Option<SelectionEvent> {
        if let Some(place) = self.exact_match(text) {
            return Some(SelectionEvent::Recognized(place.clone()));
        }

        for rule in &self.rules {
            let Some(phrase) = rule.extract(text) else {
                continue;
            };
            // Known names belong to the exact pass; a hit here means the rule and
            // the boundary check disagreed, not that the place is unsupported.
            if self.gazetteer.lookup(&phrase).is_some() {
                continue;
            }
            return Some(SelectionEvent::Unrecognized(phrase));
        }

        None
    }

    /// First gazetteer place (in gazetteer order) whose name appears in `text`.
    pub fn exact_match(&self, text: &str) -> Option<&Place> {
        self.gazetteer
            .iter()
            .zip(&self.names)
            .find(|(_, re)| re.is_match(text))
            .map(|(place, _)| place)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{MentionDetector, SelectionEvent, default_rules, name_pattern};
    use gazetteer::{Gazetteer, Place};
    use pretty_assertions::assert_eq;

    fn detector() -> MentionDetector {
        MentionDetector::new(Arc::new(Gazetteer::builtin())).unwrap()
    }

    fn recognized(name: &str) -> Option<String> {
        Some(name.to_string())
    }

    fn name_of(ev: Option<SelectionEvent>) -> Option<String> {
        match ev {
            Some(SelectionEvent::Recognized(p)) => Some(p.name),
            _ => None,
        }
    }

    #[test]
    fn every_builtin_name_is_recognized_in_a_sentence() {
        let d = detector();
        for place in Gazetteer::builtin().iter() {
            let text = format!("I love {}", place.name);
            assert_eq!(name_of(d.detect(&text)), recognized(&place.name), "{text}");
        }
    }

    #[test]
    fn suffixed_names_do_not_match() {
        let d = detector();
        for place in Gazetteer::builtin().iter() {
            let text = format!("I love {}ish", place.name);
            match d.detect(&text) {
                Some(SelectionEvent::Recognized(p)) => {
                    assert_ne!(p.name, place.name, "{text}");
                }
                Some(SelectionEvent::Unrecognized(_)) | None => {}
            }
        }
    }

    #[test]
    fn prefix_letters_block_a_match() {
        let d = detector();
        assert_eq!(d.detect("Parisian cafes and Romeo"), None);
        assert_eq!(d.detect("xlima"), None);
    }

    #[test]
    fn punctuation_and_digits_are_boundaries() {
        let d = detector();
        assert_eq!(name_of(d.detect("(Tokyo)")), recognized("Tokyo"));
        assert_eq!(name_of(d.detect("2024Lima!")), recognized("Lima"));
        assert_eq!(name_of(d.detect("rome.")), recognized("Rome"));
    }

    #[test]
    fn internal_whitespace_is_flexible() {
        let d = detector();
        assert_eq!(
            name_of(d.detect("Flights to New   York are cheap")),
            recognized("New York")
        );
        assert_eq!(
            name_of(d.detect("hong\nkong by night")),
            recognized("Hong Kong")
        );
    }

    #[test]
    fn gazetteer_order_wins_over_text_order() {
        let d = detector();
        // Tokyo appears first in the text, Paris first in the gazetteer.
        assert_eq!(
            name_of(d.detect("From Tokyo we flew to Paris.")),
            recognized("Paris")
        );
    }

    #[test]
    fn reply_mentioning_tokyo_resolves_coordinates() {
        let d = detector();
        match d.detect("You should visit Tokyo next spring.") {
            Some(SelectionEvent::Recognized(p)) => {
                assert_eq!((p.longitude(), p.latitude()), (139.6917, 35.6895));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_visit_target_is_unrecognized() {
        let d = detector();
        assert_eq!(
            d.detect("Visit Springfield today"),
            Some(SelectionEvent::Unrecognized("Springfield".into()))
        );
    }

    #[test]
    fn city_region_pairs_come_first() {
        let d = detector();
        assert_eq!(
            d.detect("We drove to Austin after Springfield, Illinois"),
            Some(SelectionEvent::Unrecognized("Springfield".into()))
        );
    }

    #[test]
    fn multi_word_phrases_are_normalized() {
        let d = detector();
        assert_eq!(
            d.detect("I grew up in Salt   Lake City and left"),
            Some(SelectionEvent::Unrecognized("Salt Lake City".into()))
        );
    }

    #[test]
    fn known_phrase_from_a_rule_falls_through_to_the_next_rule() {
        let g = Gazetteer::new([Place::new("Oslo", 10.75, 59.91)]).unwrap();
        let d = MentionDetector::new(Arc::new(g)).unwrap();
        // The exact pass rejects "OsloVille" (a letter follows the name) while the
        // in-rule still pulls "Oslo" out of it; being known, it is skipped and the
        // to-rule gets its turn.
        assert_eq!(
            d.detect("Trains run in OsloVille then to Bergen"),
            Some(SelectionEvent::Unrecognized("Bergen".into()))
        );
        assert_eq!(
            d.detect("Trains run in Oslo, then to Bergen"),
            Some(SelectionEvent::Recognized(Place::new("Oslo", 10.75, 59.91)))
        );
    }

    #[test]
    fn plain_text_yields_nothing() {
        let d = detector();
        assert_eq!(d.detect("sounds good, thanks!"), None);
        assert_eq!(d.detect(""), None);
        assert_eq!(d.detect("in the morning we go to the beach"), None);
    }

    #[test]
    fn rule_order_can_be_changed() {
        let mut rules = default_rules().unwrap();
        rules.reverse();
        let d = MentionDetector::with_rules(Arc::new(Gazetteer::builtin()), rules).unwrap();
        assert_eq!(d.rules()[0].name(), "visit");
        assert_eq!(
            d.detect("Springfield, Illinois is nice; visit Shelbyville"),
            Some(SelectionEvent::Unrecognized("Shelbyville".into()))
        );
    }

    #[test]
    fn name_pattern_escapes_metacharacters() {
        let p = name_pattern("St. John's (Old)");
        assert!(regex::Regex::new(&p).is_ok());
        assert!(p.contains(r"St\."));
    }
}
