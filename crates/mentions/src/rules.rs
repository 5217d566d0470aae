use regex::Regex;

use crate::MentionError;

/// One or more words, each an uppercase letter followed by lowercase letters.
const CAPITALIZED_PHRASE: &str = r"\p{Lu}\p{Ll}+(?:\s+\p{Lu}\p{Ll}+)*";

/// A single heuristic: a regex with a `place` capture group.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    regex: Regex,
}

impl Rule {
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, MentionError> {
        let regex = Regex::new(pattern).map_err(|source| MentionError::InvalidPattern {
            name: name.to_string(),
            source,
        })?;
        Ok(Self { name, regex })
    }

    /// A capitalized phrase directly after `trigger` (matched case-insensitively as a word).
    pub fn after_trigger(name: &'static str, trigger: &str) -> Result<Self, MentionError> {
        let trigger = regex::escape(trigger);
        Self::new(
            name,
            &format!(r"\b(?i:{trigger})\s+(?P<place>{CAPITALIZED_PHRASE})"),
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Phrase captured by the first match, trimmed and whitespace-normalized.
    pub fn extract(&self, text: &str) -> Option<String> {
        let caps = self.regex.captures(text)?;
        let phrase = caps.name("place")?.as_str();
        let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        (!normalized.is_empty()).then_some(normalized)
    }
}

/// "City, Region", "in City", "to City", "visit City", in that order.
pub fn default_rules() -> Result<Vec<Rule>, MentionError> {
    Ok(vec![
        Rule::new(
            "city_region",
            &format!(r"\b(?P<place>{CAPITALIZED_PHRASE}),\s*{CAPITALIZED_PHRASE}"),
        )?,
        Rule::after_trigger("in", "in")?,
        Rule::after_trigger("to", "to")?,
        Rule::after_trigger("visit", "visit")?,
    ])
}
