//! Entity detectors run by the decision chain.
//!
//! Each detector looks at the lowercased question text and/or its normalized tokens and
//! yields at most one candidate. Patterns are compiled once when the set is built.

use std::sync::Arc;

use campus_core::domain::location::Location;
use campus_core::lexicon::Lexicon;
use regex::Regex;

const DISCIPLINE_CODE_PATTERN: &str = r"(?i)мдк\s*\d{2}\.\d{2}";

/// Shortest token and course-name length considered for partial discipline matches.
const PARTIAL_DISCIPLINE_MIN_CHARS: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocationMatch {
    Named(Location),
    /// Locative phrasing without a recognizable place; carries the query tokens.
    General(Vec<String>),
}

#[derive(Clone, Debug)]
pub struct EntityExtractors {
    lexicon: Arc<Lexicon>,
    discipline_code: Regex,
    teacher_phrases: Vec<Regex>,
}

impl EntityExtractors {
    pub fn new(lexicon: Arc<Lexicon>) -> Result<Self, regex::Error> {
        let discipline_code = Regex::new(DISCIPLINE_CODE_PATTERN)?;
        let teacher_phrases = lexicon
            .teacher_phrase_templates
            .iter()
            .map(|template| Regex::new(template))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { lexicon, discipline_code, teacher_phrases })
    }

    /// Course codes such as `мдк 01.01`, returned uppercased with whitespace removed.
    pub fn discipline_code(&self, lowered: &str) -> Option<String> {
        self.discipline_code
            .find(lowered)
            .map(|found| found.as_str().chars().filter(|ch| !ch.is_whitespace()).collect())
            .map(|code: String| code.to_uppercase())
    }

    pub fn common_discipline(&self, lowered: &str, tokens: &[String]) -> Option<String> {
        if let Some(name) =
            self.lexicon.disciplines.iter().find(|name| lowered.contains(name.as_str()))
        {
            return Some(capitalize(name));
        }

        self.lexicon
            .disciplines
            .iter()
            .filter(|name| name.chars().count() >= PARTIAL_DISCIPLINE_MIN_CHARS)
            .find(|name| {
                tokens.iter().any(|token| {
                    token.chars().count() >= PARTIAL_DISCIPLINE_MIN_CHARS
                        && (token.contains(name.as_str()) || name.contains(token.as_str()))
                })
            })
            .map(|name| capitalize(name))
    }

    pub fn discipline_in_text(&self, lowered: &str, tokens: &[String]) -> Option<String> {
        self.discipline_code(lowered).or_else(|| self.common_discipline(lowered, tokens))
    }

    /// Capture of the first phrase template that matches, e.g. `кто такая (\w+)`.
    pub fn teacher_phrase(&self, lowered: &str) -> Option<String> {
        self.teacher_phrases.iter().find_map(|pattern| {
            pattern.captures(lowered).and_then(|captures| captures.get(1)).map(|name| {
                name.as_str().to_string()
            })
        })
    }

    /// `None` unless the question is phrased as "where is / how to find / how to get to".
    pub fn location_phrase(&self, lowered: &str, tokens: &[String]) -> Option<LocationMatch> {
        let triggered =
            self.lexicon.navigation_markers.iter().any(|marker| lowered.contains(marker.as_str()));
        if !triggered {
            return None;
        }

        let location = self
            .lexicon
            .location_groups
            .iter()
            .find(|group| group.matches(lowered))
            .map(|group| LocationMatch::Named(group.location))
            .unwrap_or_else(|| LocationMatch::General(tokens.to_vec()));
        Some(location)
    }
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
