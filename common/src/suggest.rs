//! Incremental suggestion filtering for the search form.
//!
//! Each keystroke recomputes the whole suggestion list from scratch against
//! a static reference slice; nothing is streamed or diffed. Queries of one
//! character or less never match, which keeps single-letter input from
//! flooding the list.

use crate::reference::Location;

/// Queries shorter than this produce no suggestions.
const MIN_QUERY_CHARS: usize = 2;

fn below_threshold(query: &str) -> bool {
    query.chars().count() < MIN_QUERY_CHARS
}

/// Locations whose city or country contains the query, case-insensitively
/// and unanchored. Source order is preserved.
pub fn location_suggestions<'a>(locations: &'a [Location], query: &str) -> Vec<&'a Location> {
    let query = query.to_lowercase();
    if below_threshold(&query) {
        return Vec::new();
    }

    locations
        .iter()
        .filter(|location| {
            location.city.to_lowercase().contains(&query)
                || location.country.to_lowercase().contains(&query)
        })
        .collect()
}

/// Skill terms containing the query, case-insensitively and unanchored.
pub fn skill_suggestions<'a>(skills: &'a [String], query: &str) -> Vec<&'a str> {
    let query = query.to_lowercase();
    if below_threshold(&query) {
        return Vec::new();
    }

    skills
        .iter()
        .filter(|skill| skill.to_lowercase().contains(&query))
        .map(String::as_str)
        .collect()
}

/// Display form of a chosen location suggestion.
pub fn format_location(location: &Location) -> String {
    format!("{}, {}", location.city, location.country)
}

/// View state of the location input: the text it displays and the
/// suggestion list currently shown under it. The caller owns the state
/// lifecycle; the transitions here are the whole behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationField {
    pub value: String,
    pub suggestions: Vec<Location>,
}

impl LocationField {
    /// A keystroke: take the new text and rebuild the suggestion list in
    /// full, replacing whatever was shown before.
    pub fn input(&mut self, text: &str, locations: &[Location]) {
        self.value = text.to_string();
        self.suggestions = location_suggestions(locations, text)
            .into_iter()
            .cloned()
            .collect();
    }

    /// Picking a suggestion: the field shows `"{city}, {country}"` and the
    /// list disappears.
    pub fn select(&mut self, choice: &Location) {
        self.value = format_location(choice);
        self.suggestions.clear();
    }
}

/// View state of the criteria (skills) input. Same shape as
/// [`LocationField`], but suggestions are plain terms and selection keeps
/// the term verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaField {
    pub value: String,
    pub suggestions: Vec<String>,
}

impl CriteriaField {
    pub fn input(&mut self, text: &str, skills: &[String]) {
        self.value = text.to_string();
        self.suggestions = skill_suggestions(skills, text)
            .into_iter()
            .map(str::to_string)
            .collect();
    }

    pub fn select(&mut self, choice: &str) {
        self.value = choice.to_string();
        self.suggestions.clear();
    }
}
