//! Lexical subject/verb/clause candidates. No tagging or parsing happens
//! here: the first content token is the "subject", anything ending in -ing or
//! -ed is a "verb".

use crate::summarize::text::{bare, Sentence};
use serde::Serialize;
use std::collections::HashSet;

const SKIP_AS_SUBJECT: &[&str] = &[
    "a", "an", "the", "and", "but", "or", "nor", "for", "so", "yet",
];

const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "will", "would", "could", "should", "can", "may", "might",
];

const CLAUSE_MARKERS: &[&str] = &["which", "that", "where"];

/// Candidates in first-contributed order, each listed once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementSet {
    pub subjects: Vec<String>,
    pub verbs: Vec<String>,
    pub descriptions: Vec<String>,
}

#[derive(Default)]
struct Ordered {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl Ordered {
    fn push(&mut self, item: String) {
        if self.seen.insert(item.clone()) {
            self.items.push(item);
        }
    }
}

pub fn extract_elements(sentences: &[Sentence]) -> ElementSet {
    let mut subjects = Ordered::default();
    let mut verbs = Ordered::default();
    let mut descriptions = Ordered::default();

    for sentence in sentences {
        let tokens: Vec<&str> = sentence
            .text
            .split_whitespace()
            .map(bare)
            .filter(|t| !t.is_empty())
            .collect();

        if let Some(subject) = tokens.iter().find(|t| {
            t.chars().count() > 2 && !SKIP_AS_SUBJECT.contains(&t.to_lowercase().as_str())
        }) {
            subjects.push(subject.to_string());
        }

        for token in &tokens {
            let lower = token.to_lowercase();
            if lower.ends_with("ing") || lower.ends_with("ed") || AUXILIARIES.contains(&lower.as_str())
            {
                verbs.push(lower);
            }
        }

        if let Some(description) = description_after_marker(&sentence.text) {
            descriptions.push(description);
        }
    }

    ElementSet {
        subjects: subjects.items,
        verbs: verbs.items,
        descriptions: descriptions.items,
    }
}

/// Text following the earliest clause marker, minus closing punctuation.
fn description_after_marker(text: &str) -> Option<String> {
    let mut offset = 0;
    for token in text.split_inclusive(char::is_whitespace) {
        offset += token.len();
        let word = bare(token).to_lowercase();
        if CLAUSE_MARKERS.contains(&word.as_str()) {
            let rest = text[offset..]
                .trim()
                .trim_end_matches(|c: char| matches!(c, '.' | '!' | '?' | ',' | ';' | ':'))
                .trim();
            return (!rest.is_empty()).then(|| rest.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::text::segment;

    #[test]
    fn subject_is_first_content_token() {
        let set = extract_elements(&segment("The cat sat. An ox ran. And so it goes."));
        assert_eq!(set.subjects, vec!["cat", "ran", "goes"]);
    }

    #[test]
    fn verbs_are_suffix_and_auxiliary_matches() {
        let set = extract_elements(&segment(
            "Engineers were testing bridges. The bridge failed, which worried everyone.",
        ));
        assert_eq!(set.verbs, vec!["were", "testing", "failed", "worried"]);
    }

    #[test]
    fn description_follows_earliest_marker() {
        let set = extract_elements(&segment(
            "Rust is a language that values safety, which matters. \
             The town where I grew up is small.",
        ));
        assert_eq!(
            set.descriptions,
            vec!["values safety, which matters", "I grew up is small"]
        );
    }

    #[test]
    fn elements_are_deduplicated_across_sentences() {
        let set = extract_elements(&segment(
            "Markets were rising. Markets were falling. Markets were rising.",
        ));
        assert_eq!(set.subjects, vec!["Markets"]);
        assert_eq!(set.verbs, vec!["were", "rising", "falling"]);
    }

    #[test]
    fn marker_without_following_text_is_skipped() {
        assert_eq!(description_after_marker("It was that."), None);
        assert_eq!(description_after_marker("No markers here."), None);
    }
}
