//! Template filling for abstractive mode, plus the framing used to paraphrase
//! single-sentence documents.

use crate::summarize::topics::Topic;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

pub const MAX_GENERATED: usize = 4;

const TEMPLATES: &[&str] = &[
    "The text discusses #TOPIC and its relationship with #TOPIC2.",
    "A central point about #TOPIC is that #DESCRIPTION.",
    "#TOPIC is examined alongside #TOPIC2 throughout the passage.",
    "The discussion of #TOPIC highlights #DESCRIPTION.",
    "Key ideas connect #TOPIC with #DESCRIPTION.",
    "Overall, the passage relates #TOPIC to #TOPIC2.",
];

const FRAMES: &[&str] = &["In summary, ", "The text states that ", "Essentially, "];

/// How arbitrary choices (framing, description candidates) are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Always take the first candidate.
    #[default]
    First,
    /// Draw from a generator seeded per call.
    Seeded(u64),
}

pub(crate) struct Picker {
    rng: Option<StdRng>,
}

impl Picker {
    pub(crate) fn new(selection: Selection) -> Self {
        let rng = match selection {
            Selection::First => None,
            Selection::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
        };
        Self { rng }
    }

    pub(crate) fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        match self.rng.as_mut() {
            Some(rng) => items.choose(rng),
            None => items.first(),
        }
    }
}

/// Number of sentences to generate: `max(1, min(4, floor(topics * ratio * 2)))`.
pub fn target_count(topic_count: usize, ratio: f64) -> usize {
    let raw = ((topic_count as f64) * ratio * 2.0).floor() as usize;
    raw.min(MAX_GENERATED).max(1).min(TEMPLATES.len())
}

/// Fill the first `count` templates in bank order.
pub fn generate(
    topics: &[Topic],
    descriptions: &[String],
    count: usize,
    selection: Selection,
) -> Vec<String> {
    let mut picker = Picker::new(selection);
    let topic = topics.first().map(|t| t.word.as_str()).unwrap_or("the subject");
    let topic2 = match topics {
        [] => "related concepts",
        [only] => only.word.as_str(),
        [_, second, ..] => second.word.as_str(),
    };

    TEMPLATES
        .iter()
        .take(count.min(TEMPLATES.len()))
        .map(|template| {
            let mut filled = template.replace("#TOPIC2", topic2).replace("#TOPIC", topic);
            if filled.contains("#DESCRIPTION") {
                let description = picker
                    .pick(descriptions)
                    .cloned()
                    .unwrap_or_else(|| format!("aspects related to {topic}"));
                filled = filled.replace("#DESCRIPTION", &description);
            }
            capitalize(&filled)
        })
        .collect()
}

/// Wrap a single sentence in a framing phrase, e.g. "In summary, cats are
/// mammals."
pub fn frame(sentence: &str, selection: Selection) -> String {
    let mut picker = Picker::new(selection);
    let prefix = picker.pick(FRAMES).copied().unwrap_or(FRAMES[0]);
    format!("{prefix}{}", decapitalize(sentence))
}

/// The single comprehensive sentence used when only one sentence survives
/// abstractive composition. `None` without topics.
pub fn comprehensive(topics: &[Topic]) -> Option<String> {
    let (first, rest) = topics.split_first()?;
    if rest.is_empty() {
        return Some(format!("The text primarily discusses {}.", first.word));
    }
    let related = rest
        .iter()
        .map(|t| t.word.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!(
        "The text primarily discusses {}, along with related concepts such as {related}.",
        first.word
    ))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// Acronyms such as "NASA" and the pronoun "I" (I'm, I've) keep their case.
fn decapitalize(s: &str) -> String {
    let first_word = s.split_whitespace().next().unwrap_or("");
    let bare = first_word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '’');
    if bare == "I" || bare.starts_with("I'") || bare.starts_with("I’") {
        return s.to_string();
    }
    let letters: Vec<char> = first_word.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        return s.to_string();
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(words: &[&str]) -> Vec<Topic> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| Topic {
                word: w.to_string(),
                frequency: words.len() - i,
            })
            .collect()
    }

    #[test]
    fn bank_is_large_enough() {
        assert!(TEMPLATES.len() >= 6);
    }

    #[test]
    fn target_count_formula() {
        assert_eq!(target_count(5, 0.5), 4);
        assert_eq!(target_count(5, 0.25), 2);
        assert_eq!(target_count(1, 0.3), 1);
        assert_eq!(target_count(0, 0.9), 1);
    }

    #[test]
    fn fills_placeholders_in_bank_order() {
        let out = generate(
            &topics(&["rivers", "valleys"]),
            &["sediment moves downstream".to_string()],
            3,
            Selection::First,
        );
        assert_eq!(
            out,
            vec![
                "The text discusses rivers and its relationship with valleys.",
                "A central point about rivers is that sediment moves downstream.",
                "Rivers is examined alongside valleys throughout the passage.",
            ]
        );
    }

    #[test]
    fn falls_back_without_topics_or_descriptions() {
        let out = generate(&[], &[], 2, Selection::First);
        assert_eq!(out[0], "The text discusses the subject and its relationship with related concepts.");
        assert_eq!(out[1], "A central point about the subject is that aspects related to the subject.");

        let out = generate(&topics(&["rivers"]), &[], 1, Selection::First);
        assert_eq!(out[0], "The text discusses rivers and its relationship with rivers.");
    }

    #[test]
    fn seeded_selection_is_reproducible() {
        let descriptions: Vec<String> = (0..8).map(|i| format!("detail {i}")).collect();
        let t = topics(&["rivers", "valleys"]);
        let a = generate(&t, &descriptions, 5, Selection::Seeded(7));
        let b = generate(&t, &descriptions, 5, Selection::Seeded(7));
        assert_eq!(a, b);
        assert!(a.iter().all(|s| !s.contains('#')));
    }

    #[test]
    fn frame_lowercases_the_clause() {
        assert_eq!(
            frame("Cats are mammals.", Selection::First),
            "In summary, cats are mammals."
        );
        assert_eq!(
            frame("NASA launched a rocket.", Selection::First),
            "In summary, NASA launched a rocket."
        );
        assert_eq!(
            frame("I think cats are mammals.", Selection::First),
            "In summary, I think cats are mammals."
        );
        assert_eq!(
            frame("I'm sure cats are mammals.", Selection::First),
            "In summary, I'm sure cats are mammals."
        );
        assert_eq!(
            frame("Ice is frozen water.", Selection::First),
            "In summary, ice is frozen water."
        );
        let framed = frame("Cats are mammals.", Selection::Seeded(3));
        assert!(framed.ends_with("cats are mammals."));
    }

    #[test]
    fn comprehensive_lists_every_topic() {
        assert_eq!(comprehensive(&[]), None);
        assert_eq!(
            comprehensive(&topics(&["rivers"])).as_deref(),
            Some("The text primarily discusses rivers.")
        );
        assert_eq!(
            comprehensive(&topics(&["rivers", "valleys", "sediment"])).as_deref(),
            Some("The text primarily discusses rivers, along with related concepts such as valleys, sediment.")
        );
    }
}
