use crate::summarize::text::lowercase_words;
use serde::Serialize;
use std::collections::HashMap;

pub const MAX_TOPICS: usize = 5;

const STOP_WORDS: &[&str] = &[
    "that", "this", "with", "from", "have", "were", "which", "there", "their", "they", "been",
    "also", "about", "into", "than", "these", "those", "what", "when", "would",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub word: String,
    pub frequency: usize,
}

/// Up to [`MAX_TOPICS`] content words ranked by frequency; equal counts keep
/// the order in which the words first appeared.
pub fn extract_topics(text: &str) -> Vec<Topic> {
    let mut ranked: Vec<Topic> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();
    for word in lowercase_words(text) {
        if word.chars().count() <= 3 || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        match slot.get(&word) {
            Some(&i) => ranked[i].frequency += 1,
            None => {
                slot.insert(word.clone(), ranked.len());
                ranked.push(Topic { word, frequency: 1 });
            }
        }
    }
    // stable: ties stay in first-seen order
    ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    ranked.truncate(MAX_TOPICS);
    ranked
}
