//! Normalization, sentence segmentation and the word helpers shared by the
//! scoring and extraction stages.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\r\n|\r|\n)+").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// A run of non-terminal characters closed by one or more terminators, or by
// the end of the text.
static SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+(?:[.!?]+|$)").unwrap());

/// A segmented sentence. `original_index` restores narrative order after any
/// reordering by score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentence {
    pub text: String,
    pub original_index: usize,
}

/// How many sentences a document has, as far as the composer cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceCount {
    Empty,
    Single,
    Short,
    Normal,
}

impl SentenceCount {
    pub fn classify(n: usize) -> Self {
        match n {
            0 => SentenceCount::Empty,
            1 => SentenceCount::Single,
            2..=3 => SentenceCount::Short,
            _ => SentenceCount::Normal,
        }
    }
}

pub fn normalize(raw: &str) -> String {
    let flattened = LINE_BREAKS.replace_all(raw, " ");
    WHITESPACE.replace_all(&flattened, " ").trim().to_string()
}

/// Split normalized text into sentences. Fragments without a single
/// alphanumeric character (stray ellipses, lone "?") are dropped.
pub fn segment(normalized: &str) -> Vec<Sentence> {
    SENTENCE
        .find_iter(normalized)
        .map(|m| m.as_str().trim())
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .enumerate()
        .map(|(original_index, text)| Sentence {
            text: text.to_string(),
            original_index,
        })
        .collect()
}

pub fn join(sentences: &[String]) -> String {
    sentences.join(" ")
}

/// Strip leading and trailing punctuation from a whitespace token.
pub fn bare(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Lowercase words with every non-alphanumeric character removed.
pub fn lowercase_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|t| {
            t.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
}
