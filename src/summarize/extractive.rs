//! Sentence scoring and ratio-driven selection.

use crate::summarize::text::{bare, Sentence};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const SIGNAL_WORDS: &[&str] = &[
    "important",
    "significant",
    "significantly",
    "key",
    "main",
    "essential",
    "crucial",
    "critical",
    "primary",
    "notably",
    "particularly",
    "especially",
    "therefore",
    "thus",
    "consequently",
    "however",
    "in conclusion",
    "in summary",
    "to summarize",
    "overall",
    "first",
    "finally",
    "result",
    "results",
    "demonstrates",
];

// Counting more than this many signal hits stops paying off.
const MAX_SIGNAL_HITS: usize = 5;

static SIGNAL: Lazy<Regex> = Lazy::new(|| {
    let alternatives = SIGNAL_WORDS
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternatives})\b")).unwrap()
});

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSentence {
    pub text: String,
    pub original_index: usize,
    pub score: f64,
}

pub fn position_score(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    let n = total as f64;
    let leading = (index as f64) / n < 0.2;
    let trailing = ((index + 1) as f64) / n > 0.8;
    if leading || trailing {
        2.0
    } else {
        1.0
    }
}

pub fn length_score(text: &str) -> f64 {
    match text.split_whitespace().count() {
        w if w > 5 && w < 30 => 1.5,
        w if w >= 30 => 0.7,
        _ => 0.5,
    }
}

pub fn signal_score(text: &str) -> f64 {
    let hits = SIGNAL.find_iter(text).count().min(MAX_SIGNAL_HITS);
    1.0 + 0.3 * hits as f64
}

/// Digits, or a capitalized word past the first one, hint at names and data.
pub fn density_score(text: &str) -> f64 {
    let has_digits = DIGITS.is_match(text);
    let has_inner_capital = text
        .split_whitespace()
        .skip(1)
        .filter_map(|t| bare(t).chars().next())
        .any(char::is_uppercase);
    if has_digits || has_inner_capital {
        1.5
    } else {
        1.0
    }
}

pub fn score_sentences(sentences: &[Sentence]) -> Vec<ScoredSentence> {
    let total = sentences.len();
    sentences
        .iter()
        .map(|s| ScoredSentence {
            text: s.text.clone(),
            original_index: s.original_index,
            score: position_score(s.original_index, total)
                * length_score(&s.text)
                * signal_score(&s.text)
                * density_score(&s.text),
        })
        .collect()
}

/// Sentence budget for extractive selection: `max(1, floor(n * ratio))`.
pub fn budget(total: usize, ratio: f64) -> usize {
    (((total as f64) * ratio).floor() as usize).clamp(1, total.max(1))
}

/// Keep the best-scoring sentences within the budget, returned in narrative
/// order. Equal scores keep the earlier sentence.
pub fn select(sentences: &[Sentence], ratio: f64) -> Vec<Sentence> {
    if sentences.is_empty() {
        return Vec::new();
    }
    let mut scored = score_sentences(sentences);
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(budget(sentences.len(), ratio));
    scored.sort_by_key(|s| s.original_index);
    scored
        .into_iter()
        .map(|s| Sentence {
            text: s.text,
            original_index: s.original_index,
        })
        .collect()
}
