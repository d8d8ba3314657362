use crate::summarize::text::lowercase_words;
use std::collections::HashSet;

/// Candidates scoring above this against an accepted sentence are dropped.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

fn word_set(sentence: &str) -> HashSet<String> {
    lowercase_words(sentence)
        .filter(|w| w.chars().count() > 2)
        .collect()
}

/// Dice coefficient over the two sentences' word sets.
pub fn dice(a: &str, b: &str) -> f64 {
    let a = word_set(a);
    let b = word_set(b);
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    2.0 * a.intersection(&b).count() as f64 / total as f64
}

pub fn is_near_duplicate(candidate: &str, accepted: &[String]) -> bool {
    accepted
        .iter()
        .any(|kept| dice(candidate, kept) > SIMILARITY_THRESHOLD)
}

/// Append each candidate to `accepted` unless it is a near duplicate of
/// something already there. Returns how many were dropped.
pub fn extend_distinct<I>(accepted: &mut Vec<String>, candidates: I) -> usize
where
    I: IntoIterator<Item = String>,
{
    let mut dropped = 0;
    for candidate in candidates {
        if is_near_duplicate(&candidate, accepted) {
            tracing::trace!(%candidate, "dropping near-duplicate sentence");
            dropped += 1;
        } else {
            accepted.push(candidate);
        }
    }
    dropped
}
