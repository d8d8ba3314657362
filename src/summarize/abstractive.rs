use crate::summarize::composer::EngineOptions;
use crate::summarize::elements::extract_elements;
use crate::summarize::extractive;
use crate::summarize::similarity::extend_distinct;
use crate::summarize::templates::{comprehensive, generate, target_count};
use crate::summarize::text::Sentence;
use crate::summarize::topics::extract_topics;

/// Which sentences feed element extraction and how long the result may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// Pre-summarize at a boosted ratio, budget derived from the ratio.
    Document,
    /// Use every sentence as-is; the caller has already boosted the ratio.
    ShortText,
}

/// `min(0.5, ratio * 1.5)`: the ratio used for the salient-sentence pass.
pub fn boosted_ratio(ratio: f64) -> f64 {
    (ratio * 1.5).min(0.5)
}

/// `max(1, ceil(n * ratio * 0.8))`
pub fn sentence_budget(total: usize, ratio: f64) -> usize {
    (((total as f64) * ratio * 0.8).ceil() as usize).max(1)
}

pub fn kept_count(salient: usize, fraction: f64) -> usize {
    ((salient as f64) * fraction.clamp(0.0, 1.0)).floor() as usize
}

pub(crate) fn compose(
    normalized: &str,
    sentences: &[Sentence],
    ratio: f64,
    options: &EngineOptions,
    scope: Scope,
) -> Vec<String> {
    let (salient, budget) = match scope {
        Scope::Document => (
            extractive::select(sentences, boosted_ratio(ratio)),
            sentence_budget(sentences.len(), ratio),
        ),
        Scope::ShortText => (
            sentences.to_vec(),
            sentence_budget(sentences.len(), ratio),
        ),
    };

    let topics = extract_topics(normalized);
    let elements = extract_elements(&salient);
    let generated = generate(
        &topics,
        &elements.descriptions,
        target_count(topics.len(), ratio),
        options.selection,
    );

    let keep = kept_count(salient.len(), options.kept_extracted_fraction);
    let mut accepted = Vec::with_capacity(keep + generated.len());
    extend_distinct(
        &mut accepted,
        salient.iter().take(keep).map(|s| s.text.clone()),
    );
    let kept = accepted.len();
    let dropped = extend_distinct(&mut accepted, generated);
    tracing::debug!(
        ?scope,
        salient = salient.len(),
        topics = topics.len(),
        subjects = elements.subjects.len(),
        verbs = elements.verbs.len(),
        descriptions = elements.descriptions.len(),
        kept,
        dropped,
        budget,
        "abstractive candidates assembled"
    );

    accepted.truncate(budget);
    if accepted.len() == 1 {
        if let Some(sentence) = comprehensive(&topics) {
            accepted = vec![sentence];
        }
    }
    accepted
}
