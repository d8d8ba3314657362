//! The top-level summarization pipeline: normalize, segment, dispatch on
//! method and sentence count, then guard against echoing the input.

use crate::summarize::abstractive::{self, boosted_ratio, Scope};
use crate::summarize::extractive;
use crate::summarize::templates::{frame, Selection};
use crate::summarize::text::{join, normalize, segment, Sentence, SentenceCount};
use crate::summarize::{CompressionRatio, Method, Outcome};
use serde::Serialize;

/// Leading share of the salient sentences that abstractive mode reuses
/// verbatim.
pub const KEPT_EXTRACTED_FRACTION: f64 = 0.3;

/// Ratio used for the one retry when a summary reproduces its input.
pub const RETRY_RATIO: f64 = 0.3;

pub const FALLBACK_MESSAGE: &str = "The text is too short to summarize meaningfully.";

// Single sentences at least this long, or containing a comma, are returned
// untouched rather than framed.
const FRAME_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineOptions {
    pub selection: Selection,
    pub kept_extracted_fraction: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            selection: Selection::First,
            kept_extracted_fraction: KEPT_EXTRACTED_FRACTION,
        }
    }
}

/// A composed summary before joining.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub sentences: Vec<String>,
    pub sentences_in: usize,
    pub outcome: Outcome,
}

impl Composition {
    pub fn summary(&self) -> String {
        join(&self.sentences)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SummaryEngine {
    options: EngineOptions,
}

impl SummaryEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn summarize(&self, text: &str, ratio: CompressionRatio, method: Method) -> String {
        self.compose(text, ratio, method).summary()
    }

    pub fn compose(&self, text: &str, ratio: CompressionRatio, method: Method) -> Composition {
        let normalized = normalize(text);
        let sentences = segment(&normalized);
        let sentences_in = sentences.len();
        let class = SentenceCount::classify(sentences_in);
        tracing::debug!(sentences = sentences_in, ?class, %method, ratio = ratio.get(), "composing summary");

        let done = |sentences: Vec<String>, outcome: Outcome| Composition {
            sentences,
            sentences_in,
            outcome,
        };

        match class {
            SentenceCount::Empty => return done(Vec::new(), Outcome::Empty),
            SentenceCount::Single => {
                return done(vec![self.paraphrase(&sentences[0].text)], Outcome::Irreducible)
            }
            SentenceCount::Short | SentenceCount::Normal => {}
        }

        let first = self.compose_sentences(&normalized, &sentences, class, ratio.get(), method);
        if reduces(&first, &normalized) {
            let outcome = match class {
                SentenceCount::Short => Outcome::Short,
                _ => Outcome::Summarized,
            };
            return done(first, outcome);
        }

        tracing::debug!(%method, retry_ratio = RETRY_RATIO, "summary reproduces the input; retrying");
        let retry = self.compose_sentences(&normalized, &sentences, class, RETRY_RATIO, method);
        if reduces(&retry, &normalized) {
            return done(retry, Outcome::Retried);
        }
        tracing::debug!(sentences = sentences_in, "text cannot be reduced; using fallback message");
        done(vec![FALLBACK_MESSAGE.to_string()], Outcome::Fallback)
    }

    fn compose_sentences(
        &self,
        normalized: &str,
        sentences: &[Sentence],
        class: SentenceCount,
        ratio: f64,
        method: Method,
    ) -> Vec<String> {
        match (class, method) {
            (SentenceCount::Short, Method::Extractive) => {
                let first = &sentences[0];
                let last = &sentences[sentences.len() - 1];
                vec![first.text.clone(), last.text.clone()]
            }
            (SentenceCount::Short, Method::Abstractive) => abstractive::compose(
                normalized,
                sentences,
                boosted_ratio(ratio),
                &self.options,
                Scope::ShortText,
            ),
            (_, Method::Extractive) => extractive::select(sentences, ratio)
                .into_iter()
                .map(|s| s.text)
                .collect(),
            (_, Method::Abstractive) => abstractive::compose(
                normalized,
                sentences,
                ratio,
                &self.options,
                Scope::Document,
            ),
        }
    }

    /// One sentence cannot be reduced further: frame it when it is short and
    /// simple, otherwise hand it back as-is.
    fn paraphrase(&self, sentence: &str) -> String {
        if sentence.chars().count() < FRAME_MAX_CHARS && !sentence.contains(',') {
            frame(sentence, self.options.selection)
        } else {
            sentence.to_string()
        }
    }
}

fn reduces(sentences: &[String], normalized: &str) -> bool {
    !sentences.is_empty() && join(sentences) != normalized
}
