use crate::errors::SummarizeError;
use crate::summarize::{Method, RatioPolicy, SummarizeResult, Summarizer, SummaryEngine};

/// In-process summarizer: validates the caller's input, then runs the engine.
pub struct LocalSummarizer {
    engine: SummaryEngine,
    policy: RatioPolicy,
    max_input_bytes: usize,
}

impl LocalSummarizer {
    pub fn new(engine: SummaryEngine, policy: RatioPolicy, max_input_bytes: usize) -> Self {
        Self {
            engine,
            policy,
            max_input_bytes,
        }
    }
}

impl Summarizer for LocalSummarizer {
    fn summarize(
        &self,
        text: &str,
        ratio: f64,
        method: Method,
    ) -> Result<SummarizeResult, SummarizeError> {
        if text.len() > self.max_input_bytes {
            return Err(SummarizeError::InputTooLarge {
                len: text.len(),
                max: self.max_input_bytes,
            });
        }
        let ratio = self.policy.apply(ratio)?;
        let composition = self.engine.compose(text, ratio, method);
        Ok(SummarizeResult {
            summary: composition.summary(),
            method,
            compression_ratio: ratio.get(),
            sentences_in: composition.sentences_in,
            sentences_out: composition.sentences.len(),
            outcome: composition.outcome,
            backend: "local".into(),
        })
    }
}
