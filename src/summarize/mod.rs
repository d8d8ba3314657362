use crate::errors::SummarizeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub mod abstractive;
pub mod composer;
pub mod elements;
pub mod extractive;
mod local;
pub mod similarity;
pub mod templates;
pub mod text;
pub mod topics;

pub use composer::{
    Composition, EngineOptions, SummaryEngine, FALLBACK_MESSAGE, KEPT_EXTRACTED_FRACTION,
};
pub use local::LocalSummarizer;
pub use templates::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Extractive,
    #[default]
    Abstractive,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Extractive => f.write_str("extractive"),
            Method::Abstractive => f.write_str("abstractive"),
        }
    }
}

impl FromStr for Method {
    type Err = SummarizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extractive" => Ok(Method::Extractive),
            "abstractive" => Ok(Method::Abstractive),
            _ => Err(SummarizeError::UnknownMethod(s.to_string())),
        }
    }
}

/// Target summary length as a fraction of the input's sentence count,
/// always strictly between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct CompressionRatio(f64);

impl CompressionRatio {
    pub const MIN: f64 = 0.01;
    pub const MAX: f64 = 0.99;
    pub const DEFAULT: f64 = 0.5;

    pub fn new(value: f64) -> Result<Self, SummarizeError> {
        if value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(SummarizeError::InvalidRatio(value))
        }
    }

    /// Pull any value into `[MIN, MAX]`; NaN becomes the default.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Self(Self::DEFAULT)
        } else {
            Self(value.clamp(Self::MIN, Self::MAX))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for CompressionRatio {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// What to do with a caller-supplied ratio outside (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatioPolicy {
    #[default]
    Clamp,
    Reject,
}

impl RatioPolicy {
    pub fn apply(self, value: f64) -> Result<CompressionRatio, SummarizeError> {
        match self {
            RatioPolicy::Clamp => Ok(CompressionRatio::clamped(value)),
            RatioPolicy::Reject => CompressionRatio::new(value),
        }
    }
}

impl FromStr for RatioPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(RatioPolicy::Clamp),
            "reject" => Ok(RatioPolicy::Reject),
            other => Err(format!("unknown ratio policy: {other}")),
        }
    }
}

/// How a summary came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// No sentences in the input.
    Empty,
    /// A single sentence, framed or returned as-is.
    Irreducible,
    /// Two or three sentences.
    Short,
    Summarized,
    /// The first attempt echoed the input; the smaller retry ratio did not.
    Retried,
    /// Nothing shorter than the input could be produced.
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummarizeResult {
    pub summary: String,
    pub method: Method,
    pub compression_ratio: f64,
    pub sentences_in: usize,
    pub sentences_out: usize,
    pub outcome: Outcome,
    pub backend: String,
}

pub trait Summarizer: Send + Sync {
    fn summarize(
        &self,
        text: &str,
        ratio: f64,
        method: Method,
    ) -> Result<SummarizeResult, SummarizeError>;
}

pub fn build_summarizer(
    policy: RatioPolicy,
    options: EngineOptions,
    max_input_bytes: usize,
) -> Arc<dyn Summarizer> {
    Arc::new(LocalSummarizer::new(
        SummaryEngine::new(options),
        policy,
        max_input_bytes,
    ))
}

/// Summarize `text` with default engine options. Out-of-range ratios are
/// clamped into (0, 1).
pub fn summarize(text: &str, ratio: f64, method: Method) -> String {
    SummaryEngine::default().summarize(text, CompressionRatio::clamped(ratio), method)
}
