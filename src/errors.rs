use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("compression ratio must be strictly between 0 and 1, got {0}")]
    InvalidRatio(f64),
    #[error("unknown summarization method: {0}")]
    UnknownMethod(String),
    #[error("input too large: {len} bytes (max {max})")]
    InputTooLarge { len: usize, max: usize },
    #[error("other: {0}")]
    Other(String),
}
