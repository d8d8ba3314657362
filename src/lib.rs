//! Local text summarization: extractive sentence selection and template-based
//! abstractive synopses, plus the MCP stdio server that exposes them.

pub mod config;
pub mod errors;
pub mod logging;
pub mod mcp;
pub mod summarize;

pub use errors::SummarizeError;
pub use summarize::{summarize, CompressionRatio, Method, SummaryEngine};
