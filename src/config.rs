use crate::summarize::{EngineOptions, Method, RatioPolicy, Selection};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "text-synopsis")]
#[command(about = "MCP server exposing a local extractive/abstractive summarizer", long_about = None)]
pub struct AppConfig {
    #[arg(long, env = "SUMMARY_METHOD", default_value = "abstractive")]
    pub default_method: String,

    #[arg(long, env = "SUMMARY_RATIO", default_value_t = 0.5)]
    pub default_ratio: f64,

    #[arg(long, env = "RATIO_POLICY", default_value = "clamp")]
    pub ratio_policy: String,

    /// Seed for template and framing choices; unset means always pick the first candidate.
    #[arg(long, env = "SUMMARY_SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "KEPT_EXTRACTED_FRACTION", default_value_t = 0.3)]
    pub kept_extracted_fraction: f64,

    #[arg(long, env = "MAX_INPUT_BYTES", default_value_t = 1024 * 1024)]
    pub max_input_bytes: u32,
}

impl AppConfig {
    pub fn from_env_and_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.default_ratio > 0.0 && self.default_ratio < 1.0) {
            return Err("default_ratio must be strictly between 0 and 1".into());
        }
        if !(0.0..=1.0).contains(&self.kept_extracted_fraction) {
            return Err("kept_extracted_fraction must be within [0, 1]".into());
        }
        if self.max_input_bytes == 0 {
            return Err("max_input_bytes must be > 0".into());
        }
        if self.max_input_bytes > 100 * 1024 * 1024 {
            return Err("max_input_bytes too large (max 100MB)".into());
        }
        self.default_method
            .parse::<Method>()
            .map_err(|e| e.to_string())?;
        self.ratio_policy.parse::<RatioPolicy>()?;
        Ok(())
    }

    /// Falls back to abstractive when the configured name is unknown.
    pub fn method(&self) -> Method {
        self.default_method.parse().unwrap_or_default()
    }

    pub fn policy(&self) -> RatioPolicy {
        self.ratio_policy.parse().unwrap_or_default()
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            selection: self.seed.map(Selection::Seeded).unwrap_or_default(),
            kept_extracted_fraction: self.kept_extracted_fraction.clamp(0.0, 1.0),
        }
    }
}
