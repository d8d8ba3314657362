use text_synopsis::config::AppConfig;
use text_synopsis::logging;
use text_synopsis::mcp::{ServerDefaults, StdioMcpServer};
use text_synopsis::summarize::{build_summarizer, CompressionRatio};

#[tokio::main]
async fn main() {
    logging::init_logging();

    let cfg = AppConfig::from_env_and_args();
    if let Err(e) = cfg.validate() {
        tracing::warn!(config_error=%e, "invalid config");
    }

    let options = cfg.engine_options();
    let defaults = ServerDefaults {
        method: cfg.method(),
        compression_ratio: CompressionRatio::clamped(cfg.default_ratio).get(),
        engine: options,
    };
    let summarizer = build_summarizer(cfg.policy(), options, cfg.max_input_bytes as usize);

    tracing::info!(
        default_method=%defaults.method,
        default_ratio=defaults.compression_ratio,
        seeded=cfg.seed.is_some(),
        max_input_bytes=cfg.max_input_bytes,
        "MCP server startup complete"
    );

    let server = StdioMcpServer::new(summarizer, defaults);
    // run future is not Send (stdio locks), so select on it in place
    tokio::select! {
        res = server.run() => {
            if let Err(e) = res { tracing::error!(error=?e, "server terminated with error") }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, exiting");
        }
    }
}
