use crate::summarize::elements::extract_elements;
use crate::summarize::extractive::score_sentences;
use crate::summarize::text::{normalize, segment, SentenceCount};
use crate::summarize::topics::extract_topics;
use crate::summarize::{EngineOptions, Method, Summarizer};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::{BufRead, Write};
use std::sync::Arc;

const SERVER_NAME: &str = "text-synopsis";
const CONFIG_URI: &str = "mcp://text-synopsis/config";

/// Values applied when a `summarize` call leaves an argument out.
#[derive(Debug, Clone, Serialize)]
pub struct ServerDefaults {
    pub method: Method,
    pub compression_ratio: f64,
    pub engine: EngineOptions,
}

pub struct StdioMcpServer {
    summarizer: Arc<dyn Summarizer>,
    defaults: ServerDefaults,
}

impl StdioMcpServer {
    pub fn new(summarizer: Arc<dyn Summarizer>, defaults: ServerDefaults) -> Self {
        Self {
            summarizer,
            defaults,
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let reader = std::io::BufReader::new(stdin.lock());
        let writer = std::io::BufWriter::new(stdout.lock());
        self.serve(reader, writer).await
    }

    /// Answer framed requests until the reader is exhausted.
    pub async fn serve<R: BufRead, W: Write>(&self, reader: R, writer: W) -> anyhow::Result<()> {
        let mut transport = Transport::new(reader, writer);
        tracing::info!("run loop started: waiting for framed MCP requests");
        loop {
            let msg = match transport.read_message() {
                Ok(m) => m,
                Err(e) => {
                    tracing::debug!(error=?e, "input closed or invalid frame");
                    break;
                }
            };
            let req: serde_json::Value = match serde_json::from_slice(&msg) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error=?e, "invalid JSON");
                    continue;
                }
            };

            let method = req.get("method").and_then(|m| m.as_str()).unwrap_or("");
            // notifications carry no id and get no reply
            let Some(id) = req.get("id").filter(|v| !v.is_null()).cloned() else {
                tracing::debug!(%method, "notification received");
                continue;
            };
            tracing::info!(%method, %id, "received request");
            let params = req.get("params").cloned().unwrap_or(json!({}));
            match self.handle(method, params).await {
                Ok(result) => transport.write_response(id, result)?,
                Err(RpcError { code, message }) => transport.write_error(id, code, &message)?,
            }
        }
        Ok(())
    }

    async fn handle(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, RpcError> {
        let server_info = json!({"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")});
        match method {
            "initialize" => {
                let client_proto = params
                    .get("protocolVersion")
                    .and_then(|x| x.as_str())
                    .unwrap_or("2024-11-05");
                Ok(json!({
                    "protocolVersion": client_proto,
                    "capabilities": {
                        "tools": {"list": true, "call": true},
                        "prompts": {"list": true},
                        "resources": {"list": true, "read": true, "subscribe": false}
                    },
                    "serverInfo": server_info
                }))
            }
            "server/info" => Ok(json!({"serverInfo": server_info})),
            "tools/list" => Ok(json!({"tools": list_tools_schema()})),
            "prompts/list" => Ok(json!({"prompts": []})),
            "resources/list" => Ok(json!({"resources": [{
                "uri": CONFIG_URI,
                "name": "Summarizer defaults",
                "description": "Default method, compression ratio and engine options",
                "mimeType": "application/json"
            }]})),
            "resources/read" => {
                let uri = params.get("uri").and_then(|x| x.as_str()).unwrap_or("");
                if uri != CONFIG_URI {
                    return Err(RpcError::new(-32602, "Unknown resource uri"));
                }
                let text = serde_json::to_string_pretty(&self.defaults)
                    .unwrap_or_else(|_| "{}".into());
                Ok(json!({"contents": [{
                    "uri": uri,
                    "mimeType": "application/json",
                    "text": text
                }]}))
            }
            "tools/call" => {
                let name = params.get("name").and_then(|x| x.as_str()).unwrap_or("");
                let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
                let v = self
                    .dispatch_tool(name, arguments)
                    .await
                    .map_err(|e| RpcError::new(-32001, format!("{e}")))?;
                Ok(json!({"content": [{"type":"json","json": v}], "isError": false}))
            }
            _ => Err(RpcError::new(-32601, "method not found")),
        }
    }

    async fn dispatch_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> anyhow::Result<serde_json::Value> {
        match name {
            "summarize" => {
                let p: SummarizeParams = serde_json::from_value(arguments)?;
                let method = match p.method.as_deref() {
                    Some(m) => m.parse::<Method>()?,
                    None => self.defaults.method,
                };
                let ratio = p.compression_ratio.unwrap_or(self.defaults.compression_ratio);
                let summarizer = self.summarizer.clone();
                let res = tokio::task::spawn_blocking(move || {
                    summarizer.summarize(&p.text, ratio, method)
                })
                .await??;
                tracing::info!(
                    %method,
                    ratio = res.compression_ratio,
                    sentences_in = res.sentences_in,
                    sentences_out = res.sentences_out,
                    outcome = ?res.outcome,
                    "summary produced"
                );
                Ok(serde_json::to_value(res)?)
            }
            "analyze" => {
                let p: AnalyzeParams = serde_json::from_value(arguments)?;
                Ok(analyze(&p.text))
            }
            _ => anyhow::bail!("unknown tool: {name}"),
        }
    }
}

/// Stage-by-stage view of how the engine sees a text.
fn analyze(text: &str) -> serde_json::Value {
    let normalized = normalize(text);
    let sentences = segment(&normalized);
    json!({
        "sentence_count": sentences.len(),
        "classification": SentenceCount::classify(sentences.len()),
        "sentences": score_sentences(&sentences),
        "topics": extract_topics(&normalized),
        "elements": extract_elements(&sentences),
    })
}

fn list_tools_schema() -> Vec<serde_json::Value> {
    vec![
        json!({"name":"summarize","description":"Summarize text locally (extractive or template-based abstractive)","inputSchema":{"type":"object","required":["text"],"properties":{
            "text": {"type":"string"},
            "compression_ratio": {"type":"number","exclusiveMinimum":0,"exclusiveMaximum":1},
            "method": {"type":"string","enum":["extractive","abstractive"]}
        }}}),
        json!({"name":"analyze","description":"Show sentence scores, topics and extracted elements for a text","inputSchema":{"type":"object","required":["text"],"properties":{
            "text": {"type":"string"}
        }}}),
    ]
}

#[derive(Debug)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Framing {
    ContentLength,
    /// One JSON document per line; switched on when a client sends raw JSON.
    NdJson,
}

struct Transport<R, W> {
    reader: R,
    writer: W,
    framing: Framing,
}

impl<R: BufRead, W: Write> Transport<R, W> {
    fn new(reader: R, writer: W) -> Self {
        let framing = if std::env::var("MCP_FORCE_NDJSON").ok().as_deref() == Some("1") {
            Framing::NdJson
        } else {
            Framing::ContentLength
        };
        Self {
            reader,
            writer,
            framing,
        }
    }

    fn read_message(&mut self) -> anyhow::Result<Vec<u8>> {
        let mut header = String::new();
        let mut content_length: Option<usize> = None;
        let mut header_lines: usize = 0;
        loop {
            header.clear();
            if self.reader.read_line(&mut header)? == 0 {
                anyhow::bail!("eof");
            }
            let line = header.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                if header_lines == 0 {
                    continue;
                }
                break;
            }
            header_lines += 1;
            tracing::trace!(%line, "framing header line");
            if header_lines == 1 && line.starts_with('{') && line.contains("\"jsonrpc\"") {
                tracing::debug!("raw JSON line without Content-Length; switching to ND-JSON");
                self.framing = Framing::NdJson;
                return Ok(line.as_bytes().to_vec());
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.trim().eq_ignore_ascii_case("content-length") {
                    content_length = Some(value.trim().parse::<usize>()?);
                }
            }
        }
        let len = content_length.ok_or_else(|| anyhow::anyhow!("missing Content-Length"))?;
        let mut body = vec![0u8; len];
        self.reader.read_exact(&mut body)?;
        tracing::trace!(header_lines, content_length = len, "framed message parsed");
        Ok(body)
    }

    fn write_response(
        &mut self,
        id: serde_json::Value,
        result: serde_json::Value,
    ) -> anyhow::Result<()> {
        self.write(&json!({"jsonrpc":"2.0","id": id, "result": result}))
    }

    fn write_error(&mut self, id: serde_json::Value, code: i64, message: &str) -> anyhow::Result<()> {
        self.write(&json!({"jsonrpc":"2.0","id": id, "error": {"code": code, "message": message}}))
    }

    fn write(&mut self, v: &serde_json::Value) -> anyhow::Result<()> {
        let s = serde_json::to_string(v)?;
        match self.framing {
            Framing::NdJson => writeln!(self.writer, "{s}")?,
            Framing::ContentLength => write!(self.writer, "Content-Length: {}\r\n\r\n{}", s.len(), s)?,
        }
        self.writer.flush()?;
        Ok(())
    }
}

// Wire structs for tool params
#[derive(Debug, Deserialize)]
struct SummarizeParams {
    text: String,
    compression_ratio: Option<f64>,
    method: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeParams {
    text: String,
}
