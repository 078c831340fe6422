//! JSON-lines tool server.
//!
//! Reads one tool call per line and writes one response per line. Each call
//! runs on its own task, so responses are written as calls finish and carry
//! the request `id` when one was given. A malformed line yields a validation
//! error response and the loop keeps going.

use relay_application::{ModelCatalog, ModelGateway, ToolDispatcher, ToolError, ToolOutput};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

#[derive(Debug, Deserialize)]
struct ToolCall {
    tool: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    category: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    continuation_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response {
    Success {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<Value>,
        ok: bool,
        result: ToolOutput,
    },
    Failure {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<Value>,
        ok: bool,
        error: ErrorBody,
    },
}

impl Response {
    fn new(id: Option<Value>, result: Result<ToolOutput, ToolError>) -> Self {
        match result {
            Ok(result) => Response::Success { id, ok: true, result },
            Err(err) => Response::Failure {
                id,
                ok: false,
                error: ErrorBody {
                    category: err.category().as_str(),
                    message: err.to_string(),
                    continuation_id: err.continuation_id().map(str::to_string),
                },
            },
        }
    }
}

/// Run one request line through the dispatcher and encode the response.
pub async fn handle_line<G, C>(dispatcher: &ToolDispatcher<G, C>, line: &str) -> String
where
    G: ModelGateway + 'static,
    C: ModelCatalog + 'static,
{
    let (id, result) = match serde_json::from_str::<Value>(line) {
        Ok(value) => {
            let id = value.get("id").filter(|id| !id.is_null()).cloned();
            let result = match ToolCall::deserialize(value) {
                Ok(call) => dispatcher.call(&call.tool, call.arguments).await,
                Err(e) => Err(ToolError::from(e)),
            };
            (id, result)
        }
        Err(e) => (None, Err(ToolError::from(e))),
    };
    if let Err(err) = &result {
        warn!(category = err.category().as_str(), error = %err, "Tool call failed");
    }
    let response = Response::new(id, result);
    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(
            r#"{{"ok":false,"error":{{"category":"validation","message":{}}}}}"#,
            Value::String(e.to_string())
        )
    })
}

/// Serve requests from `reader` until EOF or until `shutdown` is cancelled.
///
/// Calls already in flight when reading stops are drained and answered
/// before this returns.
pub async fn serve<G, C, R, W>(
    dispatcher: Arc<ToolDispatcher<G, C>>,
    reader: R,
    mut writer: W,
    shutdown: CancellationToken,
) -> std::io::Result<()>
where
    G: ModelGateway + 'static,
    C: ModelCatalog + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut in_flight: JoinSet<String> = JoinSet::new();
    let mut reading = true;

    while reading || !in_flight.is_empty() {
        tokio::select! {
            _ = shutdown.cancelled(), if reading => {
                info!(in_flight = in_flight.len(), "Shutdown requested, draining in-flight calls");
                reading = false;
            }
            line = lines.next_line(), if reading => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => {
                    let dispatcher = Arc::clone(&dispatcher);
                    in_flight.spawn(async move { handle_line(&dispatcher, &line).await });
                }
                None => {
                    debug!(in_flight = in_flight.len(), "Input closed");
                    reading = false;
                }
            },
            Some(done) = in_flight.join_next(), if !in_flight.is_empty() => {
                let response = done.unwrap_or_else(|e| {
                    error!(error = %e, "Tool call task failed");
                    r#"{"ok":false,"error":{"category":"upstream","message":"tool call task failed"}}"#
                        .to_string()
                });
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
    }
    Ok(())
}
