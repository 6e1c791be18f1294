//! MCP client over a line-delimited JSON-RPC byte stream.

use crate::mcp::protocol::{self, Incoming, methods};
use agent_sdk::{BoundArguments, ToolCallResult, ToolHost, ToolSpec, TransportError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info};

/// Name the client reports in `initialize`.
pub const CLIENT_NAME: &str = "toolloop";

/// How to launch a tool server process.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StdioServer {
    /// Executable to run.
    pub command: String,
    /// Arguments passed to the executable.
    #[serde(default)]
    pub args: Vec<String>,
    /// Extra environment for the child.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl StdioServer {
    /// Creates a launch description without extra environment.
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: BTreeMap::new(),
        }
    }
}

struct Channel<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Channel<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, message: &Value) -> Result<(), TransportError> {
        let line = protocol::encode_line(message)?;
        self.writer.write_all(&line).await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn read_message(&mut self) -> Result<Value, TransportError> {
        loop {
            let mut line = String::new();
            let read = self.reader.read_line(&mut line).await?;
            if read == 0 {
                return Err(TransportError::Closed);
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return serde_json::from_str(trimmed).map_err(|e| {
                TransportError::Protocol(format!("invalid JSON from tool host: {e}"))
            });
        }
    }
}

/// A tool host reached through MCP over a pair of byte streams.
///
/// Requests are serialized; one request is in flight at a time.
pub struct McpClient<R, W> {
    channel: Mutex<Channel<R, W>>,
    next_id: AtomicU64,
    request_timeout: Duration,
    child: Option<Child>,
}

/// Client talking to a spawned server process over its stdin/stdout.
pub type StdioClient = McpClient<BufReader<ChildStdout>, ChildStdin>;

impl StdioClient {
    /// Spawns the server process and performs the `initialize` handshake.
    ///
    /// The child inherits stderr and is killed when the client is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started or the handshake fails.
    pub async fn spawn(server: &StdioServer, request_timeout: Duration) -> Result<Self, TransportError> {
        let mut child = Command::new(&server.command)
            .args(&server.args)
            .envs(&server.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TransportError::Protocol("tool host stdin unavailable".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| TransportError::Protocol("tool host stdout unavailable".into()))?;

        info!(command = %server.command, args = ?server.args, pid = ?child.id(), "Spawned tool host");

        let mut client = McpClient::new(BufReader::new(stdout), stdin, request_timeout);
        client.child = Some(child);
        client.initialize().await?;
        Ok(client)
    }
}

impl<R, W> McpClient<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Wraps an already connected stream pair. Call [`Self::initialize`] before use.
    pub fn new(reader: R, writer: W, request_timeout: Duration) -> Self {
        Self {
            channel: Mutex::new(Channel { reader, writer }),
            next_id: AtomicU64::new(1),
            request_timeout,
            child: None,
        }
    }

    /// Bound on the whole wait for a response, however much else the server sends meanwhile.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Runs the `initialize` / `notifications/initialized` handshake.
    ///
    /// Returns the server's `initialize` result.
    ///
    /// # Errors
    ///
    /// Returns an error if the server does not complete the handshake.
    pub async fn initialize(&self) -> Result<Value, TransportError> {
        let result = self
            .request(
                methods::INITIALIZE,
                protocol::initialize_params(CLIENT_NAME, env!("CARGO_PKG_VERSION")),
            )
            .await?;
        self.notify(methods::INITIALIZED).await?;

        let server = result
            .pointer("/serverInfo/name")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        info!(server, protocol = ?result.get("protocolVersion"), "Tool host initialized");
        Ok(result)
    }

    /// Sends a request and waits for its response.
    ///
    /// Notifications and stray responses are skipped; server-initiated requests
    /// are answered (`ping` with an empty result, anything else with method-not-found).
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure, timeout, closed stream, invalid JSON,
    /// or a JSON-RPC error response.
    pub async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut channel = self.channel.lock().await;
        debug!(id, method, "Sending tool host request");
        channel.send(&protocol::request(id, method, params)).await?;

        let wait = async {
            loop {
                let message = channel.read_message().await?;
                match protocol::classify(message, id) {
                    Incoming::Response(response) => return protocol::extract_result(response),
                    Incoming::Request { id: peer_id, method: name } => {
                        debug!(method = %name, "Answering tool host request");
                        channel.send(&protocol::reply_to(peer_id, &name)).await?;
                    }
                    Incoming::Notification(name) => {
                        debug!(method = %name, "Skipping tool host notification");
                    }
                    Incoming::Unrelated => debug!(id, "Skipping response to another request"),
                }
            }
        };
        timeout(self.request_timeout, wait)
            .await
            .map_err(|_| TransportError::Timeout {
                method: method.to_string(),
                timeout: self.request_timeout,
            })?
    }

    /// Sends a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn notify(&self, method: &str) -> Result<(), TransportError> {
        self.channel
            .lock()
            .await
            .send(&protocol::notification(method))
            .await
    }
}

#[async_trait]
impl<R, W> ToolHost for McpClient<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, TransportError> {
        let result = self.request(methods::TOOLS_LIST, json!({})).await?;
        protocol::decode_tools(result)
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: &BoundArguments,
    ) -> Result<ToolCallResult, TransportError> {
        let result = self
            .request(
                methods::TOOLS_CALL,
                json!({ "name": name, "arguments": arguments }),
            )
            .await?;
        serde_json::from_value(result)
            .map_err(|e| TransportError::Protocol(format!("invalid tools/call result: {e}")))
    }
}

impl<R, W> Drop for McpClient<R, W> {
    fn drop(&mut self) {
        if let Some(child) = self.child.as_mut() {
            debug!(pid = ?child.id(), "Stopping tool host");
            let _ = child.start_kill();
        }
    }
}
