//! MCP client tests against an in-process fake server over `tokio::io::duplex`.

use agent_sdk::{
    ArgumentBinder, BoundArguments, FunctionCall, ToolCatalog, ToolHost, TransportError,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{
    AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf, WriteHalf, duplex, split,
};
use toolloop_kernel::mcp::McpClient;

type Client = McpClient<BufReader<ReadHalf<DuplexStream>>, WriteHalf<DuplexStream>>;
type Seen = Arc<Mutex<Vec<Value>>>;

/// Spawns a fake server. `respond` maps each incoming message to the lines sent back.
fn fake_server<F>(respond: F) -> (Client, Seen)
where
    F: Fn(&Value) -> Vec<String> + Send + 'static,
{
    let (client_io, server_io) = duplex(64 * 1024);
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);

    tokio::spawn(async move {
        let (read, mut write) = split(server_io);
        let mut lines = BufReader::new(read).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let message: Value = serde_json::from_str(&line).unwrap();
            log.lock().unwrap().push(message.clone());
            for reply in respond(&message) {
                write.write_all(reply.as_bytes()).await.unwrap();
                write.write_all(b"\n").await.unwrap();
            }
        }
    });

    let (read, write) = split(client_io);
    let client = McpClient::new(BufReader::new(read), write, Duration::from_millis(500));
    (client, seen)
}

fn reply(message: &Value, result: Value) -> String {
    json!({"jsonrpc": "2.0", "id": message["id"], "result": result}).to_string()
}

fn standard_server(message: &Value) -> Vec<String> {
    match message["method"].as_str() {
        Some("initialize") => vec![reply(
            message,
            json!({"protocolVersion": "2024-11-05", "capabilities": {"tools": {}},
                   "serverInfo": {"name": "gmail", "version": "1.0"}}),
        )],
        Some("tools/list") => vec![reply(
            message,
            json!({"tools": [{
                "name": "send_email",
                "description": "Sends an email.",
                "inputSchema": {"type": "object", "properties": {
                    "to": {"type": "string"}, "subject": {"type": "string"}, "body": {"type": "string"}
                }}
            }]}),
        )],
        Some("tools/call") => vec![reply(
            message,
            json!({"content": [{"type": "text", "text": format!(
                "Email sent successfully to {}. Message ID: 18f",
                message["params"]["arguments"]["to"].as_str().unwrap_or_default()
            )}], "isError": false}),
        )],
        _ => Vec::new(),
    }
}

fn send_email_args() -> BoundArguments {
    let catalog = ToolCatalog::from_specs(mailer_agent::tool_specs());
    let call = FunctionCall {
        name: "send_email".to_string(),
        arguments: vec!["a@b.com".into(), "Hi".into(), "Body".into()],
    };
    ArgumentBinder::bind(&call, &catalog).unwrap().1
}

#[tokio::test]
async fn test_handshake_then_list_and_call() {
    let (client, seen) = fake_server(standard_server);

    let info = client.initialize().await.unwrap();
    assert_eq!(info["serverInfo"]["name"], "gmail");

    let tools = client.list_tools().await.unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name.as_deref(), Some("send_email"));

    let result = client.call_tool("send_email", &send_email_args()).await.unwrap();
    assert!(!result.is_error);
    assert_eq!(
        result.content[0].as_text(),
        Some("Email sent successfully to a@b.com. Message ID: 18f")
    );

    let seen = seen.lock().unwrap();
    let methods: Vec<&str> = seen.iter().filter_map(|m| m["method"].as_str()).collect();
    assert_eq!(
        methods,
        vec!["initialize", "notifications/initialized", "tools/list", "tools/call"]
    );
    assert!(seen[1].get("id").is_none());
    assert_eq!(seen[0]["params"]["clientInfo"]["name"], "toolloop");
    assert_eq!(
        seen[3]["params"],
        json!({"name": "send_email", "arguments": {"to": "a@b.com", "subject": "Hi", "body": "Body"}})
    );
}

#[tokio::test]
async fn test_notifications_before_response_are_skipped() {
    let (client, _) = fake_server(|message| {
        let mut out = vec![
            json!({"jsonrpc": "2.0", "method": "notifications/message", "params": {"level": "info"}})
                .to_string(),
            String::new(),
            json!({"jsonrpc": "2.0", "id": 999, "result": {}}).to_string(),
        ];
        out.extend(standard_server(message));
        out
    });

    let tools = client.list_tools().await.unwrap();
    assert_eq!(tools.len(), 1);
}

#[tokio::test]
async fn test_error_object_is_remote_error() {
    let (client, _) = fake_server(|message| {
        vec![
            json!({"jsonrpc": "2.0", "id": message["id"],
                   "error": {"code": -32602, "message": "Unknown tool: nope"}})
            .to_string(),
        ]
    });

    let err = client
        .call_tool("nope", &BoundArguments::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TransportError::Remote { code: -32602, ref message } if message == "Unknown tool: nope"
    ));
}

#[tokio::test]
async fn test_tool_reported_error_is_not_a_transport_error() {
    let (client, _) = fake_server(|message| {
        vec![reply(
            message,
            json!({"content": [{"type": "text", "text": "An error occurred: quota"}], "isError": true}),
        )]
    });

    let result = client.call_tool("send_email", &send_email_args()).await.unwrap();
    assert!(result.is_error);
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let (client, _) = fake_server(|_| Vec::new());

    let err = client.list_tools().await.unwrap_err();
    assert!(matches!(
        err,
        TransportError::Timeout { ref method, .. } if method == "tools/list"
    ));
}

#[tokio::test]
async fn test_garbage_line_is_protocol_error() {
    let (client, _) = fake_server(|_| vec!["Traceback (most recent call last):".to_string()]);

    let err = client.list_tools().await.unwrap_err();
    assert!(matches!(err, TransportError::Protocol(_)));
}

#[tokio::test]
async fn test_server_exit_is_closed() {
    let (client_io, server_io) = duplex(1024);
    tokio::spawn(async move {
        let (read, _write) = split(server_io);
        let mut lines = BufReader::new(read).lines();
        // Read one request, then hang up without answering.
        let _ = lines.next_line().await;
    });
    let (read, write) = split(client_io);
    let client = McpClient::new(BufReader::new(read), write, Duration::from_secs(2));

    let err = client.list_tools().await.unwrap_err();
    assert!(matches!(err, TransportError::Closed));
}

#[tokio::test]
async fn test_chatty_server_still_times_out() {
    let (client_io, server_io) = duplex(64 * 1024);
    tokio::spawn(async move {
        let (read, mut write) = split(server_io);
        let mut lines = BufReader::new(read).lines();
        let _ = lines.next_line().await;
        // Keep talking well inside the request bound, but never answer.
        for _ in 0..50 {
            let note = json!({"jsonrpc": "2.0", "method": "notifications/progress"});
            if write.write_all(format!("{note}\n").as_bytes()).await.is_err() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    });
    let (read, write) = split(client_io);
    let client = McpClient::new(BufReader::new(read), write, Duration::from_millis(500));

    let started = tokio::time::Instant::now();
    let err = client.list_tools().await.unwrap_err();
    assert!(matches!(
        err,
        TransportError::Timeout { ref method, .. } if method == "tools/list"
    ));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_server_requests_are_answered() {
    let (client, seen) = fake_server(|message| match message["method"].as_str() {
        Some("tools/list") => vec![
            json!({"jsonrpc": "2.0", "id": "srv-1", "method": "ping"}).to_string(),
            json!({"jsonrpc": "2.0", "id": 77, "method": "roots/list"}).to_string(),
        ],
        // The list arrives once both server requests have been answered.
        None if message["id"] == json!(77) => vec![
            json!({"jsonrpc": "2.0", "id": 1, "result": {"tools": []}}).to_string(),
        ],
        _ => Vec::new(),
    });

    let tools = client.list_tools().await.unwrap();
    assert!(tools.is_empty());

    let seen = seen.lock().unwrap();
    assert_eq!(seen[1], json!({"jsonrpc": "2.0", "id": "srv-1", "result": {}}));
    assert_eq!(seen[2]["id"], json!(77));
    assert_eq!(seen[2]["error"]["code"], json!(-32601));
}

#[tokio::test]
async fn test_bad_tool_entry_does_not_block_discovery() {
    let (client, _) = fake_server(|message| {
        vec![reply(
            message,
            json!({"tools": [
                {"name": 7, "inputSchema": {}},
                {"name": "send_email", "description": "Sends an email.", "inputSchema": {
                    "type": "object",
                    "properties": {"to": {"type": "string"}}
                }}
            ]}),
        )]
    });

    let tools = client.list_tools().await.unwrap();
    assert_eq!(tools.len(), 2);

    let catalog = ToolCatalog::from_specs(tools);
    assert_eq!(catalog.placeholder_count(), 1);
    assert!(catalog.get("send_email").is_some());
    assert!(catalog.render().starts_with("1. Error processing tool unknown\n2. send_email"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_spawned_silent_server_times_out() {
    use toolloop_kernel::mcp::{StdioClient, StdioServer};

    // `sleep` never reads its stdin and never writes.
    let server = StdioServer::new("sleep", ["5"]);
    let result = StdioClient::spawn(&server, Duration::from_millis(300)).await;
    assert!(matches!(
        result,
        Err(TransportError::Timeout { ref method, .. }) if method == "initialize"
    ));
}
