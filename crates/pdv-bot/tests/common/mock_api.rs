//! Loopback stand-in for the Telegram Bot API

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use pdv_core::config::TelegramConfig;

pub const TOKEN: &str = "123:abc";

/// Answer once the scripted `getUpdates` responses run out
fn exhausted() -> Value {
    json!({"ok": false, "error_code": 409, "description": "Conflict: script exhausted"})
}

struct Shared {
    requests: Mutex<Vec<(String, Value)>>,
    updates: Mutex<VecDeque<Value>>,
}

/// Records every call and answers `getUpdates` from a script
pub struct MockBotApi {
    addr: SocketAddr,
    shared: Arc<Shared>,
    server: JoinHandle<()>,
}

impl MockBotApi {
    /// Serve `updates` in order as `getUpdates` responses
    pub async fn start(updates: Vec<Value>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shared = Arc::new(Shared {
            requests: Mutex::new(Vec::new()),
            updates: Mutex::new(updates.into()),
        });

        let server = {
            let shared = Arc::clone(&shared);
            tokio::spawn(async move {
                while let Ok((socket, _)) = listener.accept().await {
                    let shared = Arc::clone(&shared);
                    tokio::spawn(async move {
                        let _ = serve(socket, &shared).await;
                    });
                }
            })
        };

        Self {
            addr,
            shared,
            server,
        }
    }

    /// Bot config pointing at this server
    pub fn config(&self) -> TelegramConfig {
        TelegramConfig {
            token: TOKEN.to_string(),
            api_url: format!("http://{}", self.addr),
            poll_timeout: Duration::from_secs(1),
        }
    }

    /// Bodies of every call to `method`, in arrival order
    pub fn calls(&self, method: &str) -> Vec<Value> {
        self.shared
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, body)| body.clone())
            .collect()
    }

    /// Methods called so far, in arrival order
    pub fn methods(&self) -> Vec<String> {
        self.shared
            .requests
            .lock()
            .unwrap()
            .iter()
            .map(|(m, _)| m.clone())
            .collect()
    }
}

impl Drop for MockBotApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Handle one request, then close the connection
async fn serve(socket: TcpStream, shared: &Shared) -> std::io::Result<()> {
    let mut reader = BufReader::new(socket);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let path = request_line.split_whitespace().nth(1).unwrap_or_default();
    let method = path.rsplit('/').next().unwrap_or_default().to_string();

    let mut content_length = 0;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).await?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).await?;
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let response = match method.as_str() {
        "getUpdates" => shared
            .updates
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(exhausted),
        "sendMessage" => {
            let chat_id = body["chat_id"].clone();
            json!({"ok": true, "result": {"message_id": 77, "chat": {"id": chat_id}}})
        }
        _ => json!({"ok": true, "result": true}),
    };
    shared.requests.lock().unwrap().push((method, body));

    let payload = response.to_string();
    let head = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        payload.len()
    );
    let mut socket = reader.into_inner();
    socket.write_all(head.as_bytes()).await?;
    socket.write_all(payload.as_bytes()).await?;
    socket.shutdown().await
}

/// `getUpdates` response carrying `updates`
pub fn updates(updates: Vec<Value>) -> Value {
    json!({"ok": true, "result": updates})
}

/// `getUpdates` failure
pub fn failure(code: i64, description: &str) -> Value {
    json!({"ok": false, "error_code": code, "description": description})
}

/// A text message update
pub fn text_update(update_id: i64, from: i64, text: &str) -> Value {
    json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id,
            "chat": {"id": from},
            "from": {"id": from},
            "text": text
        }
    })
}

/// A button press update on message 10 of the sender's chat
pub fn callback_update(update_id: i64, from: i64, data: &str) -> Value {
    json!({
        "update_id": update_id,
        "callback_query": {
            "id": format!("q{}", update_id),
            "from": {"id": from},
            "message": {"message_id": 10, "chat": {"id": from}},
            "data": data
        }
    })
}
