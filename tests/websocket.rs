//! End-to-end tests against a live server on an ephemeral port

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use snake_arcade::config::ServerConfig;
use snake_arcade::high_score::MemoryStore;
use snake_arcade::{server, AppState};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server(store: Arc<MemoryStore>) -> SocketAddr {
    let state = Arc::new(AppState::new(ServerConfig::default(), store).await);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, server::app(state)).await.unwrap();
    });

    addr
}

async fn connect(addr: SocketAddr) -> Client {
    let (ws, _) = connect_async(format!("ws://{}/ws/snake", addr)).await.unwrap();
    ws
}

/// Next JSON message from the server, skipping control frames
async fn next_json(ws: &mut Client) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for server")
            .expect("stream closed")
            .expect("websocket error");

        if let Message::Text(_) = frame {
            return serde_json::from_str(frame.to_text().unwrap()).unwrap();
        }
    }
}

async fn send(ws: &mut Client, text: &str) {
    ws.send(Message::Text(text.into())).await.unwrap();
}

async fn http_get(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n", path, addr);
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_hello_carries_stored_high_score() {
    let addr = spawn_server(Arc::new(MemoryStore::with_value(30))).await;
    let mut ws = connect(addr).await;

    let hello = next_json(&mut ws).await;
    assert_eq!(hello["type"], "hello");
    assert_eq!(hello["high_score"], 30);
    assert_eq!(hello["grid"]["cols"], 20);
    assert_eq!(hello["grid"]["block"], 25);

    let initial = next_json(&mut ws).await;
    assert_eq!(initial["type"], "update");
    assert_eq!(initial["phase"], "not_started");
    assert_eq!(initial["snake"][0]["x"], 125);
    assert_eq!(initial["snake"][0]["y"], 125);
}

#[tokio::test]
async fn test_start_and_move_right() {
    let addr = spawn_server(Arc::new(MemoryStore::new())).await;
    let mut ws = connect(addr).await;
    next_json(&mut ws).await;
    next_json(&mut ws).await;

    // Ignored before start
    send(&mut ws, "ArrowRight").await;
    send(&mut ws, "start").await;

    let started = next_json(&mut ws).await;
    assert_eq!(started["phase"], "running");
    assert_eq!(started["heading"], "none");
    assert!(started["food"].is_object());
    assert_ne!(started["food"], serde_json::json!({ "x": 125, "y": 125 }));

    send(&mut ws, "ArrowRight").await;

    // Skip idle ticks until the snake has moved
    let moved = loop {
        let update = next_json(&mut ws).await;
        if update["snake"][0]["x"] != 125 {
            break update;
        }
    };
    assert_eq!(moved["snake"][0]["x"], 150);
    assert_eq!(moved["snake"][0]["y"], 125);
    assert_eq!(moved["phase"], "running");
}

#[tokio::test]
async fn test_running_into_wall_reports_over() {
    let addr = spawn_server(Arc::new(MemoryStore::new())).await;
    let mut ws = connect(addr).await;
    next_json(&mut ws).await;
    next_json(&mut ws).await;

    send(&mut ws, "start").await;
    next_json(&mut ws).await;
    send(&mut ws, "up").await;

    // Five steps reach row 0, the sixth leaves the board
    let over = loop {
        let msg = next_json(&mut ws).await;
        if msg["type"] == "over" {
            break msg;
        }
    };
    assert_eq!(over["cause"], "wall");

    send(&mut ws, "reset").await;
    let reset = next_json(&mut ws).await;
    assert_eq!(reset["phase"], "not_started");
    assert_eq!(reset["score"], 0);
}

#[tokio::test]
async fn test_health_and_index() {
    let addr = spawn_server(Arc::new(MemoryStore::new())).await;

    let health = http_get(addr, "/health").await;
    assert!(health.starts_with("HTTP/1.1 200"));
    assert!(health.ends_with("OK"));

    let index = http_get(addr, "/").await;
    assert!(index.starts_with("HTTP/1.1 200"));
    assert!(index.contains("<canvas id=\"board\">"));

    let missing = http_get(addr, "/nope.txt").await;
    assert!(missing.starts_with("HTTP/1.1 404"));
}
