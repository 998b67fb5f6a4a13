//! Integration Test: Chat Room Broadcast
//!
//! Spins up the real server on a random port, connects several
//! WebSocket clients, and checks that every message reaches every
//! member exactly once, that a vanished member does not take the room
//! down, and that each member sees messages in send order.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use quill_server::auth::TokenService;
use quill_server::chat::ChatRelay;
use quill_server::config::{AppState, ServerConfig};
use quill_server::store::Database;
use tempfile::TempDir;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Bind the full router on an ephemeral port and serve it in the
/// background. The TempDir keeps the database alive for the test.
async fn spawn_server() -> Result<(SocketAddr, TempDir)> {
    let dir = tempfile::tempdir()?;
    let config = ServerConfig::with_base_dir(dir.path());
    config.ensure_dirs().await?;
    let db = Database::connect(&config.database_path()).await?;

    let state = AppState {
        users: db.users(),
        posts: db.posts(),
        tokens: TokenService::new(config.token_secret.as_bytes(), config.token_ttl_minutes),
        relay: Arc::new(ChatRelay::new()),
        config,
    };
    let router = quill_server::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok((addr, dir))
}

async fn connect(addr: SocketAddr) -> Result<WsClient> {
    let (ws, _) = connect_async(format!("ws://{}/chat", addr))
        .await
        .context("websocket handshake failed")?;
    Ok(ws)
}

async fn recv_text(ws: &mut WsClient) -> Result<String> {
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .context("timed out waiting for a chat message")?
        .context("connection closed")??;
    Ok(msg.into_text()?.to_string())
}

#[tokio::test]
async fn test_broadcast_reaches_every_member_including_sender() -> Result<()> {
    let (addr, _dir) = spawn_server().await?;

    let mut a = connect(addr).await?;
    let mut b = connect(addr).await?;
    let mut c = connect(addr).await?;
    // Give the server a beat to register all three connections.
    tokio::time::sleep(Duration::from_millis(200)).await;

    a.send(Message::text("hello everyone")).await?;

    assert_eq!(recv_text(&mut a).await?, "hello everyone");
    assert_eq!(recv_text(&mut b).await?, "hello everyone");
    assert_eq!(recv_text(&mut c).await?, "hello everyone");
    Ok(())
}

#[tokio::test]
async fn test_room_survives_a_member_dropping() -> Result<()> {
    let (addr, _dir) = spawn_server().await?;

    let mut a = connect(addr).await?;
    let b = connect(addr).await?;
    let mut c = connect(addr).await?;
    tokio::time::sleep(Duration::from_millis(200)).await;

    // B vanishes without a close frame.
    drop(b);
    tokio::time::sleep(Duration::from_millis(200)).await;

    a.send(Message::text("still here")).await?;

    assert_eq!(recv_text(&mut a).await?, "still here");
    assert_eq!(recv_text(&mut c).await?, "still here");

    // The room keeps working for later messages too.
    c.send(Message::text("confirmed")).await?;
    assert_eq!(recv_text(&mut a).await?, "confirmed");
    assert_eq!(recv_text(&mut c).await?, "confirmed");
    Ok(())
}

#[tokio::test]
async fn test_each_member_sees_messages_in_send_order() -> Result<()> {
    let (addr, _dir) = spawn_server().await?;

    let mut a = connect(addr).await?;
    let mut b = connect(addr).await?;
    tokio::time::sleep(Duration::from_millis(200)).await;

    a.send(Message::text("one")).await?;
    a.send(Message::text("two")).await?;
    a.send(Message::text("три 👋")).await?;

    for expected in ["one", "two", "три 👋"] {
        assert_eq!(recv_text(&mut b).await?, expected);
    }
    for expected in ["one", "two", "три 👋"] {
        assert_eq!(recv_text(&mut a).await?, expected);
    }
    Ok(())
}
