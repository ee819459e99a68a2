use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use futures_util::{SinkExt, StreamExt};
use maze_chase_server::commentary::{fallback_line, CommentaryClient};
use maze_chase_server::constants::TICK_MS;
use maze_chase_server::engine::Engine;
use maze_chase_server::server_protocol::{parse_client_message, ParsedClientMessage};
use maze_chase_server::types::{EngineConfig, GameEvent};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde_json::{json, Value};
use tokio::sync::{mpsc, Mutex};
use tower_http::services::{ServeDir, ServeFile};

type SharedState = Arc<Mutex<ServerState>>;

#[derive(Clone)]
struct ClientContext {
    tx: mpsc::Sender<String>,
    name: Option<String>,
}

struct ServerState {
    clients: HashMap<String, ClientContext>,
    engine: Engine,
    commentary: Option<Arc<CommentaryClient>>,
}

impl ServerState {
    fn new(engine: Engine) -> Self {
        Self {
            clients: HashMap::new(),
            engine,
            commentary: CommentaryClient::from_env().map(Arc::new),
        }
    }
}

#[tokio::main]
async fn main() {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let engine = Engine::new(EngineConfig::default()).expect("default layout is valid");
    let state = Arc::new(Mutex::new(ServerState::new(engine)));
    {
        let guard = state.try_lock().expect("state is uncontended at startup");
        if guard.commentary.is_some() {
            println!("[server] commentary client enabled");
        } else {
            println!("[server] commentary client disabled (no COMMENTARY_API_KEY)");
        }
    }
    start_tick_loop(state.clone());

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/ws", get(ws_handler))
        .with_state(state);

    let app = if let Some(static_dir) = resolve_static_dir() {
        let index_file = static_dir.join("index.html");
        println!(
            "[server] static file root: {}",
            static_dir.to_string_lossy()
        );
        app.fallback_service(
            ServeDir::new(static_dir).not_found_service(ServeFile::new(index_file)),
        )
    } else {
        app
    };

    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("failed to bind server socket");

    println!("[server] listening on :{port}");
    axum::serve(listener, app)
        .await
        .expect("server runtime failed");
}

fn resolve_static_dir() -> Option<PathBuf> {
    if let Ok(raw) = std::env::var("STATIC_DIR") {
        let path = PathBuf::from(raw);
        if path.join("index.html").is_file() {
            return Some(path);
        }
    }
    let candidates = [PathBuf::from("dist/client"), PathBuf::from("../client/dist")];
    candidates
        .into_iter()
        .find(|path| path.join("index.html").is_file())
}

async fn healthz() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: SharedState, socket: WebSocket) {
    let client_id = make_client_id();
    let (tx, mut rx) = mpsc::channel::<String>(256);

    {
        let mut guard = state.lock().await;
        guard.clients.insert(
            client_id.clone(),
            ClientContext {
                tx: tx.clone(),
                name: None,
            },
        );
        println!("[server] client connected: {client_id}");
    }

    let (mut ws_sender, mut ws_receiver) = socket.split();
    let writer = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if ws_sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(received) = ws_receiver.next().await {
        let Ok(message) = received else {
            break;
        };
        match message {
            Message::Text(raw) => {
                handle_client_message(state.clone(), &client_id, raw.to_string()).await;
            }
            Message::Binary(raw) => {
                if let Ok(text) = String::from_utf8(raw.to_vec()) {
                    handle_client_message(state.clone(), &client_id, text).await;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    {
        let mut guard = state.lock().await;
        guard.clients.remove(&client_id);
        println!("[server] client disconnected: {client_id}");
    }
    drop(tx);
    let _ = writer.await;
}

async fn handle_client_message(state: SharedState, client_id: &str, raw: String) {
    let Some(message) = parse_client_message(&raw) else {
        let mut guard = state.lock().await;
        send_to_client(
            &mut guard,
            client_id,
            &json!({ "type": "error", "message": "invalid message" }),
        );
        return;
    };

    let mut guard = state.lock().await;
    match message {
        ParsedClientMessage::Hello { name } => {
            if let Some(client) = guard.clients.get_mut(client_id) {
                client.name = Some(name.clone());
            }
            let snapshot = guard.engine.build_snapshot(false);
            send_to_client(
                &mut guard,
                client_id,
                &json!({
                    "type": "welcome",
                    "clientId": client_id,
                    "name": name,
                    "snapshot": snapshot,
                }),
            );
        }
        ParsedClientMessage::Input { dir } => {
            guard.engine.queue_direction(dir);
        }
        ParsedClientMessage::Pause => {
            guard.engine.toggle_pause();
        }
        ParsedClientMessage::Reset => {
            guard.engine.reset();
            println!("[server] session reset by {client_id}");
        }
        ParsedClientMessage::Ping { t } => {
            send_to_client(&mut guard, client_id, &json!({ "type": "pong", "t": t }));
        }
    }
}

fn start_tick_loop(state: SharedState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(TICK_MS));
        loop {
            interval.tick().await;
            let mut guard = state.lock().await;
            guard.engine.step();
            let snapshot = guard.engine.build_snapshot(true);
            let events: Vec<GameEvent> = snapshot.events.clone();
            broadcast(
                &mut guard,
                &json!({
                    "type": "snapshot",
                    "snapshot": snapshot,
                }),
            );
            let commentary = guard.commentary.clone();
            drop(guard);

            for event in events {
                spawn_commentary(state.clone(), commentary.clone(), event);
            }
        }
    });
}

/// Commentary is resolved off the tick loop so a slow endpoint never
/// delays a tick. The canned line is used when no client is configured.
fn spawn_commentary(
    state: SharedState,
    commentary: Option<Arc<CommentaryClient>>,
    event: GameEvent,
) {
    tokio::spawn(async move {
        let text = match commentary {
            Some(client) => client.line_for(&event).await,
            None => fallback_line(event.kind).to_string(),
        };
        let mut guard = state.lock().await;
        broadcast(
            &mut guard,
            &json!({
                "type": "commentary",
                "event": event.kind,
                "text": text,
            }),
        );
    });
}

// try_send keeps the tick loop non-blocking; a client that cannot keep up
// is dropped rather than allowed to stall everyone else.
fn send_to_client(state: &mut ServerState, client_id: &str, message: &Value) {
    let send_failed = if let Some(client) = state.clients.get(client_id) {
        client.tx.try_send(message.to_string()).is_err()
    } else {
        false
    };
    if send_failed {
        state.clients.remove(client_id);
        println!("[server] dropped slow client {client_id}");
    }
}

fn broadcast(state: &mut ServerState, message: &Value) {
    let payload = message.to_string();
    let mut failed_clients = Vec::new();
    for (client_id, client) in &state.clients {
        if client.tx.try_send(payload.clone()).is_err() {
            failed_clients.push(client_id.clone());
        }
    }
    for client_id in failed_clients {
        state.clients.remove(&client_id);
        println!("[server] dropped slow client {client_id}");
    }
}

fn make_client_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("client_{suffix}")
}
