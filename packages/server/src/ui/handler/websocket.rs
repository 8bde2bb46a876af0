//! WebSocket handler streaming live game state.
//!
//! The viewer receives the current view on connect and a fresh view after every
//! change. The stream ends when the game expires or the client goes away.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use serde::Serialize;

use crate::{
    domain::{Game, GameId},
    infrastructure::{
        dto::{
            http::GameViewDto,
            websocket::{GameExpiredMessage, GameStateMessage, MessageType},
        },
        pubsub::Subscription,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{FindGameUseCase, GameEvent, GameUseCaseError, WatchGameUseCase},
};

type WsSender = SplitSink<WebSocket, Message>;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = GameId::try_from(game_id)?;

    // Subscribe before the upgrade so an unknown game is a plain 404.
    let usecase = WatchGameUseCase::new(state.repository.clone(), state.broadcaster.clone());
    let (snapshot, subscription) = usecase.execute(&id).await?;

    tracing::info!(game_id = %id, "viewer connected");
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, id, snapshot, subscription)))
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    id: GameId,
    snapshot: Game,
    mut subscription: Subscription<GameEvent>,
) {
    let (mut sender, mut receiver) = socket.split();

    if send_state(&mut sender, &snapshot).await.is_err() {
        tracing::warn!(game_id = %id, "failed to send initial state");
        return;
    }

    // Viewers only listen; incoming frames are drained until the client closes.
    let recv_id = id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(game_id = %recv_id, "websocket error: {}", e);
                    break;
                }
            }
        }
    });

    let find = FindGameUseCase::new(state.repository.clone());
    let send_id = id.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = subscription.recv().await {
            if event == GameEvent::Expired {
                let _ = send_expired(&mut sender, &send_id).await;
                let _ = sender.send(Message::Close(None)).await;
                break;
            }

            // Notifications carry no state; re-read so the view is always current.
            let sent = match find.execute(&send_id).await {
                Ok(game) => send_state(&mut sender, &game).await,
                Err(GameUseCaseError::NotFound(_)) => {
                    let _ = send_expired(&mut sender, &send_id).await;
                    break;
                }
                Err(e) => {
                    tracing::warn!(game_id = %send_id, "failed to read game: {}", e);
                    continue;
                }
            };
            if sent.is_err() {
                break;
            }
        }
        // `subscription` is dropped here, which releases the topic entry.
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    tracing::info!(game_id = %id, "viewer disconnected");
}

async fn send_state(sender: &mut WsSender, game: &Game) -> Result<(), axum::Error> {
    send_json(
        sender,
        &GameStateMessage {
            r#type: MessageType::GameState,
            game: GameViewDto::from(game),
        },
    )
    .await
}

async fn send_expired(sender: &mut WsSender, id: &GameId) -> Result<(), axum::Error> {
    send_json(
        sender,
        &GameExpiredMessage {
            r#type: MessageType::GameExpired,
            game_id: id.as_str().to_string(),
        },
    )
    .await
}

async fn send_json<M: Serialize>(sender: &mut WsSender, message: &M) -> Result<(), axum::Error> {
    let json = serde_json::to_string(message).map_err(axum::Error::new)?;
    sender.send(Message::Text(json.into())).await
}
