//! WebSocket message DTOs for live game updates.

use serde::{Deserialize, Serialize};

use super::http::GameViewDto;

/// Message type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    GameState,
    GameExpired,
}

/// Current game state; sent on connect and after every change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateMessage {
    pub r#type: MessageType,
    pub game: GameViewDto,
}

/// Sent right before the server closes the stream of an evicted game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameExpiredMessage {
    pub r#type: MessageType,
    pub game_id: String,
}
