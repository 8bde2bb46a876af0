//! Change notifications published per game.

use crate::{
    domain::{GameId, PlayerId, Position, Status},
    infrastructure::pubsub::Broadcaster,
};

/// Something happened to a game. Viewers re-read the game when they receive one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The second player joined and X is to move
    OpponentJoined { player: PlayerId },
    /// A move was accepted; `status` is the status after it
    MovePlayed { position: Position, status: Status },
    /// The game was evicted and no longer exists
    Expired,
}

/// Broadcaster carrying game events, one topic per game
pub type GameBroadcaster = Broadcaster<GameEvent>;

/// Topic name for a game's events
pub fn game_topic(id: &GameId) -> &str {
    id.as_str()
}
