//! HTTP API request/response DTOs for the game server.

use mnk_shared::time::millis_to_rfc3339;
use serde::{Deserialize, Serialize};

use crate::domain::{Direction, Game, WinRule};

/// Body of `POST /api/games`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameRequestDto {
    pub player_id: String,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub win_run: Option<usize>,
    /// Count diagonal runs as wins
    #[serde(default)]
    pub diagonals: bool,
}

/// Body of `POST /api/games/{game_id}/accept`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGameRequestDto {
    pub player_id: String,
}

/// Body of `POST /api/games/{game_id}/turn`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequestDto {
    pub x: i64,
    pub y: i64,
}

/// Read model of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameViewDto {
    pub id: String,
    pub width: usize,
    pub height: usize,
    pub win_run: usize,
    pub diagonals: bool,
    /// Human-readable status label, e.g. "Turn X"
    pub status: String,
    pub finished: bool,
    /// Rows top to bottom, each cell `" "`, `"X"` or `"O"`
    pub cells: Vec<Vec<String>>,
    pub player_x: String,
    pub player_o: Option<String>,
    pub moves: usize,
    pub winning_line: Option<Direction>,
    pub created_at: String, // ISO 8601
    pub updated_at: String, // ISO 8601
}

impl From<&Game> for GameViewDto {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id().as_str().to_string(),
            width: game.width(),
            height: game.height(),
            win_run: game.win_run(),
            diagonals: game.win_rule() == WinRule::WithDiagonals,
            status: game.status().label().to_string(),
            finished: game.status().is_terminal(),
            cells: game
                .board()
                .rows()
                .map(|row| row.iter().map(|cell| cell.symbol().to_string()).collect())
                .collect(),
            player_x: game.player_x().as_str().to_string(),
            player_o: game.player_o().map(|p| p.as_str().to_string()),
            moves: game.history().len(),
            winning_line: game.winning_line(),
            created_at: millis_to_rfc3339(game.created_at().value()),
            updated_at: millis_to_rfc3339(game.updated_at().value()),
        }
    }
}

/// Game summary for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummaryDto {
    pub id: String,
    pub status: String,
    pub created_at: String, // ISO 8601
}

impl From<&Game> for GameSummaryDto {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id().as_str().to_string(),
            status: game.status().label().to_string(),
            created_at: millis_to_rfc3339(game.created_at().value()),
        }
    }
}

/// JSON error body shared by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GameId, GameSettings, PlayerId, Position, Timestamp};

    #[test]
    fn test_game_view_from_game() {
        // テスト項目: Game から表示用の DTO を組み立てられる
        // given (前提条件):
        let mut game = Game::new(
            GameId::generate(),
            PlayerId::new("alice".to_string()).unwrap(),
            GameSettings::new(3, 2, 2, WinRule::WithDiagonals).unwrap(),
            Timestamp::new(0),
        );
        game.join_as_opponent(PlayerId::new("bob".to_string()).unwrap(), Timestamp::new(1))
            .unwrap();
        game.apply_move(Position::new(2, 1), Timestamp::new(2))
            .unwrap();

        // when (操作):
        let view = GameViewDto::from(&game);

        // then (期待する結果):
        assert_eq!(view.id, game.id().as_str());
        assert_eq!(view.status, "Turn O");
        assert!(!view.finished);
        assert!(view.diagonals);
        assert_eq!(
            view.cells,
            vec![vec![" ", " ", " "], vec![" ", " ", "X"]]
        );
        assert_eq!(view.player_o.as_deref(), Some("bob"));
        assert_eq!(view.moves, 1);
        assert_eq!(view.winning_line, None);
        assert_eq!(view.created_at, "1970-01-01T00:00:00.000Z");
        assert_eq!(view.updated_at, "1970-01-01T00:00:00.002Z");
    }

    #[test]
    fn test_create_game_request_defaults() {
        // テスト項目: 省略可能な項目を省いたリクエストをデシリアライズできる
        // when (操作):
        let dto: CreateGameRequestDto =
            serde_json::from_str(r#"{"player_id":"alice"}"#).unwrap();

        // then (期待する結果):
        assert_eq!(dto.player_id, "alice");
        assert_eq!(dto.width, None);
        assert_eq!(dto.win_run, None);
        assert!(!dto.diagonals);
    }
}
