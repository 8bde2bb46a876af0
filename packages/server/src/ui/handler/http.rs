//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{GameId, GameSettings, PlayerId, Position, WinRule},
    infrastructure::dto::http::{
        CreateGameRequestDto, GameSummaryDto, GameViewDto, JoinGameRequestDto, MoveRequestDto,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{CreateGameUseCase, FindGameUseCase, JoinGameUseCase, MakeMoveUseCase},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create a game; the caller plays X
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateGameRequestDto>,
) -> Result<(StatusCode, Json<GameViewDto>), ApiError> {
    let player = PlayerId::try_from(body.player_id)?;
    let defaults = state.default_settings;
    let win_rule = if body.diagonals {
        WinRule::WithDiagonals
    } else {
        defaults.win_rule()
    };
    let settings = GameSettings::new(
        body.width.unwrap_or(defaults.width()),
        body.height.unwrap_or(defaults.height()),
        body.win_run.unwrap_or(defaults.win_run()),
        win_rule,
    )?;

    let usecase = CreateGameUseCase::new(state.repository.clone());
    let game = usecase.execute(player, settings).await?;

    tracing::info!(
        game_id = %game.id(),
        width = game.width(),
        height = game.height(),
        win_run = game.win_run(),
        "game created"
    );
    Ok((StatusCode::CREATED, Json(GameViewDto::from(&game))))
}

/// List every stored game, oldest first
pub async fn list_games(State(state): State<Arc<AppState>>) -> Json<Vec<GameSummaryDto>> {
    let usecase = FindGameUseCase::new(state.repository.clone());
    let games = usecase.list().await;
    Json(games.iter().map(GameSummaryDto::from).collect())
}

/// Get a game by ID
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<GameViewDto>, ApiError> {
    let id = GameId::try_from(game_id)?;
    let usecase = FindGameUseCase::new(state.repository.clone());
    let game = usecase.execute(&id).await?;
    Ok(Json(GameViewDto::from(&game)))
}

/// Join a game as the O player
pub async fn accept_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    Json(body): Json<JoinGameRequestDto>,
) -> Result<Json<GameViewDto>, ApiError> {
    let id = GameId::try_from(game_id)?;
    let player = PlayerId::try_from(body.player_id)?;
    let usecase = JoinGameUseCase::new(state.repository.clone(), state.broadcaster.clone());
    let game = usecase.execute(&id, player).await?;

    tracing::info!(game_id = %id, "opponent joined");
    Ok(Json(GameViewDto::from(&game)))
}

/// Place the mark of the player to move
pub async fn play_turn(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    Json(body): Json<MoveRequestDto>,
) -> Result<Json<GameViewDto>, ApiError> {
    let id = GameId::try_from(game_id)?;
    let usecase = MakeMoveUseCase::new(state.repository.clone(), state.broadcaster.clone());
    let game = usecase.execute(&id, Position::new(body.x, body.y)).await?;

    tracing::debug!(game_id = %id, x = body.x, y = body.y, status = %game.status(), "move played");
    Ok(Json(GameViewDto::from(&game)))
}
