//! Server startup: router, listener and the idle-game sweeper.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{config::ServerConfig, usecase::EvictIdleGamesUseCase};

use super::{
    handler::{
        accept_game, create_game, get_game, health_check, list_games, play_turn,
        websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Router over `state` with request tracing
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/games", get(list_games).post(create_game))
        .route("/api/games/{game_id}", get(get_game))
        .route("/api/games/{game_id}/accept", post(accept_game))
        .route("/api/games/{game_id}/turn", post(play_turn))
        .route("/api/games/{game_id}/ws", get(websocket_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind `config.bind_addr()` and serve until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    serve(listener, config).await
}

/// Serve on an already bound listener until a shutdown signal arrives.
pub async fn serve(listener: TcpListener, config: ServerConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(&config));
    serve_with_state(listener, state, config).await
}

/// Like `serve`, over state the caller keeps a handle to.
pub async fn serve_with_state(
    listener: TcpListener,
    state: Arc<AppState>,
    config: ServerConfig,
) -> std::io::Result<()> {
    let sweeper = config
        .game_ttl
        .map(|ttl| tokio::spawn(sweep_idle_games(state.clone(), ttl, config.sweep_interval)));

    let app = build_router(state);

    tracing::info!("listening on {}", listener.local_addr()?);
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }
    tracing::info!("server stopped");
    result
}

async fn sweep_idle_games(state: Arc<AppState>, ttl: Duration, every: Duration) {
    let usecase = EvictIdleGamesUseCase::new(state.repository.clone(), state.broadcaster.clone());
    let mut interval = tokio::time::interval(every.max(Duration::from_millis(1)));
    // The first tick completes immediately.
    interval.tick().await;
    loop {
        interval.tick().await;
        let evicted = usecase.execute(ttl).await;
        if !evicted.is_empty() {
            tracing::info!("evicted {} idle game(s)", evicted.len());
        }
    }
}
