//! UseCase 層
//!
//! アプリケーションの操作を実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作し、変更を購読者へ通知します。

pub mod create_game;
pub mod error;
pub mod event;
pub mod evict_idle_games;
pub mod find_game;
pub mod join_game;
pub mod make_move;
pub mod watch_game;

pub use create_game::CreateGameUseCase;
pub use error::GameUseCaseError;
pub use event::{GameBroadcaster, GameEvent, game_topic};
pub use evict_idle_games::EvictIdleGamesUseCase;
pub use find_game::FindGameUseCase;
pub use join_game::JoinGameUseCase;
pub use make_move::MakeMoveUseCase;
pub use watch_game::WatchGameUseCase;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::{
        domain::{Game, GameId, GameRepository, GameSettings, PlayerId, Timestamp},
        infrastructure::repository::InMemoryGameRepository,
    };

    pub fn create_test_repository() -> Arc<InMemoryGameRepository> {
        Arc::new(InMemoryGameRepository::new())
    }

    pub fn player(name: &str) -> PlayerId {
        PlayerId::new(name.to_string()).unwrap()
    }

    /// Store a default 3x3 game created by alice at `updated_at`.
    pub async fn insert_game(repository: &InMemoryGameRepository, updated_at: i64) -> Game {
        let game = Game::new(
            GameId::generate(),
            player("alice"),
            GameSettings::default(),
            Timestamp::new(updated_at),
        );
        repository.insert(game.clone()).await.unwrap();
        game
    }
}
