//! Repository port for games.
//!
//! The domain layer defines the trait; `infrastructure::repository` provides
//! the implementation (dependency inversion).

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Game, GameId, RepositoryError, Timestamp};

/// A stored game. The mutex serializes joins and moves on that game.
pub type SharedGame = Arc<Mutex<Game>>;

/// Keyed store of live games.
///
/// The store never changes game contents itself; callers lock the returned
/// `SharedGame` and go through `Game`'s own operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Store a new game under its id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DuplicateId` if the id is already taken.
    async fn insert(&self, game: Game) -> Result<SharedGame, RepositoryError>;

    /// Look up a game; `None` when the id is unknown.
    async fn find(&self, id: &GameId) -> Option<SharedGame>;

    /// Ids of every stored game.
    async fn ids(&self) -> Vec<GameId>;

    /// Number of stored games.
    async fn count(&self) -> usize;

    /// Drop a game; returns whether it existed.
    async fn remove(&self, id: &GameId) -> bool;

    /// Drop every game untouched for longer than `ttl` as of `now`, returning their ids.
    async fn evict_idle(&self, now: Timestamp, ttl: Duration) -> Vec<GameId>;
}
