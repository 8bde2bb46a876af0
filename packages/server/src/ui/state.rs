//! Shared application state.

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    domain::{GameRepository, GameSettings},
    infrastructure::{pubsub::Broadcaster, repository::InMemoryGameRepository},
    usecase::GameBroadcaster,
};

/// State shared by every handler
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn GameRepository>,
    /// ゲームごとの変更通知（トピック = ゲーム ID）
    pub broadcaster: GameBroadcaster,
    /// Settings used for fields a create request leaves out
    pub default_settings: GameSettings,
}

impl AppState {
    /// Fresh in-memory state for `config`
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            repository: Arc::new(InMemoryGameRepository::new()),
            broadcaster: Broadcaster::with_capacity(config.subscriber_capacity),
            default_settings: config.default_settings,
        }
    }
}
