//! UseCase: ゲームの観戦（変更通知の購読）
//!
//! 購読を先に登録してからスナップショットを取るため、スナップショット以降の
//! 変更は必ず通知として届きます（重複して届くことはあっても、欠落はしません）。

use std::sync::Arc;

use crate::{
    domain::{Game, GameId, GameRepository},
    infrastructure::pubsub::Subscription,
};

use super::{
    error::GameUseCaseError,
    event::{GameBroadcaster, GameEvent, game_topic},
};

/// ゲーム観戦のユースケース
pub struct WatchGameUseCase {
    repository: Arc<dyn GameRepository>,
    broadcaster: GameBroadcaster,
}

impl WatchGameUseCase {
    /// 新しい WatchGameUseCase を作成
    pub fn new(repository: Arc<dyn GameRepository>, broadcaster: GameBroadcaster) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    /// 現在のスナップショットと、以降の変更通知を受け取る購読を返す
    ///
    /// 購読は `Subscription` を drop すると解除されます。
    pub async fn execute(
        &self,
        id: &GameId,
    ) -> Result<(Game, Subscription<GameEvent>), GameUseCaseError> {
        let shared = self
            .repository
            .find(id)
            .await
            .ok_or_else(|| GameUseCaseError::NotFound(id.clone()))?;

        let subscription = self.broadcaster.subscribe(game_topic(id));
        let snapshot = shared.lock().await.clone();

        tracing::debug!(game_id = %id, "watcher subscribed");
        Ok((snapshot, subscription))
    }
}
