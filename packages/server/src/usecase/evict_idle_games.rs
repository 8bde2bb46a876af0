//! UseCase: 放置されたゲームの削除
//!
//! 最終更新から TTL 以上経過したゲームを Repository から取り除き、
//! 観戦者に `GameEvent::Expired` を通知します。

use std::{sync::Arc, time::Duration};

use mnk_shared::time::now_millis;

use crate::domain::{GameId, GameRepository, Timestamp};

use super::event::{GameBroadcaster, GameEvent, game_topic};

/// 放置ゲーム削除のユースケース
pub struct EvictIdleGamesUseCase {
    repository: Arc<dyn GameRepository>,
    broadcaster: GameBroadcaster,
}

impl EvictIdleGamesUseCase {
    /// 新しい EvictIdleGamesUseCase を作成
    pub fn new(repository: Arc<dyn GameRepository>, broadcaster: GameBroadcaster) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    /// 現在時刻を基準に削除を実行する
    pub async fn execute(&self, ttl: Duration) -> Vec<GameId> {
        self.execute_at(Timestamp::new(now_millis()), ttl).await
    }

    /// `now` を基準に削除を実行し、削除したゲームの ID を返す
    pub async fn execute_at(&self, now: Timestamp, ttl: Duration) -> Vec<GameId> {
        let evicted = self.repository.evict_idle(now, ttl).await;
        for id in &evicted {
            let delivered = self.broadcaster.publish(game_topic(id), GameEvent::Expired);
            tracing::info!(game_id = %id, watchers = delivered, "evicted idle game");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::repository::MockGameRepository,
        usecase::test_support::{create_test_repository, insert_game},
    };

    #[tokio::test]
    async fn test_evict_notifies_watchers() {
        // テスト項目: 削除されたゲームの観戦者に Expired が届き、新しいゲームは残る
        // given (前提条件):
        let repository = create_test_repository();
        let broadcaster = GameBroadcaster::new();
        let stale = insert_game(&repository, 0).await;
        let fresh = insert_game(&repository, 59_000).await;
        let mut stale_watcher = broadcaster.subscribe(game_topic(stale.id()));
        let mut fresh_watcher = broadcaster.subscribe(game_topic(fresh.id()));
        let usecase = EvictIdleGamesUseCase::new(repository.clone(), broadcaster.clone());

        // when (操作): now=60 秒, TTL=30 秒
        let evicted = usecase
            .execute_at(Timestamp::new(60_000), Duration::from_secs(30))
            .await;

        // then (期待する結果):
        assert_eq!(evicted, vec![stale.id().clone()]);
        assert_eq!(stale_watcher.try_recv(), Ok(GameEvent::Expired));
        assert!(fresh_watcher.try_recv().is_err());
        assert!(repository.find(stale.id()).await.is_none());
        assert!(repository.find(fresh.id()).await.is_some());
    }

    #[tokio::test]
    async fn test_evict_nothing_publishes_nothing() {
        // テスト項目: 削除対象がなければ何も通知しない
        // given (前提条件):
        let mut mock_repository = MockGameRepository::new();
        mock_repository
            .expect_evict_idle()
            .times(1)
            .returning(|_, _| Vec::new());
        let broadcaster = GameBroadcaster::new();
        let usecase = EvictIdleGamesUseCase::new(Arc::new(mock_repository), broadcaster);

        // when (操作):
        let evicted = usecase.execute(Duration::from_secs(1)).await;

        // then (期待する結果):
        assert!(evicted.is_empty());
    }
}
