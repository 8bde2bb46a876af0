//! InMemory Game Repository 実装
//!
//! ドメイン層が定義する GameRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ゲームごとに `Arc<Mutex<Game>>` を保持するため、異なるゲームへの操作は
//! 互いにブロックしません。マップ自体は RwLock で保護され、書き込みは
//! `insert` / `remove` / `evict_idle` のみです。
//!
//! ロック順序は常に「マップ → ゲーム」です。

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::{Game, GameId, GameRepository, RepositoryError, SharedGame, Timestamp};

/// インメモリ Game Repository 実装
///
/// プロセス内に閉じたゲームの格納庫。プロセス再起動で内容は失われます。
#[derive(Default)]
pub struct InMemoryGameRepository {
    /// GameId → ゲーム本体
    games: RwLock<HashMap<GameId, SharedGame>>,
}

impl InMemoryGameRepository {
    /// 新しい InMemoryGameRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn insert(&self, game: Game) -> Result<SharedGame, RepositoryError> {
        let mut games = self.games.write().await;
        if games.contains_key(game.id()) {
            return Err(RepositoryError::DuplicateId(game.id().to_string()));
        }
        let id = game.id().clone();
        let shared = Arc::new(Mutex::new(game));
        games.insert(id, shared.clone());
        Ok(shared)
    }

    async fn find(&self, id: &GameId) -> Option<SharedGame> {
        let games = self.games.read().await;
        games.get(id).cloned()
    }

    async fn ids(&self) -> Vec<GameId> {
        let games = self.games.read().await;
        games.keys().cloned().collect()
    }

    async fn count(&self) -> usize {
        let games = self.games.read().await;
        games.len()
    }

    async fn remove(&self, id: &GameId) -> bool {
        let mut games = self.games.write().await;
        games.remove(id).is_some()
    }

    async fn evict_idle(&self, now: Timestamp, ttl: Duration) -> Vec<GameId> {
        let ttl_millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        let mut games = self.games.write().await;

        // A game whose lock is held right now is being played, so it is not idle.
        let expired: Vec<GameId> = games
            .iter()
            .filter(|(_, game)| {
                game.try_lock()
                    .is_ok_and(|game| now.millis_since(game.updated_at()) > ttl_millis)
            })
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            games.remove(id);
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GameId, GameSettings, PlayerId, Position, Status};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryGameRepository の基本的な操作（insert / find / remove / evict_idle）
    // - 同一 ID の二重登録が拒否されること
    // - 並行した insert と move が競合しないこと
    //
    // 【なぜこのテストが必要か】
    // - Repository はゲームの検索と生成の唯一の窓口
    // - ID の一意性と、ゲームごとの排他制御を保証する必要がある
    // ========================================

    fn new_game_at(updated_at: i64) -> Game {
        Game::new(
            GameId::generate(),
            PlayerId::new("alice".to_string()).unwrap(),
            GameSettings::default(),
            Timestamp::new(updated_at),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        // テスト項目: 登録したゲームを ID で取得できる
        // given (前提条件):
        let repo = InMemoryGameRepository::new();
        let game = new_game_at(0);
        let id = game.id().clone();

        // when (操作):
        let result = repo.insert(game).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let found = repo.find(&id).await.expect("game should be stored");
        assert_eq!(found.lock().await.id(), &id);
        assert_eq!(repo.count().await, 1);
        assert_eq!(repo.ids().await, vec![id]);
    }

    #[tokio::test]
    async fn test_find_unknown_returns_none() {
        // テスト項目: 存在しない ID の検索は None を返す（エラーではない）
        // given (前提条件):
        let repo = InMemoryGameRepository::new();

        // when (操作):
        let found = repo.find(&GameId::generate()).await;

        // then (期待する結果):
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_id_fails() {
        // テスト項目: 同じ ID のゲームは二重登録できず、既存のゲームは上書きされない
        // given (前提条件):
        let repo = InMemoryGameRepository::new();
        let game = new_game_at(0);
        let id = game.id().clone();
        let mut duplicate = game.clone();
        duplicate
            .join_as_opponent(PlayerId::new("bob".to_string()).unwrap(), Timestamp::new(1))
            .unwrap();
        repo.insert(game).await.unwrap();

        // when (操作):
        let result = repo.insert(duplicate).await;

        // then (期待する結果):
        assert_eq!(
            result.err(),
            Some(RepositoryError::DuplicateId(id.to_string()))
        );
        let stored = repo.find(&id).await.unwrap();
        assert_eq!(stored.lock().await.status(), Status::AwaitingOpponent);
    }

    #[tokio::test]
    async fn test_remove() {
        // テスト項目: ゲームを削除でき、2 回目の削除は false を返す
        // given (前提条件):
        let repo = InMemoryGameRepository::new();
        let game = new_game_at(0);
        let id = game.id().clone();
        repo.insert(game).await.unwrap();

        // then (期待する結果):
        assert!(repo.remove(&id).await);
        assert!(!repo.remove(&id).await);
        assert!(repo.find(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_evict_idle_removes_only_stale_games() {
        // テスト項目: TTL を超えて更新のないゲームだけが削除される
        // given (前提条件):
        let repo = InMemoryGameRepository::new();
        let stale = new_game_at(1_000);
        let fresh = new_game_at(9_000);
        let stale_id = stale.id().clone();
        let fresh_id = fresh.id().clone();
        repo.insert(stale).await.unwrap();
        repo.insert(fresh).await.unwrap();

        // when (操作): now=10_000, TTL=5 秒
        let evicted = repo
            .evict_idle(Timestamp::new(10_000), Duration::from_secs(5))
            .await;

        // then (期待する結果):
        assert_eq!(evicted, vec![stale_id.clone()]);
        assert!(repo.find(&stale_id).await.is_none());
        assert!(repo.find(&fresh_id).await.is_some());
    }

    #[tokio::test]
    async fn test_evict_idle_skips_games_in_use() {
        // テスト項目: ロック中（操作中）のゲームは削除されない
        // given (前提条件):
        let repo = InMemoryGameRepository::new();
        let game = new_game_at(0);
        let id = game.id().clone();
        let shared = repo.insert(game).await.unwrap();
        let _guard = shared.lock().await;

        // when (操作):
        let evicted = repo
            .evict_idle(Timestamp::new(1_000_000), Duration::from_secs(1))
            .await;

        // then (期待する結果):
        assert!(evicted.is_empty());
        assert_eq!(repo.count().await, 1);
        assert_eq!(repo.ids().await, vec![id]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_and_moves() {
        // テスト項目: 並行した登録と着手でも ID の重複や履歴の欠落が起きない
        // given (前提条件):
        let repo = Arc::new(InMemoryGameRepository::new());
        let mut game = new_game_at(0);
        game.join_as_opponent(PlayerId::new("bob".to_string()).unwrap(), Timestamp::new(0))
            .unwrap();
        let shared = repo.insert(game).await.unwrap();

        // when (操作): 50 件の登録と、同じマスへの 8 つの並行着手
        let mut handles = Vec::new();
        for _ in 0..50 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert(new_game_at(0)).await.map(|_| ())
            }));
        }
        let mut move_handles = Vec::new();
        for _ in 0..8 {
            let shared = shared.clone();
            move_handles.push(tokio::spawn(async move {
                shared
                    .lock()
                    .await
                    .apply_move(Position::new(1, 1), Timestamp::new(1))
                    .is_ok()
            }));
        }

        // then (期待する結果):
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        let mut accepted = 0;
        for handle in move_handles {
            if handle.await.unwrap() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(shared.lock().await.history(), &[Position::new(1, 1)]);
        assert_eq!(repo.count().await, 51);
    }
}
