//! UseCase: ゲーム検索処理

use std::sync::Arc;

use crate::domain::{Game, GameId, GameRepository};

use super::error::GameUseCaseError;

/// ゲーム検索のユースケース
pub struct FindGameUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn GameRepository>,
}

impl FindGameUseCase {
    /// 新しい FindGameUseCase を作成
    pub fn new(repository: Arc<dyn GameRepository>) -> Self {
        Self { repository }
    }

    /// ID でゲームを検索し、現在の状態のスナップショットを返す
    ///
    /// # Errors
    ///
    /// 存在しない ID の場合は `GameUseCaseError::NotFound`
    pub async fn execute(&self, id: &GameId) -> Result<Game, GameUseCaseError> {
        let game = self
            .repository
            .find(id)
            .await
            .ok_or_else(|| GameUseCaseError::NotFound(id.clone()))?;
        let snapshot = game.lock().await.clone();
        Ok(snapshot)
    }

    /// 全ゲームのスナップショットを作成日時順に返す
    pub async fn list(&self) -> Vec<Game> {
        let mut games = Vec::new();
        for id in self.repository.ids().await {
            // Evicted between `ids` and `find`; skip it.
            if let Some(game) = self.repository.find(&id).await {
                games.push(game.lock().await.clone());
            }
        }
        games.sort_by_key(|game| (game.created_at(), game.id().as_str().to_string()));
        games
    }
}
