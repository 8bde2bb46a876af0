//! UseCase: 対戦相手の参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinGameUseCase::execute() メソッド
//! - 参加成功時の状態遷移と購読者への通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：対戦相手待ちのゲームへの参加
//! - 異常系：既に対戦相手がいるゲームへの参加（状態は変わらず通知もされない）
//! - 異常系：存在しないゲーム

use std::sync::Arc;

use mnk_shared::time::now_millis;

use crate::domain::{Game, GameId, GameRepository, PlayerId, Timestamp};

use super::{
    error::GameUseCaseError,
    event::{GameBroadcaster, GameEvent, game_topic},
};

/// 対戦相手参加のユースケース
pub struct JoinGameUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn GameRepository>,
    /// ゲームごとの変更通知
    broadcaster: GameBroadcaster,
}

impl JoinGameUseCase {
    /// 新しい JoinGameUseCase を作成
    pub fn new(repository: Arc<dyn GameRepository>, broadcaster: GameBroadcaster) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    /// 対戦相手として参加する
    ///
    /// # Returns
    ///
    /// * `Ok(Game)` - 参加後のゲームのスナップショット
    /// * `Err(GameUseCaseError)` - ゲームが存在しない、または参加できない状態
    pub async fn execute(&self, id: &GameId, player: PlayerId) -> Result<Game, GameUseCaseError> {
        let shared = self
            .repository
            .find(id)
            .await
            .ok_or_else(|| GameUseCaseError::NotFound(id.clone()))?;

        // Publish under the game lock so notifications follow mutation order.
        let mut game = shared.lock().await;
        game.join_as_opponent(player.clone(), Timestamp::new(now_millis()))?;
        self.broadcaster
            .publish(game_topic(id), GameEvent::OpponentJoined { player });

        Ok(game.clone())
    }
}
