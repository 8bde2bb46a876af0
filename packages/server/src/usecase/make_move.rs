//! UseCase: 着手処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - MakeMoveUseCase::execute() メソッド
//! - 着手の反映、手番の交代、勝敗判定、購読者への通知
//!
//! ### なぜこのテストが必要か
//! - 拒否された着手でゲームが一切変更されないことを保証
//! - 同じゲームへの並行した着手が直列化されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：着手と通知
//! - 異常系：盤面外・埋まったマス・終了済みゲーム・存在しないゲーム
//! - 並行性：同じマスへの同時着手

use std::sync::Arc;

use mnk_shared::time::now_millis;

use crate::domain::{Game, GameId, GameRepository, Position, Timestamp};

use super::{
    error::GameUseCaseError,
    event::{GameBroadcaster, GameEvent, game_topic},
};

/// 着手のユースケース
pub struct MakeMoveUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn GameRepository>,
    /// ゲームごとの変更通知
    broadcaster: GameBroadcaster,
}

impl MakeMoveUseCase {
    /// 新しい MakeMoveUseCase を作成
    pub fn new(repository: Arc<dyn GameRepository>, broadcaster: GameBroadcaster) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    /// 手番のプレイヤーのマークを `position` に置く
    ///
    /// # Returns
    ///
    /// * `Ok(Game)` - 着手後のゲームのスナップショット
    /// * `Err(GameUseCaseError)` - ゲームが存在しない、またはルール違反（ゲームは変更されない）
    pub async fn execute(&self, id: &GameId, position: Position) -> Result<Game, GameUseCaseError> {
        let shared = self
            .repository
            .find(id)
            .await
            .ok_or_else(|| GameUseCaseError::NotFound(id.clone()))?;

        // Publish under the game lock so notifications follow mutation order.
        let mut game = shared.lock().await;
        let status = game.apply_move(position, Timestamp::new(now_millis()))?;
        self.broadcaster
            .publish(game_topic(id), GameEvent::MovePlayed { position, status });

        Ok(game.clone())
    }
}
