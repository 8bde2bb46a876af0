//! UseCase: ゲーム作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateGameUseCase::execute() メソッド
//! - 新しい ID の採番と Repository への登録
//!
//! ### なぜこのテストが必要か
//! - 作成されたゲームが対戦相手待ちの状態で検索可能になることを保証
//! - ID の一意性（重複時の再採番）を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ゲームの作成
//! - 異常系：ID の衝突が続く場合

use std::sync::Arc;

use mnk_shared::time::now_millis;

use crate::domain::{
    Game, GameId, GameRepository, GameSettings, PlayerId, RepositoryError, Timestamp,
};

use super::error::GameUseCaseError;

/// Attempts at drawing a fresh id before giving up
const MAX_ID_ATTEMPTS: usize = 3;

/// ゲーム作成のユースケース
pub struct CreateGameUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn GameRepository>,
}

impl CreateGameUseCase {
    /// 新しい CreateGameUseCase を作成
    pub fn new(repository: Arc<dyn GameRepository>) -> Self {
        Self { repository }
    }

    /// ゲーム作成を実行
    ///
    /// # Arguments
    ///
    /// * `player_x` - ゲームを作成したプレイヤー（X を担当）
    /// * `settings` - 盤面サイズと勝利条件
    ///
    /// # Returns
    ///
    /// * `Ok(Game)` - 登録されたゲームのスナップショット
    /// * `Err(GameUseCaseError)` - 登録失敗
    pub async fn execute(
        &self,
        player_x: PlayerId,
        settings: GameSettings,
    ) -> Result<Game, GameUseCaseError> {
        let now = Timestamp::new(now_millis());
        let mut attempt = 1;

        loop {
            let game = Game::new(GameId::generate(), player_x.clone(), settings, now);
            let snapshot = game.clone();
            match self.repository.insert(game).await {
                Ok(_) => return Ok(snapshot),
                Err(RepositoryError::DuplicateId(id)) if attempt < MAX_ID_ATTEMPTS => {
                    tracing::warn!(game_id = %id, attempt, "game id collision, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
