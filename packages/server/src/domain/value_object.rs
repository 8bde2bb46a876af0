//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of a player identity token.
pub const PLAYER_ID_MAX_LEN: usize = 100;

/// Game identifier value object.
///
/// Always a lowercase hyphenated UUID string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(String);

impl GameId {
    /// Create a GameId from an existing string (e.g. a path segment).
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::GameIdEmpty` for an empty string and
    /// `ValueObjectError::GameIdInvalidFormat` when the string is not a UUID.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::GameIdEmpty);
        }
        match uuid::Uuid::parse_str(&id) {
            Ok(uuid) => Ok(Self::from_uuid(uuid)),
            Err(_) => Err(ValueObjectError::GameIdInvalidFormat(id)),
        }
    }

    /// Create a GameId from a UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.hyphenated().to_string())
    }

    /// Fresh random id for a new game (UUID v4).
    pub fn generate() -> Self {
        Self::from_uuid(uuid::Uuid::new_v4())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for GameId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player identifier value object.
///
/// An opaque identity token handed out by the adapter layer (cookie, query, body).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new PlayerId.
    ///
    /// # Arguments
    ///
    /// * `id` - The player identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the PlayerId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::PlayerIdEmpty);
        }
        let len = id.chars().count();
        if len > PLAYER_ID_MAX_LEN {
            return Err(ValueObjectError::PlayerIdTooLong {
                max: PLAYER_ID_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp from Unix milliseconds.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Milliseconds elapsed from `earlier` to `self`, saturating at zero.
    pub fn millis_since(&self, earlier: Timestamp) -> u64 {
        u64::try_from(self.0.saturating_sub(earlier.0)).unwrap_or(0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_id_generate() {
        // テスト項目: 生成した GameId は UUID v4 形式で、再パースしても同じ値になる
        // when (操作):
        let game_id = GameId::generate();

        // then (期待する結果):
        assert_eq!(game_id.as_str().len(), 36);
        assert_eq!(
            uuid::Uuid::parse_str(game_id.as_str()).unwrap().get_version_num(),
            4
        );
        assert_eq!(GameId::new(game_id.as_str().to_string()).unwrap(), game_id);
    }

    #[test]
    fn test_game_id_generate_uniqueness() {
        // テスト項目: GameId::generate() は毎回異なる ID を生成する
        // when (操作):
        let ids: std::collections::HashSet<_> = (0..1000).map(|_| GameId::generate()).collect();

        // then (期待する結果):
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_game_id_new_success() {
        // テスト項目: UUID 形式の文字列から GameId を作成できる
        // given (前提条件):
        let id = "9f4ef5fb-d1ce-4ecd-aa7c-3c5ba02bc0a7".to_string();

        // when (操作):
        let result = GameId::new(id);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            result.unwrap().as_str(),
            "9f4ef5fb-d1ce-4ecd-aa7c-3c5ba02bc0a7"
        );
    }

    #[test]
    fn test_game_id_new_empty_fails() {
        // テスト項目: 空の GameId は作成できない
        // when (操作):
        let result = GameId::new(String::new());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::GameIdEmpty);
    }

    #[test]
    fn test_game_id_new_invalid_format_fails() {
        // テスト項目: UUID 形式でない GameId は作成できない
        // when (操作):
        let result = GameId::new("default".to_string());

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::GameIdInvalidFormat("default".to_string())
        );
    }

    #[test]
    fn test_game_id_normalizes_to_lowercase_hyphenated() {
        // テスト項目: 大文字の UUID も同じ GameId に正規化される
        // given (前提条件):
        let upper = "9F4EF5FB-D1CE-4ECD-AA7C-3C5BA02BC0A7".to_string();
        let lower = "9f4ef5fb-d1ce-4ecd-aa7c-3c5ba02bc0a7".to_string();

        // then (期待する結果):
        assert_eq!(GameId::new(upper).unwrap(), GameId::new(lower).unwrap());
    }

    #[test]
    fn test_player_id_new_success() {
        // テスト項目: 有効なプレイヤー ID を作成できる
        // when (操作):
        let result = PlayerId::try_from("alice".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_player_id_new_empty_fails() {
        // テスト項目: 空のプレイヤー ID は作成できない
        // when (操作):
        let result = PlayerId::new(String::new());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::PlayerIdEmpty);
    }

    #[test]
    fn test_player_id_new_too_long_fails() {
        // テスト項目: 101 文字以上のプレイヤー ID は作成できない
        // when (操作):
        let result = PlayerId::new("a".repeat(101));

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::PlayerIdTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_timestamp_millis_since() {
        // テスト項目: 経過ミリ秒を計算でき、過去方向は 0 に丸められる
        // given (前提条件):
        let earlier = Timestamp::new(1_000);
        let later = Timestamp::new(4_500);

        // then (期待する結果):
        assert_eq!(later.millis_since(earlier), 3_500);
        assert_eq!(earlier.millis_since(later), 0);
        assert!(earlier < later);
    }
}
