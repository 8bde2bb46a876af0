//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{GameError, GameId, RepositoryError, ValueObjectError};

/// Errors returned by game use cases
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameUseCaseError {
    /// No game is stored under the id
    #[error("Game not found: {0}")]
    NotFound(GameId),

    /// A game rule rejected the operation
    #[error(transparent)]
    Rule(#[from] GameError),

    /// The store rejected the operation
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// An identifier could not be built
    #[error(transparent)]
    ValueObject(#[from] ValueObjectError),
}
