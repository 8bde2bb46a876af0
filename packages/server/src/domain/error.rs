//! Domain layer error definitions.

use thiserror::Error;

use super::entity::{Position, Status};

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// GameId validation error
    #[error("GameId cannot be empty")]
    GameIdEmpty,

    /// GameId invalid format error (not a valid UUID format)
    #[error("GameId must be a valid UUID format (got: {0})")]
    GameIdInvalidFormat(String),

    /// PlayerId validation error
    #[error("PlayerId cannot be empty")]
    PlayerIdEmpty,

    /// PlayerId too long error
    #[error("PlayerId cannot exceed {max} characters (got {actual})")]
    PlayerIdTooLong { max: usize, actual: usize },
}

/// Errors related to Game rules.
///
/// Every variant is returned before any mutation happens, so a rejected
/// operation leaves the game unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Board dimensions must both be at least 1 and stay within the cell limit
    #[error(
        "Invalid board dimensions: {width}x{height} (both must be at least 1, at most {} cells)",
        super::entity::MAX_BOARD_CELLS
    )]
    InvalidDimensions { width: usize, height: usize },

    /// Required run length must be at least 1
    #[error("Invalid win run: {0} (must be at least 1)")]
    InvalidWinRun(usize),

    /// The operation is not allowed in the current status
    #[error("Operation not allowed in status: {}", .0.label())]
    InvalidState(Status),

    /// The position lies outside the board
    #[error("Position ({}, {}) is out of bounds for a {width}x{height} board", .position.x, .position.y)]
    OutOfBounds {
        position: Position,
        width: usize,
        height: usize,
    },

    /// The target cell already holds a mark
    #[error("Cell ({}, {}) is already occupied", .0.x, .0.y)]
    CellOccupied(Position),

    /// The game has reached a terminal status
    #[error("Game has already ended with status: {}", .0.label())]
    GameEnded(Status),
}

/// Errors surfaced by `GameRepository` implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A game with the same id is already stored
    #[error("Game already exists: {0}")]
    DuplicateId(String),
}
