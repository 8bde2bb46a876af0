//! Domain layer for the game server.
//!
//! This module contains the game rules and state machine, independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod repository;
pub mod rules;
pub mod value_object;

pub use entity::{Board, Cell, Game, GameSettings, MAX_BOARD_CELLS, Position, Status};
pub use error::{GameError, RepositoryError, ValueObjectError};
pub use repository::{GameRepository, SharedGame};
pub use rules::{Direction, WinRule};
pub use value_object::{GameId, PlayerId, Timestamp};
