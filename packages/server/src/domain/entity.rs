//! Core domain models for the m,n,k game.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    error::GameError,
    rules::{self, Direction, WinRule},
    value_object::{GameId, PlayerId, Timestamp},
};

/// Default board width
pub const DEFAULT_WIDTH: usize = 3;

/// Default board height
pub const DEFAULT_HEIGHT: usize = 3;

/// Default run length required to win
pub const DEFAULT_WIN_RUN: usize = 3;

/// Largest board accepted, counted in cells (`width * height`)
pub const MAX_BOARD_CELLS: usize = 1 << 20;

/// Contents of a single board cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// Single-character symbol (`" "`, `"X"`, `"O"`)
    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => " ",
            Cell::X => "X",
            Cell::O => "O",
        }
    }
}

/// Game phase.
///
/// `AwaitingOpponent` → `TurnX` on join; `TurnX` ⇄ `TurnO` on moves; a move can end the game in
/// `WinX`, `WinO` or `Draw`, which are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    AwaitingOpponent,
    TurnX,
    TurnO,
    WinX,
    WinO,
    Draw,
}

impl Status {
    /// Human-readable label used by the read model
    pub fn label(self) -> &'static str {
        match self {
            Status::AwaitingOpponent => "Need opponent",
            Status::TurnX => "Turn X",
            Status::TurnO => "Turn O",
            Status::WinX => "Win X",
            Status::WinO => "Win O",
            Status::Draw => "Draw",
        }
    }

    /// True for win and draw statuses
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::WinX | Status::WinO | Status::Draw)
    }

    /// Mark placed by the player whose turn it is, if any
    pub fn mark_to_play(self) -> Option<Cell> {
        match self {
            Status::TurnX => Some(Cell::X),
            Status::TurnO => Some(Cell::O),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Board coordinate: `x` is the column, `y` the row, both 0-indexed.
///
/// Signed so that negative input reaches the bounds check instead of failing earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Position shifted by `(dx, dy)`
    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Fixed-size grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// All-empty board. Callers validate dimensions (see `GameSettings`).
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// True if `pos` lies on the board
    pub fn contains(&self, pos: Position) -> bool {
        self.index_of(pos).is_some()
    }

    /// Cell at `pos`, or `None` when out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index_of(pos).map(|i| self.cells[i])
    }

    /// Write a cell; out-of-bounds writes are ignored.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.index_of(pos) {
            self.cells[i] = cell;
        }
    }

    /// Rows from top (`y = 0`) to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// True when no Empty cell remains
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }
}

/// Validated creation parameters for a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    width: usize,
    height: usize,
    win_run: usize,
    win_rule: WinRule,
}

impl GameSettings {
    /// # Errors
    ///
    /// Returns `GameError::InvalidDimensions` if either dimension is 0 or the
    /// board would exceed `MAX_BOARD_CELLS`, and `GameError::InvalidWinRun` if
    /// `win_run` is 0.
    pub fn new(
        width: usize,
        height: usize,
        win_run: usize,
        win_rule: WinRule,
    ) -> Result<Self, GameError> {
        let cells = width.checked_mul(height);
        if width == 0 || height == 0 || cells.is_none_or(|cells| cells > MAX_BOARD_CELLS) {
            return Err(GameError::InvalidDimensions { width, height });
        }
        if win_run == 0 {
            return Err(GameError::InvalidWinRun(win_run));
        }
        Ok(Self {
            width,
            height,
            win_run,
            win_rule,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn win_run(&self) -> usize {
        self.win_run
    }

    pub fn win_rule(&self) -> WinRule {
        self.win_rule
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            win_run: DEFAULT_WIN_RUN,
            win_rule: WinRule::default(),
        }
    }
}

/// A single game between two players: the aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: GameId,
    player_x: PlayerId,
    player_o: Option<PlayerId>,
    board: Board,
    win_run: usize,
    win_rule: WinRule,
    status: Status,
    history: Vec<Position>,
    winning_line: Option<Direction>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Game {
    /// Create a new game awaiting an opponent
    pub fn new(id: GameId, player_x: PlayerId, settings: GameSettings, now: Timestamp) -> Self {
        Self {
            id,
            player_x,
            player_o: None,
            board: Board::new(settings.width, settings.height),
            win_run: settings.win_run,
            win_rule: settings.win_rule,
            status: Status::AwaitingOpponent,
            history: Vec::new(),
            winning_line: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Pair the game with its second player and hand the first turn to X.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidState` unless the game is awaiting an opponent.
    pub fn join_as_opponent(&mut self, player: PlayerId, now: Timestamp) -> Result<(), GameError> {
        if self.status != Status::AwaitingOpponent {
            return Err(GameError::InvalidState(self.status));
        }
        self.player_o = Some(player);
        self.status = Status::TurnX;
        self.updated_at = now;
        Ok(())
    }

    /// Place the current player's mark at `position` and advance the status.
    ///
    /// Validation happens before any write; on error the game is untouched.
    ///
    /// # Errors
    ///
    /// * `GameError::GameEnded` - the status is terminal
    /// * `GameError::InvalidState` - no opponent has joined yet
    /// * `GameError::OutOfBounds` - `position` is off the board
    /// * `GameError::CellOccupied` - the target cell already holds a mark
    ///
    /// The status checks take precedence over the position checks, so a
    /// finished game reports `GameEnded` for every move, even an invalid one.
    pub fn apply_move(&mut self, position: Position, now: Timestamp) -> Result<Status, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameEnded(self.status));
        }
        let Some(mark) = self.status.mark_to_play() else {
            return Err(GameError::InvalidState(self.status));
        };
        match self.board.get(position) {
            None => {
                return Err(GameError::OutOfBounds {
                    position,
                    width: self.board.width(),
                    height: self.board.height(),
                });
            }
            Some(Cell::Empty) => {}
            Some(_) => return Err(GameError::CellOccupied(position)),
        }

        self.board.set(position, mark);
        self.history.push(position);
        self.updated_at = now;

        if let Some(direction) =
            rules::find_winning_line(&self.board, position, mark, self.win_run, self.win_rule)
        {
            self.winning_line = Some(direction);
            self.status = match mark {
                Cell::X => Status::WinX,
                _ => Status::WinO,
            };
        } else if self.history.len() == self.board.width() * self.board.height() {
            self.status = Status::Draw;
        } else {
            self.status = match mark {
                Cell::X => Status::TurnO,
                _ => Status::TurnX,
            };
        }

        Ok(self.status)
    }

    pub fn id(&self) -> &GameId {
        &self.id
    }

    pub fn player_x(&self) -> &PlayerId {
        &self.player_x
    }

    pub fn player_o(&self) -> Option<&PlayerId> {
        self.player_o.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn win_run(&self) -> usize {
        self.win_run
    }

    pub fn win_rule(&self) -> WinRule {
        self.win_rule
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Accepted moves in play order
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Axis of the winning run once the game is won
    pub fn winning_line(&self) -> Option<Direction> {
        self.winning_line
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Time of the last accepted join or move
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
