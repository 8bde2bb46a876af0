//! Win detection for m,n,k games.
//!
//! A single run-length walk is parameterized by a direction vector; every axis
//! check (vertical, horizontal and the two diagonals) goes through it.

use serde::{Deserialize, Serialize};

use super::entity::{Board, Cell, Position};

/// An axis a winning run can lie on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Along a column (y changes)
    Vertical,
    /// Along a row (x changes)
    Horizontal,
    /// Top-left to bottom-right
    Diagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

impl Direction {
    /// Unit step `(dx, dy)` for this axis. The opposite half-axis is the negated step.
    pub fn step(self) -> (i64, i64) {
        match self {
            Direction::Vertical => (0, 1),
            Direction::Horizontal => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// Which axes count towards a win.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WinRule {
    /// Vertical and horizontal runs only.
    #[default]
    Orthogonal,
    /// Vertical, horizontal and both diagonals.
    WithDiagonals,
}

impl WinRule {
    /// Axes to scan, in reporting priority order.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            WinRule::Orthogonal => &[Direction::Vertical, Direction::Horizontal],
            WinRule::WithDiagonals => &[
                Direction::Vertical,
                Direction::Horizontal,
                Direction::Diagonal,
                Direction::AntiDiagonal,
            ],
        }
    }
}

/// Length of the contiguous run of `cell` through `origin` along `direction`.
///
/// `origin` itself is counted as part of the run; the walk extends both ways
/// and stops at the board edge or at the first differing cell.
pub fn run_length(board: &Board, origin: Position, cell: Cell, direction: Direction) -> usize {
    let (dx, dy) = direction.step();
    1 + count_from(board, origin, cell, dx, dy) + count_from(board, origin, cell, -dx, -dy)
}

fn count_from(board: &Board, origin: Position, cell: Cell, dx: i64, dy: i64) -> usize {
    let mut count = 0;
    let mut pos = origin.offset(dx, dy);
    while board.get(pos) == Some(cell) {
        count += 1;
        pos = pos.offset(dx, dy);
    }
    count
}

/// First axis (in `rule` priority order) on which the mark just placed at
/// `origin` completes a run of at least `win_run`.
pub fn find_winning_line(
    board: &Board,
    origin: Position,
    cell: Cell,
    win_run: usize,
    rule: WinRule,
) -> Option<Direction> {
    rule.directions()
        .iter()
        .copied()
        .find(|&direction| run_length(board, origin, cell, direction) >= win_run)
}
