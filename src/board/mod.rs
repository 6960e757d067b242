//! Board abstraction shared by the sparse and dense implementations.
//!
//! - [`SparseBoard`] tracks only occupied cells, through a row-major and a
//!   column-major linked list over the same tile records. Shifts cost
//!   O(tiles + max(rows, cols)).
//! - [`DenseBoard`] is a plain row-major array. It is the reference the
//!   sparse board is checked against.
//!
//! Shift rules, identical for both boards:
//! - tiles slide toward the leading edge of each line until they hit the
//!   edge, another tile, or a brick;
//! - bricks never move and split a line into independent segments;
//! - two equal tiles merge once per pass (no chain merges);
//! - the returned score is the sum of the merged tiles' values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::list::CursorError;
use crate::tile::{MergeError, Score, Tile};

mod dense;
mod sparse;

pub use dense::DenseBoard;
pub use sparse::{SparseBoard, TileRecord};

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// True for `Left`/`Right`, which work row by row.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Move::Left | Move::Right)
    }

    /// True when tiles travel toward index 0 of their line.
    #[inline]
    pub fn toward_origin(self) -> bool {
        matches!(self, Move::Left | Move::Up)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("position ({row}, {col}) is outside a {rows}x{cols} board")]
    OutOfBounds { row: usize, col: usize, rows: usize, cols: usize },
    #[error("free space {index} requested but only {free} free spaces exist")]
    OutOfRange { index: usize, free: usize },
    #[error("invalid board shape: {0}")]
    Shape(String),
    #[error("tile {0} is not a brick or a positive number")]
    InvalidTile(Tile),
    /// Boards never merge without checking first; this lets callers use `?`
    /// on [`Tile::merge`] inside functions returning `BoardError`.
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error(transparent)]
    Cursor(#[from] CursorError),
}

/// Operations a game needs from a board.
///
/// Free spaces are numbered `0..free_count()` row-major, left to right and
/// top to bottom, skipping occupied cells.
pub trait Board: fmt::Display {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Number of occupied cells.
    fn tile_count(&self) -> usize;

    fn free_count(&self) -> usize;

    /// Tile at `(row, col)`, `None` for a free cell.
    fn tile_at(&self, row: usize, col: usize) -> Result<Option<Tile>, BoardError>;

    /// True if the last shift moved or merged any tile.
    fn last_shift_moved(&self) -> bool;

    /// True if some shift would merge at least one pair of tiles.
    fn merge_possible(&self) -> bool;

    /// Place `tile` at the `index`-th free space.
    fn add_tile_at_free_space(&mut self, index: usize, tile: Tile) -> Result<(), BoardError>;

    /// Slide and merge every line toward `dir`, returning the merge score.
    fn shift(&mut self, dir: Move) -> Score;

    /// Independent deep copy.
    fn copy(&self) -> Self
    where
        Self: Sized;

    /// Row-major snapshot of every cell.
    fn to_grid(&self) -> Vec<Vec<Option<Tile>>> {
        (0..self.rows())
            .map(|r| {
                (0..self.cols())
                    .map(|c| self.tile_at(r, c).ok().flatten())
                    .collect()
            })
            .collect()
    }
}

/// Validate a caller-provided grid and return its `(rows, cols)`.
pub(crate) fn grid_shape(tiles: &[Vec<Option<Tile>>]) -> Result<(usize, usize), BoardError> {
    let rows = tiles.len();
    let cols = tiles.first().map_or(0, Vec::len);
    check_dims(rows, cols)?;
    if let Some(r) = tiles.iter().position(|row| row.len() != cols) {
        return Err(BoardError::Shape(format!(
            "row {r} has {} columns, expected {cols}",
            tiles[r].len()
        )));
    }
    for tile in tiles.iter().flatten().flatten() {
        check_tile(tile)?;
    }
    Ok((rows, cols))
}

pub(crate) fn check_tile(tile: &Tile) -> Result<(), BoardError> {
    if tile.is_valid() {
        Ok(())
    } else {
        Err(BoardError::InvalidTile(*tile))
    }
}

pub(crate) fn check_dims(rows: usize, cols: usize) -> Result<(), BoardError> {
    if rows == 0 || cols == 0 {
        return Err(BoardError::Shape(format!("{rows}x{cols} board has no cells")));
    }
    if rows.checked_mul(cols).is_none() {
        return Err(BoardError::Shape(format!("{rows}x{cols} board is too large")));
    }
    Ok(())
}

/// Write one cell of the diagnostic dump: a 4-wide right-justified field and a space.
pub(crate) fn write_cell(f: &mut fmt::Formatter<'_>, tile: Option<&Tile>) -> fmt::Result {
    match tile {
        Some(t) => write!(f, "{t:>4} "),
        None => write!(f, "{:>4} ", "-"),
    }
}
