use std::fmt;

use log::trace;

use super::{check_dims, check_tile, grid_shape, write_cell, Board, BoardError, Move};
use crate::tile::{Score, Tile};

/// Row-major array board. Every operation scans the full grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseBoard {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Tile>>,
    shifted: bool,
}

impl DenseBoard {
    /// Empty `rows` x `cols` board.
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        check_dims(rows, cols)?;
        Ok(Self { rows, cols, cells: vec![None; rows * cols], shifted: false })
    }

    /// Board holding a copy of `tiles`; `None` marks a free cell.
    pub fn from_grid(tiles: &[Vec<Option<Tile>>]) -> Result<Self, BoardError> {
        let (rows, cols) = grid_shape(tiles)?;
        let cells = tiles.iter().flat_map(|row| row.iter().copied()).collect();
        Ok(Self { rows, cols, cells, shifted: false })
    }

    /// Cell indices of every line, each ordered in the direction of travel.
    fn lines(&self, dir: Move) -> Vec<Vec<usize>> {
        let (count, len) =
            if dir.is_horizontal() { (self.rows, self.cols) } else { (self.cols, self.rows) };
        (0..count)
            .map(|line| {
                let at = |pos: usize| {
                    if dir.is_horizontal() {
                        line * self.cols + pos
                    } else {
                        pos * self.cols + line
                    }
                };
                if dir.toward_origin() {
                    (0..len).map(at).collect()
                } else {
                    (0..len).rev().map(at).collect()
                }
            })
            .collect()
    }

    fn shift_line(&mut self, order: &[usize]) -> (Score, bool) {
        let mut score = 0;
        let mut moved = false;
        let mut slot = 0;
        let mut pending: Option<usize> = None;

        for k in 0..order.len() {
            let Some(tile) = self.cells[order[k]] else { continue };
            if !tile.is_movable() {
                slot = k + 1;
                pending = None;
                continue;
            }
            let merged =
                pending.and_then(|p| self.cells[order[p]].and_then(|t| t.try_merge(&tile)));
            if let (Some(p), Some(merged)) = (pending, merged) {
                self.cells[order[p]] = Some(merged);
                self.cells[order[k]] = None;
                score += merged.score();
                moved = true;
                pending = None;
                slot = p + 1;
                continue;
            }
            if slot != k {
                self.cells[order[slot]] = Some(tile);
                self.cells[order[k]] = None;
                moved = true;
            }
            pending = Some(slot);
            slot += 1;
        }
        (score, moved)
    }

    fn line_can_merge(&self, order: impl Iterator<Item = usize>) -> bool {
        let mut prev: Option<Tile> = None;
        for tile in order.filter_map(|i| self.cells[i]) {
            if prev.is_some_and(|p| p.merges_with(&tile)) {
                return true;
            }
            prev = Some(tile);
        }
        false
    }
}

impl Board for DenseBoard {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn free_count(&self) -> usize {
        self.cells.len() - self.tile_count()
    }

    fn tile_at(&self, row: usize, col: usize) -> Result<Option<Tile>, BoardError> {
        if row >= self.rows || col >= self.cols {
            return Err(BoardError::OutOfBounds { row, col, rows: self.rows, cols: self.cols });
        }
        Ok(self.cells[row * self.cols + col])
    }

    fn last_shift_moved(&self) -> bool {
        self.shifted
    }

    fn merge_possible(&self) -> bool {
        let cols = self.cols;
        (0..self.rows).any(|r| self.line_can_merge((0..cols).map(|c| r * cols + c)))
            || (0..cols).any(|c| self.line_can_merge((0..self.rows).map(|r| r * cols + c)))
    }

    fn add_tile_at_free_space(&mut self, index: usize, tile: Tile) -> Result<(), BoardError> {
        check_tile(&tile)?;
        let free = self.free_count();
        if index >= free {
            return Err(BoardError::OutOfRange { index, free });
        }
        let at = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .nth(index)
            .map(|(i, _)| i)
            .ok_or(BoardError::OutOfRange { index, free })?;
        self.cells[at] = Some(tile);
        Ok(())
    }

    fn shift(&mut self, dir: Move) -> Score {
        let mut score = 0;
        let mut moved = false;
        for order in self.lines(dir) {
            let (s, m) = self.shift_line(&order);
            score += s;
            moved |= m;
        }
        self.shifted = moved;
        trace!("dense shift {dir:?}: score={score} moved={moved}");
        score
    }

    fn copy(&self) -> Self {
        self.clone()
    }
}

impl fmt::Display for DenseBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for cell in row {
                write_cell(f, cell.as_ref())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const B: Option<Tile> = Some(Tile::Brick);

    fn n(v: u64) -> Option<Tile> {
        Some(Tile::Number(v))
    }

    fn board(tiles: Vec<Vec<Option<Tile>>>) -> DenseBoard {
        DenseBoard::from_grid(&tiles).unwrap()
    }

    #[test]
    fn test_shift_left_line() {
        let mut b = board(vec![vec![n(2), None, n(2), n(2)]]);
        assert_eq!(b.shift(Move::Left), 4);
        assert_eq!(b.to_grid(), vec![vec![n(4), n(2), None, None]]);
        assert!(b.last_shift_moved());
    }

    #[test]
    fn test_shift_right_line() {
        let mut b = board(vec![vec![n(2), n(2), n(2), n(2)]]);
        assert_eq!(b.shift(Move::Right), 8);
        assert_eq!(b.to_grid(), vec![vec![None, None, n(4), n(4)]]);
    }

    #[test]
    fn test_shift_vertical() {
        let mut b = board(vec![vec![n(2)], vec![None], vec![n(2)], vec![n(4)]]);
        assert_eq!(b.shift(Move::Up), 4);
        assert_eq!(b.to_grid(), vec![vec![n(4)], vec![n(4)], vec![None], vec![None]]);
        assert_eq!(b.shift(Move::Down), 8);
        assert_eq!(b.to_grid(), vec![vec![None], vec![None], vec![None], vec![n(8)]]);
    }

    #[test]
    fn test_bricks_split_lines() {
        let mut b = board(vec![vec![n(2), B, n(2)]]);
        assert_eq!(b.shift(Move::Left), 0);
        assert_eq!(b.to_grid(), vec![vec![n(2), B, n(2)]]);
        assert!(!b.last_shift_moved());

        let mut b = board(vec![vec![None, n(2), B, None, n(4)]]);
        b.shift(Move::Left);
        assert_eq!(b.to_grid(), vec![vec![n(2), None, B, n(4), None]]);
    }

    #[test]
    fn test_add_tile_at_free_space() {
        let mut b = board(vec![vec![None, None], vec![n(4), None]]);
        assert_eq!(b.free_count(), 3);
        assert_eq!(
            b.add_tile_at_free_space(3, Tile::Number(8)),
            Err(BoardError::OutOfRange { index: 3, free: 3 })
        );
        b.add_tile_at_free_space(2, Tile::Number(8)).unwrap();
        assert_eq!(b.to_grid(), vec![vec![None, None], vec![n(4), n(8)]]);
    }

    #[test]
    fn test_merge_possible() {
        assert!(board(vec![vec![n(2), None, n(2)]]).merge_possible());
        assert!(!board(vec![vec![n(2), B, n(2)]]).merge_possible());
        assert!(board(vec![vec![n(2), n(4)], vec![n(2), n(8)]]).merge_possible());
        assert!(!board(vec![vec![n(2), n(4)], vec![n(4), n(2)]]).merge_possible());
    }

    #[test]
    fn test_overflowing_pair_stays_put() {
        let top = n(1 << 63);
        let mut b = board(vec![vec![top, None, top]]);
        assert_eq!(b.shift(Move::Left), 0);
        assert_eq!(b.to_grid(), vec![vec![top, top, None]]);
        assert!(b.last_shift_moved());
        assert_eq!(b.shift(Move::Left), 0);
        assert!(!b.last_shift_moved());
        assert!(!b.merge_possible());
    }

    #[test]
    fn test_display() {
        let b = board(vec![vec![n(2), None], vec![B, n(1024)]]);
        assert_eq!(b.to_string(), "   2    - \nBRCK 1024 \n");
    }
}
