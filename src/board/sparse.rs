//! Sparse board: only occupied cells are stored.
//!
//! Every tile lives in one [`TileRecord`] slot. Two linked lists from a
//! shared [`ListPool`] hold record ids: `row_major` sorted by `(row, col)`
//! and `col_major` sorted by `(col, row)`. Both lists always contain the
//! same ids, so moving or merging a record is visible through either order.
//!
//! A shift walks the list whose lines match the direction (rows for
//! `Left`/`Right`, columns for `Up`/`Down`), from the leading edge, moving
//! and merging records in place. The other list is then rebuilt by
//! bucketing records per line and coalescing the buckets, so a pass costs
//! O(tiles + max(rows, cols)).

use std::fmt;

use log::{debug, trace};

use super::{check_dims, check_tile, grid_shape, write_cell, Board, BoardError, Move};
use crate::list::{CursorError, ListId, ListPool};
use crate::tile::{Score, Tile};

type RecordId = u32;

/// One occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRecord {
    pub row: usize,
    pub col: usize,
    pub tile: Tile,
}

impl TileRecord {
    /// `(line, position in line)` for a pass in the given orientation.
    #[inline]
    fn line_pos(&self, horizontal: bool) -> (usize, usize) {
        if horizontal {
            (self.row, self.col)
        } else {
            (self.col, self.row)
        }
    }

    #[inline]
    fn set_pos(&mut self, horizontal: bool, pos: usize) {
        if horizontal {
            self.col = pos;
        } else {
            self.row = pos;
        }
    }
}

#[derive(Debug)]
pub struct SparseBoard {
    rows: usize,
    cols: usize,
    free: usize,
    shifted: bool,
    records: Vec<Option<TileRecord>>,
    free_records: Vec<RecordId>,
    lists: ListPool<RecordId>,
    row_major: ListId,
    col_major: ListId,
}

impl SparseBoard {
    /// Empty `rows` x `cols` board.
    ///
    /// ```
    /// use sparse_2048::{Board, SparseBoard};
    /// let b = SparseBoard::new(3, 5).unwrap();
    /// assert_eq!(b.free_count(), 15);
    /// assert_eq!(b.tile_count(), 0);
    /// ```
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        check_dims(rows, cols)?;
        Ok(Self::empty(rows, cols))
    }

    /// Board holding the tiles of `tiles`; `None` marks a free cell.
    ///
    /// O(rows * cols).
    pub fn from_grid(tiles: &[Vec<Option<Tile>>]) -> Result<Self, BoardError> {
        let (rows, cols) = grid_shape(tiles)?;
        let mut board = Self::empty(rows, cols);
        for (row, line) in tiles.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                if let Some(tile) = *cell {
                    let id = board.alloc_record(TileRecord { row, col, tile });
                    board.lists.push_back(board.row_major, id);
                }
            }
        }
        board.free = rows * cols - board.tile_count();
        board.rebuild_secondary(true)?;
        Ok(board)
    }

    fn empty(rows: usize, cols: usize) -> Self {
        let mut lists = ListPool::new();
        let row_major = lists.create_list();
        let col_major = lists.create_list();
        Self {
            rows,
            cols,
            free: rows * cols,
            shifted: false,
            records: Vec::new(),
            free_records: Vec::new(),
            lists,
            row_major,
            col_major,
        }
    }

    /// Occupied cells sorted by `(row, col)`.
    pub fn records_row_major(&self) -> impl Iterator<Item = TileRecord> + '_ {
        self.lists.iter(self.row_major).map(|&id| *self.record(id))
    }

    /// Occupied cells sorted by `(col, row)`.
    pub fn records_col_major(&self) -> impl Iterator<Item = TileRecord> + '_ {
        self.lists.iter(self.col_major).map(|&id| *self.record(id))
    }

    // ---------------------------------------------------------------------
    // Record slots
    // ---------------------------------------------------------------------

    fn alloc_record(&mut self, rec: TileRecord) -> RecordId {
        match self.free_records.pop() {
            Some(id) => {
                self.records[id as usize] = Some(rec);
                id
            }
            None => {
                self.records.push(Some(rec));
                (self.records.len() - 1) as RecordId
            }
        }
    }

    fn release_record(&mut self, id: RecordId) {
        self.records[id as usize] = None;
        self.free_records.push(id);
    }

    #[inline]
    fn record(&self, id: RecordId) -> &TileRecord {
        self.records[id as usize].as_ref().expect("listed record is live")
    }

    #[inline]
    fn record_mut(&mut self, id: RecordId) -> &mut TileRecord {
        self.records[id as usize].as_mut().expect("listed record is live")
    }

    // ---------------------------------------------------------------------
    // Passes
    // ---------------------------------------------------------------------

    /// Rebuild the list not walked by a pass from the one that was.
    ///
    /// `horizontal` names the authoritative list: `row_major` when true.
    /// Its records are bucketed by the other axis, in order, so each bucket
    /// comes out sorted, and the buckets are coalesced into the new list.
    fn rebuild_secondary(&mut self, horizontal: bool) -> Result<(), CursorError> {
        let (primary, buckets_len) =
            if horizontal { (self.row_major, self.cols) } else { (self.col_major, self.rows) };
        let buckets: Vec<ListId> = (0..buckets_len).map(|_| self.lists.create_list()).collect();

        let mut cur = self.lists.cursor(primary);
        while cur.has_next(&self.lists)? {
            let id = *cur.next(&self.lists)?;
            let (_, bucket) = self.record(id).line_pos(horizontal);
            self.lists.push_back(buckets[bucket], id);
        }

        let rebuilt = self.lists.coalesce(&buckets);
        for bucket in buckets {
            self.lists.release_list(bucket);
        }
        if horizontal {
            self.lists.release_list(self.col_major);
            self.col_major = rebuilt;
        } else {
            self.lists.release_list(self.row_major);
            self.row_major = rebuilt;
        }
        Ok(())
    }

    fn shift_pass(&mut self, dir: Move) -> Result<(Score, bool), CursorError> {
        let horizontal = dir.is_horizontal();
        let forward = dir.toward_origin();
        let (primary, extent) =
            if horizontal { (self.row_major, self.cols) } else { (self.col_major, self.rows) };
        let step: isize = if forward { 1 } else { -1 };
        let edge: isize = if forward { 0 } else { extent as isize - 1 };

        let mut cur =
            if forward { self.lists.cursor(primary) } else { self.lists.cursor_back(primary) };
        let mut line = None;
        let mut slot = edge;
        let mut pending: Option<RecordId> = None;
        let mut score = 0;
        let mut moved = false;

        loop {
            let more =
                if forward { cur.has_next(&self.lists)? } else { cur.has_previous(&self.lists)? };
            if !more {
                break;
            }
            let id = if forward { *cur.next(&self.lists)? } else { *cur.previous(&self.lists)? };
            let rec = *self.record(id);
            let (rec_line, rec_pos) = rec.line_pos(horizontal);
            let pos = rec_pos as isize;

            if line != Some(rec_line) {
                line = Some(rec_line);
                slot = edge;
                pending = None;
            }

            // Bricks are walls: nothing crosses them in either direction.
            if !rec.tile.is_movable() {
                slot = pos + step;
                pending = None;
                continue;
            }

            if let Some(target) = pending {
                if let Some(merged) = self.record(target).tile.try_merge(&rec.tile) {
                    let target_rec = self.record_mut(target);
                    target_rec.tile = merged;
                    let (_, target_pos) = target_rec.line_pos(horizontal);
                    cur.remove(&mut self.lists)?;
                    self.release_record(id);
                    self.free += 1;
                    score += merged.score();
                    moved = true;
                    pending = None;
                    slot = target_pos as isize + step;
                    continue;
                }
            }

            let behind = if forward { pos >= slot } else { pos <= slot };
            if behind {
                if pos != slot {
                    self.record_mut(id).set_pos(horizontal, slot as usize);
                    moved = true;
                }
                slot += step;
            }
            pending = Some(id);
        }

        if moved {
            self.rebuild_secondary(horizontal)?;
        }
        Ok((score, moved))
    }

    fn place(&mut self, index: usize, tile: Tile) -> Result<(usize, usize), CursorError> {
        // Row-major walk: count the free cells in each gap between records.
        let mut cur = self.lists.cursor(self.row_major);
        let mut seen = 0;
        let mut next_cell = 0;
        let mut target = None;
        while cur.has_next(&self.lists)? {
            let id = *cur.next(&self.lists)?;
            let rec = self.record(id);
            let cell = rec.row * self.cols + rec.col;
            let gap = cell - next_cell;
            if index < seen + gap {
                target = Some(next_cell + (index - seen));
                cur.previous(&self.lists)?;
                break;
            }
            seen += gap;
            next_cell = cell + 1;
        }
        let cell = target.unwrap_or(next_cell + (index - seen));
        let (row, col) = (cell / self.cols, cell % self.cols);

        let id = self.alloc_record(TileRecord { row, col, tile });
        cur.insert_before_cursor(&mut self.lists, id)?;

        let mut cur = self.lists.cursor(self.col_major);
        while cur.has_next(&self.lists)? {
            let other = *cur.next(&self.lists)?;
            let rec = self.record(other);
            if (rec.col, rec.row) > (col, row) {
                cur.previous(&self.lists)?;
                break;
            }
        }
        cur.insert_before_cursor(&mut self.lists, id)?;

        self.free -= 1;
        Ok((row, col))
    }
}

impl Board for SparseBoard {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn tile_count(&self) -> usize {
        self.lists.len(self.row_major)
    }

    fn free_count(&self) -> usize {
        self.free
    }

    /// O(tiles). Scans whichever list reaches `(row, col)` soonest: the
    /// row-major list when the row is nearer a horizontal edge than the
    /// column is to a vertical one, from the nearer end.
    fn tile_at(&self, row: usize, col: usize) -> Result<Option<Tile>, BoardError> {
        if row >= self.rows || col >= self.cols {
            return Err(BoardError::OutOfBounds { row, col, rows: self.rows, cols: self.cols });
        }
        let row_from_end = self.rows - 1 - row;
        let col_from_end = self.cols - 1 - col;
        let (list, key, from_front) = if row.min(row_from_end) <= col.min(col_from_end) {
            (self.row_major, (row, col), row <= row_from_end)
        } else {
            (self.col_major, (col, row), col <= col_from_end)
        };
        let horizontal = list == self.row_major;

        let mut found = None;
        if from_front {
            for &id in self.lists.iter(list) {
                let rec = self.record(id);
                let k = rec.line_pos(horizontal);
                if k >= key {
                    found = (k == key).then_some(rec.tile);
                    break;
                }
            }
        } else {
            for &id in self.lists.iter(list).rev() {
                let rec = self.record(id);
                let k = rec.line_pos(horizontal);
                if k <= key {
                    found = (k == key).then_some(rec.tile);
                    break;
                }
            }
        }
        Ok(found)
    }

    fn last_shift_moved(&self) -> bool {
        self.shifted
    }

    /// O(tiles): neighbours in either list that share a line and merge.
    fn merge_possible(&self) -> bool {
        [(self.row_major, true), (self.col_major, false)].into_iter().any(|(list, horizontal)| {
            let mut prev: Option<(usize, Tile)> = None;
            for &id in self.lists.iter(list) {
                let rec = self.record(id);
                let (line, _) = rec.line_pos(horizontal);
                if let Some((prev_line, prev_tile)) = prev {
                    if prev_line == line && prev_tile.merges_with(&rec.tile) {
                        return true;
                    }
                }
                prev = Some((line, rec.tile));
            }
            false
        })
    }

    /// O(tiles). Fails without touching the board if `index` is not a free space.
    fn add_tile_at_free_space(&mut self, index: usize, tile: Tile) -> Result<(), BoardError> {
        check_tile(&tile)?;
        if index >= self.free {
            return Err(BoardError::OutOfRange { index, free: self.free });
        }
        let (row, col) = self.place(index, tile)?;
        debug!("placed {tile} at ({row}, {col}); {} free", self.free);
        Ok(())
    }

    fn shift(&mut self, dir: Move) -> Score {
        let (score, moved) = self
            .shift_pass(dir)
            .expect("a pass only uses its own cursors on board-private lists");
        self.shifted = moved;
        trace!("sparse shift {dir:?}: score={score} moved={moved}");
        score
    }

    /// Copy with fresh records, built from the row-major list. O(tiles + cols).
    fn copy(&self) -> Self {
        let mut out = Self::empty(self.rows, self.cols);
        for rec in self.records_row_major() {
            let id = out.alloc_record(rec);
            out.lists.push_back(out.row_major, id);
        }
        out.free = self.free;
        out.shifted = self.shifted;
        out.rebuild_secondary(true)
            .expect("a fresh board has no outstanding cursors");
        out
    }
}

impl fmt::Display for SparseBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut recs = self.records_row_major().peekable();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let here = recs.next_if(|r| r.row == row && r.col == col);
                write_cell(f, here.as_ref().map(|r| &r.tile))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
