//! Turn-level game state on top of a [`Board`].
//!
//! The game owns the board, the running score and a seeded RNG. Random
//! placement always draws the free-space index first and the tile second,
//! so a seed fully determines a game for a given sequence of moves.
//!
//! ```
//! use sparse_2048::{Board, Game, Move, SparseBoard};
//!
//! let mut game = Game::new(SparseBoard::new(4, 4).unwrap(), 42);
//! game.add_random_tile().unwrap();
//! game.add_random_tile().unwrap();
//! game.shift(Move::Left);
//! if game.last_shift_moved() {
//!     game.add_random_tile().unwrap();
//! }
//! assert!(game.board().tile_count() >= 2);
//! ```

use std::fmt;

use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::board::{Board, BoardError, Move};
use crate::tile::{Score, Tile};

pub struct Game<B: Board> {
    board: B,
    score: Score,
    rng: StdRng,
}

impl<B: Board> Game<B> {
    /// Start a game on `board` with a deterministic RNG.
    pub fn new(board: B, seed: u64) -> Self {
        Self { board, score: 0, rng: StdRng::seed_from_u64(seed) }
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn cols(&self) -> usize {
        self.board.cols()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Tile at `(row, col)`, `None` for a free cell.
    pub fn tile_at(&self, row: usize, col: usize) -> Result<Option<Tile>, BoardError> {
        self.board.tile_at(row, col)
    }

    /// Shift the board and add the merge score.
    pub fn shift(&mut self, dir: Move) -> Score {
        let gained = self.board.shift(dir);
        self.score += gained;
        debug!("{dir:?}: +{gained} (total {})", self.score);
        gained
    }

    pub fn last_shift_moved(&self) -> bool {
        self.board.last_shift_moved()
    }

    /// A 2 (70%), 4 (25%) or 8 (5%).
    pub fn random_tile(&mut self) -> Tile {
        let roll: f64 = self.rng.gen();
        if roll <= 0.70 {
            Tile::Number(2)
        } else if roll <= 0.95 {
            Tile::Number(4)
        } else {
            Tile::Number(8)
        }
    }

    /// Uniform free-space index, `None` on a full board.
    pub fn random_free_location(&mut self) -> Option<usize> {
        let free = self.board.free_count();
        (free > 0).then(|| self.rng.gen_range(0..free))
    }

    /// Place a random tile at a random free space. No-op on a full board.
    pub fn add_random_tile(&mut self) -> Result<(), BoardError> {
        let Some(location) = self.random_free_location() else {
            return Ok(());
        };
        let tile = self.random_tile();
        self.board.add_tile_at_free_space(location, tile)
    }

    /// Place a brick at a random free space. No-op on a full board.
    pub fn add_random_brick(&mut self) -> Result<(), BoardError> {
        let Some(location) = self.random_free_location() else {
            return Ok(());
        };
        self.board.add_tile_at_free_space(location, Tile::Brick)
    }

    /// No free space and nothing left to merge.
    pub fn is_game_over(&self) -> bool {
        self.board.free_count() == 0 && !self.board.merge_possible()
    }
}

impl<B: Board> fmt::Display for Game<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {}\n{}", self.score, self.board)
    }
}
