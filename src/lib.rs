//! sparse-2048: 2048 with bricks on arbitrary R x C boards
//!
//! This crate provides:
//! - A sparse `SparseBoard` that keeps only occupied cells, threaded through
//!   a row-major and a column-major list (`board` module)
//! - A dense `DenseBoard` with the same rules, used as a reference
//! - A `ListPool` of doubly linked lists with O(1) splicing and fail-fast
//!   cursors (`list` module)
//! - A seeded `Game` driver for random tile and brick placement (`game` module)
//!
//! Quick start:
//! ```
//! use sparse_2048::{Board, Move, SparseBoard, Tile};
//!
//! let n = |v| Some(Tile::Number(v));
//! let mut board = SparseBoard::from_grid(&[
//!     vec![n(2), None, n(2), n(2)],
//!     vec![None, Some(Tile::Brick), None, n(4)],
//! ])
//! .unwrap();
//!
//! assert_eq!(board.shift(Move::Left), 4);
//! assert_eq!(board.tile_at(0, 0).unwrap(), n(4));
//! assert_eq!(board.tile_at(0, 1).unwrap(), n(2));
//! assert_eq!(board.tile_at(1, 2).unwrap(), n(4));
//! assert_eq!(board.free_count(), 4);
//! ```
pub mod board;
pub mod game;
pub mod list;
pub mod tile;

pub use board::{Board, BoardError, DenseBoard, Move, SparseBoard};
pub use game::Game;
pub use tile::{MergeError, Score, Tile};
