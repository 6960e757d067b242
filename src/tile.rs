//! Tile values that occupy a single board cell.
//!
//! A [`Tile`] is either a numbered tile that merges with an equal tile, or a
//! brick that never merges and never moves. The board algorithms only talk
//! to tiles through the capability methods below.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Score type shared by tiles, boards and games.
pub type Score = u64;

/// The contents of one occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// A numbered tile, normally a power of two.
    Number(u64),
    /// An immovable obstacle.
    Brick,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("can't merge tiles |{stationary}| and |{moving}|")]
    InvalidMerge { stationary: Tile, moving: Tile },
}

impl Tile {
    /// True if `moving` can slide into `self` and combine with it.
    ///
    /// Equal numbers whose sum would overflow `u64` don't merge.
    ///
    /// ```
    /// use sparse_2048::Tile;
    /// assert!(Tile::Number(4).merges_with(&Tile::Number(4)));
    /// assert!(!Tile::Number(4).merges_with(&Tile::Number(8)));
    /// assert!(!Tile::Brick.merges_with(&Tile::Brick));
    /// assert!(!Tile::Number(1 << 63).merges_with(&Tile::Number(1 << 63)));
    /// ```
    #[inline]
    pub fn merges_with(&self, moving: &Tile) -> bool {
        self.try_merge(moving).is_some()
    }

    /// Combine two tiles, returning `None` when they don't merge.
    #[inline]
    pub fn try_merge(&self, moving: &Tile) -> Option<Tile> {
        match (self, moving) {
            (Tile::Number(a), Tile::Number(b)) if a == b => a.checked_add(*b).map(Tile::Number),
            _ => None,
        }
    }

    /// True for bricks and positive numbers, the only tiles a board accepts.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !matches!(self, Tile::Number(0))
    }

    /// Combine two tiles into the merged tile.
    ///
    /// ```
    /// use sparse_2048::Tile;
    /// assert_eq!(Tile::Number(2).merge(&Tile::Number(2)).unwrap(), Tile::Number(4));
    /// assert!(Tile::Brick.merge(&Tile::Number(2)).is_err());
    /// ```
    pub fn merge(&self, moving: &Tile) -> Result<Tile, MergeError> {
        self.try_merge(moving).ok_or(MergeError::InvalidMerge {
            stationary: *self,
            moving: *moving,
        })
    }

    /// Points contributed by this tile when it is produced by a merge.
    #[inline]
    pub fn score(&self) -> Score {
        match self {
            Tile::Number(v) => *v,
            Tile::Brick => 0,
        }
    }

    #[inline]
    pub fn is_movable(&self) -> bool {
        matches!(self, Tile::Number(_))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Padding flags are forwarded so `{:>4}` works in board dumps.
        match self {
            Tile::Number(v) => fmt::Display::fmt(v, f),
            Tile::Brick => f.pad("BRCK"),
        }
    }
}
