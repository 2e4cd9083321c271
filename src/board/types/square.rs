//! Square type for the padded 10x12 mailbox board.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// Number of cells in the padded board (10 files x 12 ranks).
pub(crate) const BOARD_SIZE: usize = 120;

/// First playable cell (a1).
pub(crate) const PLAYABLE_START: u8 = 21;

/// Last playable cell (h8).
pub(crate) const PLAYABLE_END: u8 = 98;

pub(crate) fn file_to_index(file: char) -> usize {
    file as usize - ('a' as usize)
}

pub(crate) fn rank_to_index(rank: char) -> usize {
    (rank as usize) - ('0' as usize) - 1
}

/// A square on the padded mailbox board.
///
/// The playable 8x8 region is surrounded by a sentinel border so that
/// stepping a fixed offset off the edge lands on a border cell instead of
/// wrapping around. Index layout: a1 = 21, h1 = 28, a8 = 91, h8 = 98;
/// one step north is +10, one step east is +1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(pub(crate) u8);

impl Square {
    /// Create a square from rank and file (both 0-7), with bounds checking.
    #[must_use]
    pub fn new(rank: usize, file: usize) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square(((rank + 2) * 10 + file + 1) as u8))
        } else {
            None
        }
    }

    /// Create a square from rank and file without bounds checking.
    ///
    /// Callers must guarantee `rank < 8` and `file < 8`.
    #[inline]
    #[must_use]
    pub(crate) const fn from_coords(rank: usize, file: usize) -> Self {
        Square(((rank + 2) * 10 + file + 1) as u8)
    }

    /// Get the rank (0-7, where 0 = rank 1).
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        self.0 as usize / 10 - 2
    }

    /// Get the file (0-7, where 0 = file a).
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        self.0 as usize % 10 - 1
    }

    /// Raw index into the 120-cell board array.
    #[inline]
    #[must_use]
    pub(crate) const fn as_index(self) -> usize {
        self.0 as usize
    }

    /// Index into 64-entry tables (a1 = 0, h8 = 63), used for Zobrist keys.
    #[inline]
    #[must_use]
    pub(crate) const fn as_index64(self) -> usize {
        self.rank() * 8 + self.file()
    }

    /// Build a square from a raw 120-cell index.
    ///
    /// Callers must guarantee the index lies inside the playable region.
    #[inline]
    #[must_use]
    pub(crate) const fn from_raw(idx: u8) -> Self {
        Square(idx)
    }

    /// True if a raw 120-cell index lies inside the playable 8x8 region.
    #[inline]
    #[must_use]
    pub(crate) const fn raw_is_playable(idx: u8) -> bool {
        if idx < PLAYABLE_START || idx > PLAYABLE_END {
            return false;
        }
        let file = idx % 10;
        file >= 1 && file <= 8
    }

    /// Color of the square (true = light), used for bishop draw detection.
    #[inline]
    #[must_use]
    pub(crate) const fn is_light(self) -> bool {
        (self.rank() + self.file()) % 2 == 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.file() as u8 + b'a') as char, self.rank() + 1)
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Square {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (usize, usize)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square::from_coords(rank, file))
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        }

        let file = match chars[0] {
            'a'..='h' => chars[0] as usize - 'a' as usize,
            _ => {
                return Err(SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };

        let rank = match chars[1] {
            '1'..='8' => chars[1] as usize - '1' as usize,
            _ => {
                return Err(SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };

        Ok(Square::from_coords(rank, file))
    }
}
