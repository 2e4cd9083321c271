//! Attack detection on the padded board.
//!
//! A precomputed table classifies the raw square-index delta between any two
//! playable cells: which piece kinds could traverse it (knight jump,
//! diagonal ray, orthogonal ray, adjacent step, pawn capture). A companion
//! table gives the unit step along sliding deltas, from which the
//! intervening squares of a ray are walked for the blocker check.
//! Non-sliding attackers need no blocker check.
//!
//! Queries iterate the attacking side's piece list rather than scanning all
//! 64 squares.

use once_cell::sync::Lazy;

use super::types::EMPTY;
use super::{Color, Piece, Position, Square};

// Attack-class bits per delta
const ATK_KNIGHT: u8 = 1 << 0;
const ATK_DIAG: u8 = 1 << 1;
const ATK_ORTHO: u8 = 1 << 2;
const ATK_KING: u8 = 1 << 3;
const ATK_WHITE_PAWN: u8 = 1 << 4;
const ATK_BLACK_PAWN: u8 = 1 << 5;

/// Deltas range over -119..=119 on the 120-cell board; index by delta + 119.
const DELTA_TABLE_SIZE: usize = 239;
const DELTA_OFFSET: isize = 119;

const KNIGHT_DELTAS: [isize; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];
const DIAG_DIRS: [isize; 4] = [-11, -9, 9, 11];
const ORTHO_DIRS: [isize; 4] = [-10, -1, 1, 10];

/// Class bitmask for every square delta.
static DELTA_CLASS: Lazy<[u8; DELTA_TABLE_SIZE]> = Lazy::new(|| {
    let mut table = [0u8; DELTA_TABLE_SIZE];

    for delta in KNIGHT_DELTAS {
        table[(delta + DELTA_OFFSET) as usize] |= ATK_KNIGHT;
    }

    for dir in DIAG_DIRS {
        for dist in 1..=7isize {
            let idx = (dir * dist + DELTA_OFFSET) as usize;
            table[idx] |= ATK_DIAG;
            if dist == 1 {
                table[idx] |= ATK_KING;
            }
        }
    }

    for dir in ORTHO_DIRS {
        for dist in 1..=7isize {
            let idx = (dir * dist + DELTA_OFFSET) as usize;
            table[idx] |= ATK_ORTHO;
            if dist == 1 {
                table[idx] |= ATK_KING;
            }
        }
    }

    // Pawn capture deltas, attacker -> target
    table[(9 + DELTA_OFFSET) as usize] |= ATK_WHITE_PAWN;
    table[(11 + DELTA_OFFSET) as usize] |= ATK_WHITE_PAWN;
    table[(-9 + DELTA_OFFSET) as usize] |= ATK_BLACK_PAWN;
    table[(-11 + DELTA_OFFSET) as usize] |= ATK_BLACK_PAWN;

    table
});

/// Unit ray step for every sliding delta, zero for non-ray deltas.
static DELTA_STEP: Lazy<[i8; DELTA_TABLE_SIZE]> = Lazy::new(|| {
    let mut table = [0i8; DELTA_TABLE_SIZE];

    for dir in DIAG_DIRS.iter().chain(ORTHO_DIRS.iter()) {
        for dist in 1..=7isize {
            table[(dir * dist + DELTA_OFFSET) as usize] = *dir as i8;
        }
    }

    table
});

#[inline]
fn delta_class(from: Square, to: Square) -> u8 {
    let delta = to.as_index() as isize - from.as_index() as isize;
    DELTA_CLASS[(delta + DELTA_OFFSET) as usize]
}

impl Position {
    /// True if `target` is attacked by any piece of `attacker`.
    #[must_use]
    pub fn is_square_attacked(&self, target: Square, attacker: Color) -> bool {
        let pawn_class = match attacker {
            Color::White => ATK_WHITE_PAWN,
            Color::Black => ATK_BLACK_PAWN,
        };

        for (_, entry) in self.piece_lists[attacker.index()].occupied() {
            let from = entry.square();
            let class = delta_class(from, target);
            if class == 0 {
                continue;
            }

            let hits = match entry.piece() {
                Piece::Pawn => class & pawn_class != 0,
                Piece::Knight => class & ATK_KNIGHT != 0,
                Piece::King => class & ATK_KING != 0,
                Piece::Bishop => class & ATK_DIAG != 0 && self.ray_is_clear(from, target),
                Piece::Rook => class & ATK_ORTHO != 0 && self.ray_is_clear(from, target),
                Piece::Queen => {
                    class & (ATK_DIAG | ATK_ORTHO) != 0 && self.ray_is_clear(from, target)
                }
            };
            if hits {
                return true;
            }
        }

        false
    }

    /// Walk the intervening squares of a ray and confirm they are empty.
    ///
    /// `from` and `to` must share a precomputed ray; the endpoints
    /// themselves are not examined.
    fn ray_is_clear(&self, from: Square, to: Square) -> bool {
        let delta = to.as_index() as isize - from.as_index() as isize;
        let step = DELTA_STEP[(delta + DELTA_OFFSET) as usize];
        debug_assert!(step != 0, "ray_is_clear on non-ray delta {delta}");

        let mut idx = from.as_index() as isize + step as isize;
        let to_idx = to.as_index() as isize;
        while idx != to_idx {
            if self.board[idx as usize] != EMPTY {
                return false;
            }
            idx += step as isize;
        }
        true
    }

    /// True if `color`'s king is currently attacked.
    ///
    /// Serves both call sites: "was my move legal" (query the side that just
    /// moved) and "am I in check before moving" (query the side to move).
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opponent())
    }
}
