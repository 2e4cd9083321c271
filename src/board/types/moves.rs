//! Packed move representation and move lists.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::square::Square;

// Bit layout of the packed move (see `Move` docs).
const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 7;
const PROMO_SHIFT: u32 = 14;
const FLAG_SHIFT: u32 = 16;
const SLOT_SHIFT: u32 = 19;
const SCORE_SHIFT: u32 = 24;

const SQUARE_MASK: u32 = 0x7F;
const PROMO_MASK: u32 = 0x3;
const FLAG_MASK: u32 = 0x7;
const SLOT_MASK: u32 = 0xF;
const SCORE_MASK: u32 = 0xFF << SCORE_SHIFT;

/// Move kind carried in the flag field.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum MoveFlag {
    Quiet = 0,
    DoublePawnPush = 1,
    Castle = 2,
    EnPassant = 3,
    Capture = 4,
    Promotion = 5,
    PromotionCapture = 6,
}

impl MoveFlag {
    #[inline]
    const fn from_bits(bits: u32) -> MoveFlag {
        match bits & FLAG_MASK {
            0 => MoveFlag::Quiet,
            1 => MoveFlag::DoublePawnPush,
            2 => MoveFlag::Castle,
            3 => MoveFlag::EnPassant,
            4 => MoveFlag::Capture,
            5 => MoveFlag::Promotion,
            _ => MoveFlag::PromotionCapture,
        }
    }
}

/// Promotion kinds in field order (2 bits).
const PROMO_KINDS: [Piece; 4] = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

#[inline]
const fn promo_bits(piece: Piece) -> u32 {
    match piece {
        Piece::Knight => 0,
        Piece::Bishop => 1,
        Piece::Rook => 2,
        _ => 3, // queen; pawn/king are never promotion targets
    }
}

/// Packed 32-bit move.
///
/// Encoding:
/// - bits 0-6:   from square (raw 120-cell index)
/// - bits 7-13:  to square (raw 120-cell index)
/// - bits 14-15: promotion kind (knight/bishop/rook/queen)
/// - bits 16-18: move flag
/// - bits 19-22: origin piece-list slot, so make/unmake never re-searches
///   the mover's list entry
/// - bits 24-31: ordering score, consulted only by the search comparator
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    /// Null move, used for initialization and "no move" sentinels.
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Move(0)
    }

    /// Pack a move from its fields.
    #[inline]
    #[must_use]
    pub(crate) const fn pack(
        from: Square,
        to: Square,
        promotion: Piece,
        flag: MoveFlag,
        slot: usize,
        score: u8,
    ) -> Self {
        Move(
            ((from.0 as u32) << FROM_SHIFT)
                | ((to.0 as u32) << TO_SHIFT)
                | (promo_bits(promotion) << PROMO_SHIFT)
                | ((flag as u32) << FLAG_SHIFT)
                | ((slot as u32 & SLOT_MASK) << SLOT_SHIFT)
                | ((score as u32) << SCORE_SHIFT),
        )
    }

    /// Source square.
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square(((self.0 >> FROM_SHIFT) & SQUARE_MASK) as u8)
    }

    /// Destination square.
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square(((self.0 >> TO_SHIFT) & SQUARE_MASK) as u8)
    }

    /// Move flag.
    #[inline]
    #[must_use]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag::from_bits(self.0 >> FLAG_SHIFT)
    }

    /// Origin piece-list slot index (0-15).
    #[inline]
    #[must_use]
    pub(crate) const fn slot(self) -> usize {
        ((self.0 >> SLOT_SHIFT) & SLOT_MASK) as usize
    }

    /// Ordering score assigned at generation time.
    #[inline]
    #[must_use]
    pub(crate) const fn score(self) -> u8 {
        ((self.0 >> SCORE_SHIFT) & 0xFF) as u8
    }

    /// Promotion piece, if this is a promotion move.
    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        match self.flag() {
            MoveFlag::Promotion | MoveFlag::PromotionCapture => {
                Some(PROMO_KINDS[((self.0 >> PROMO_SHIFT) & PROMO_MASK) as usize])
            }
            _ => None,
        }
    }

    /// Raw promotion field regardless of flag (codec round-trip only).
    #[inline]
    #[must_use]
    #[allow(dead_code)]
    pub(crate) const fn promotion_field(self) -> Piece {
        PROMO_KINDS[((self.0 >> PROMO_SHIFT) & PROMO_MASK) as usize]
    }

    /// True if this move captures a piece (including en passant).
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        matches!(
            self.flag(),
            MoveFlag::Capture | MoveFlag::EnPassant | MoveFlag::PromotionCapture
        )
    }

    /// True if this move is an en passant capture.
    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.flag(), MoveFlag::EnPassant)
    }

    /// True if this move is castling.
    #[inline]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        matches!(self.flag(), MoveFlag::Castle)
    }

    /// True if this move is a double pawn push.
    #[inline]
    #[must_use]
    pub const fn is_double_pawn_push(self) -> bool {
        matches!(self.flag(), MoveFlag::DoublePawnPush)
    }

    /// True if this move promotes a pawn.
    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        matches!(self.flag(), MoveFlag::Promotion | MoveFlag::PromotionCapture)
    }

    /// True if this move is a capture or promotion.
    #[inline]
    #[must_use]
    pub const fn is_tactical(self) -> bool {
        self.is_capture() || self.is_promotion()
    }

    /// True if this is the null move.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Compare two moves ignoring the advisory ordering-score bits.
    ///
    /// The score is assigned at generation time and may differ between a
    /// freshly generated move and the same move recalled from the
    /// transposition table.
    #[inline]
    #[must_use]
    pub const fn same_move(self, other: Move) -> bool {
        (self.0 ^ other.0) & !SCORE_MASK == 0
    }

    /// Copy of this move with a different ordering score.
    #[inline]
    #[must_use]
    pub(crate) const fn with_score(self, score: u8) -> Move {
        Move((self.0 & !SCORE_MASK) | ((score as u32) << SCORE_SHIFT))
    }

    /// Raw 32-bit value (for transposition-table storage).
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Rebuild from a raw 32-bit value.
    #[inline]
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Move(value)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        if self.is_capture() {
            write!(f, " cap")?;
        }
        if self.is_castle() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        write!(f, " slot {})", self.slot())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;
pub(crate) const MAX_PLY: usize = 128;
pub(crate) const EMPTY_MOVE: Move = Move::null();

/// List of moves with a fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub(crate) fn new() -> Self {
        MoveList {
            moves: [EMPTY_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        if idx < self.len {
            Some(self.moves[idx])
        } else {
            None
        }
    }

    /// Find a generated move matching `other`, ignoring its ordering score.
    #[must_use]
    pub fn find(&self, other: Move) -> Option<Move> {
        self.iter().copied().find(|m| m.same_move(other))
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}

/// A scored move for move ordering.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Fixed-size list of scored moves to avoid heap allocation in the search.
#[derive(Clone, Debug)]
pub(crate) struct ScoredMoveList {
    moves: [ScoredMove; MAX_MOVES],
    len: usize,
}

impl ScoredMoveList {
    pub(crate) fn new() -> Self {
        ScoredMoveList {
            moves: [ScoredMove {
                mv: EMPTY_MOVE,
                score: 0,
            }; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move, score: i32) {
        self.moves[self.len] = ScoredMove { mv, score };
        self.len += 1;
    }

    #[must_use]
    #[allow(dead_code)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Partial sort: swap the best remaining move to position `start` and
    /// return it. Incremental selection avoids sorting moves that an early
    /// cutoff would never visit.
    #[inline]
    pub(crate) fn pick_best(&mut self, start: usize) -> Option<ScoredMove> {
        if start >= self.len {
            return None;
        }

        let mut best_idx = start;
        let mut best_score = self.moves[start].score;
        for i in (start + 1)..self.len {
            if self.moves[i].score > best_score {
                best_score = self.moves[i].score;
                best_idx = i;
            }
        }

        if best_idx != start {
            self.moves.swap(start, best_idx);
        }

        Some(self.moves[start])
    }
}
