//! Position state: padded board array, piece lists, and history stacks.

use super::error::FenError;
use super::types::{BOARD_SIZE, EMPTY, OFF_BOARD};
use super::{Color, Move, Piece, Square, ALL_CASTLING_RIGHTS};
use crate::zobrist::ZOBRIST;

/// Slots per piece list; slot 15 always holds the king.
pub(crate) const PIECE_LIST_SIZE: usize = 16;
pub(crate) const KING_SLOT: usize = 15;

/// One piece-list slot: `(kind << 8) | square`, zero when vacant.
///
/// Kind 0 is not a valid piece and square 0 is a border cell, so the zero
/// encoding can never collide with a live entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct ListEntry(u16);

impl ListEntry {
    pub(crate) const VACANT: ListEntry = ListEntry(0);

    #[inline]
    pub(crate) fn encode(piece: Piece, sq: Square) -> Self {
        ListEntry(((piece.kind() as u16) << 8) | sq.0 as u16)
    }

    #[inline]
    pub(crate) fn is_vacant(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub(crate) fn piece(self) -> Piece {
        Piece::from_kind((self.0 >> 8) as u8).expect("corrupt piece-list entry")
    }

    #[inline]
    pub(crate) fn square(self) -> Square {
        Square::from_raw((self.0 & 0xFF) as u8)
    }
}

/// A side's fixed-capacity list of occupied-square encodings.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct PieceList {
    pub(crate) slots: [ListEntry; PIECE_LIST_SIZE],
}

impl PieceList {
    fn empty() -> Self {
        PieceList {
            slots: [ListEntry::VACANT; PIECE_LIST_SIZE],
        }
    }

    /// Iterate occupied slots as (slot index, entry).
    pub(crate) fn occupied(&self) -> impl Iterator<Item = (usize, ListEntry)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_vacant())
            .map(|(i, e)| (i, *e))
    }

    /// Number of occupied slots.
    #[allow(dead_code)]
    pub(crate) fn count(&self) -> usize {
        self.slots.iter().filter(|e| !e.is_vacant()).count()
    }
}

/// Irreversible aspects of a position, snapshotted before every move.
///
/// These fields cannot be derived from the move alone during unmake.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HistorySnapshot {
    pub(crate) en_passant: Option<Square>,
    pub(crate) castling_rights: u8,
    pub(crate) halfmove_clock: u32,
    pub(crate) hash: u64,
}

/// Captured-piece record, pushed only when a move captures.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CaptureEntry {
    pub(crate) piece: Piece,
    pub(crate) slot: usize,
}

/// A mutable chess position.
///
/// One `Position` serves the entire search: child nodes are the same object
/// advanced by `make` and rolled back by `unmake`, never separate copies.
/// The board array and the two piece lists describe the same placement and
/// are kept synchronized by the centralized mutation helpers in
/// `make_unmake.rs`.
#[derive(Clone, Debug)]
pub struct Position {
    pub(crate) board: [i8; BOARD_SIZE],
    pub(crate) white_to_move: bool,
    pub(crate) castling_rights: u8,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) piece_lists: [PieceList; 2],
    pub(crate) hash: u64,
    // History stacks, one entry per applied ply (strict LIFO)
    pub(crate) played: Vec<Move>,
    pub(crate) irreversible: Vec<HistorySnapshot>,
    pub(crate) captures: Vec<CaptureEntry>,
}

impl Position {
    /// An empty position: border cells set, playable region clear, no pieces.
    pub(crate) fn empty() -> Self {
        let mut board = [OFF_BOARD; BOARD_SIZE];
        for idx in 0..BOARD_SIZE {
            if Square::raw_is_playable(idx as u8) {
                board[idx] = EMPTY;
            }
        }
        Position {
            board,
            white_to_move: true,
            castling_rights: 0,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            piece_lists: [PieceList::empty(), PieceList::empty()],
            hash: 0,
            played: Vec::new(),
            irreversible: Vec::new(),
            captures: Vec::new(),
        }
    }

    /// The standard starting position.
    #[must_use]
    pub fn startpos() -> Self {
        let mut pos = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            pos.place_for_setup(Color::White, *piece, Square::from_coords(0, file))
                .expect("startpos placement");
            pos.place_for_setup(Color::Black, *piece, Square::from_coords(7, file))
                .expect("startpos placement");
            pos.place_for_setup(Color::White, Piece::Pawn, Square::from_coords(1, file))
                .expect("startpos placement");
            pos.place_for_setup(Color::Black, Piece::Pawn, Square::from_coords(6, file))
                .expect("startpos placement");
        }

        pos.castling_rights = ALL_CASTLING_RIGHTS;
        pos.white_to_move = true;
        pos.hash = pos.calculate_hash();
        pos
    }

    /// Place a piece during construction (startpos or FEN parsing).
    ///
    /// The king goes to slot 15; everything else takes the first vacant
    /// slot below it. Fails when the side is over capacity or already has
    /// a king.
    pub(crate) fn place_for_setup(
        &mut self,
        color: Color,
        piece: Piece,
        sq: Square,
    ) -> Result<(), FenError> {
        let color_name = match color {
            Color::White => "White",
            Color::Black => "Black",
        };
        let list = &mut self.piece_lists[color.index()];
        let slot = if piece == Piece::King {
            if !list.slots[KING_SLOT].is_vacant() {
                return Err(FenError::BadKingCount {
                    color: color_name,
                    found: 2,
                });
            }
            KING_SLOT
        } else {
            match list.slots[..KING_SLOT].iter().position(|e| e.is_vacant()) {
                Some(slot) => slot,
                None => {
                    return Err(FenError::TooManyPieces {
                        color: color_name,
                        found: PIECE_LIST_SIZE + 1,
                    })
                }
            }
        };

        list.slots[slot] = ListEntry::encode(piece, sq);
        self.board[sq.as_index()] = piece.code(color);
        Ok(())
    }

    /// Current Zobrist hash, maintained incrementally by make/unmake.
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    /// The side to move.
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Number of plies currently applied (depth of the history stacks).
    #[must_use]
    pub fn ply(&self) -> usize {
        self.played.len()
    }

    /// The most recently played move, if any ply is applied.
    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.played.last().copied()
    }

    /// Color and piece on a square, or `None` when empty.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        Piece::from_code(self.board[sq.as_index()])
    }

    #[inline]
    pub(crate) fn is_empty_square(&self, sq: Square) -> bool {
        self.board[sq.as_index()] == EMPTY
    }

    /// The king square for a side, read from the fixed king slot.
    pub(crate) fn king_square(&self, color: Color) -> Square {
        let entry = self.piece_lists[color.index()].slots[KING_SLOT];
        assert!(
            !entry.is_vacant() && entry.piece() == Piece::King,
            "piece list for {color} has no king in slot {KING_SLOT}: {:?}",
            entry
        );
        entry.square()
    }

    /// Locate the piece-list slot holding `sq`, scanning linearly.
    ///
    /// Fallback for captures, where the victim's slot is not carried in the
    /// move; the mover's own slot always is.
    pub(crate) fn find_slot(&self, color: Color, sq: Square) -> Option<usize> {
        self.piece_lists[color.index()]
            .occupied()
            .find(|(_, e)| e.square() == sq)
            .map(|(slot, _)| slot)
    }

    /// Recompute the Zobrist hash from scratch.
    ///
    /// Used at construction and as the correctness baseline the
    /// incrementally-maintained hash is property-tested against.
    #[must_use]
    pub(crate) fn calculate_hash(&self) -> u64 {
        let mut hash: u64 = 0;

        for color in Color::BOTH {
            for (_, entry) in self.piece_lists[color.index()].occupied() {
                hash ^= ZOBRIST.piece(entry.piece(), color, entry.square());
            }
        }

        if !self.white_to_move {
            hash ^= ZOBRIST.black_to_move_key;
        }
        hash ^= ZOBRIST.castling(self.castling_rights);
        hash ^= ZOBRIST.en_passant(self.en_passant);

        hash
    }

    /// True when the position is drawn by rule: 50-move clock expired or
    /// insufficient mating material. Threefold repetition is not tracked.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.halfmove_clock >= 100 || self.is_insufficient_material()
    }

    /// Insufficient-material detection: K vs K, K+minor vs K, and bishops
    /// all on one square color. Opposite-colored bishops can still mate in
    /// theory and are not flagged.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut bishop_squares: Vec<Square> = Vec::new();
        let mut knights = 0;

        for color in Color::BOTH {
            for (_, entry) in self.piece_lists[color.index()].occupied() {
                match entry.piece() {
                    Piece::Pawn | Piece::Rook | Piece::Queen => return false,
                    Piece::Knight => {
                        minors += 1;
                        knights += 1;
                    }
                    Piece::Bishop => {
                        minors += 1;
                        bishop_squares.push(entry.square());
                    }
                    Piece::King => {}
                }
            }
        }

        if minors <= 1 {
            return true;
        }

        if knights == 0 && bishop_squares.len() == 2 {
            return bishop_squares[0].is_light() == bishop_squares[1].is_light();
        }

        false
    }

    /// Verify that board array and piece lists describe the same placement.
    ///
    /// Returns a description of the first mismatch found. Routine mutations
    /// validate themselves slot-by-slot; this whole-position sweep backs the
    /// round-trip tests.
    pub(crate) fn check_synchronized(&self) -> Result<(), String> {
        let mut listed = 0;
        for color in Color::BOTH {
            for (slot, entry) in self.piece_lists[color.index()].occupied() {
                listed += 1;
                let sq = entry.square();
                let expected = entry.piece().code(color);
                let actual = self.board[sq.as_index()];
                if actual != expected {
                    return Err(format!(
                        "slot {slot} of {color} list says {:?} on {sq}, board holds code {actual}",
                        entry.piece()
                    ));
                }
            }
        }

        let occupied = (0..BOARD_SIZE)
            .filter(|&idx| self.board[idx] != EMPTY && self.board[idx] != OFF_BOARD)
            .count();
        if occupied != listed {
            return Err(format!(
                "board has {occupied} occupied squares but piece lists hold {listed} entries"
            ));
        }

        let depth = self.played.len();
        if self.irreversible.len() != depth {
            return Err(format!(
                "irreversible stack depth {} != played depth {depth}",
                self.irreversible.len()
            ));
        }

        Ok(())
    }
}

impl PartialEq for Position {
    /// Observable-state equality: placement, side to move, castling rights,
    /// en passant, clocks, and hash. History stacks are bookkeeping and are
    /// deliberately excluded.
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.white_to_move == other.white_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
            && self.piece_lists == other.piece_lists
            && self.hash == other.hash
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}
