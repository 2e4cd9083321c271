//! Reversible state transitions.
//!
//! Every mutation that touches a piece goes through the `shift_piece` /
//! `lift_piece` / `drop_piece` helpers, which update the board array, the
//! owning piece list, and the Zobrist hash together and validate the slot
//! against its expected prior encoding. A mismatch means the board and the
//! piece lists have desynchronized, which is a defect in move generation or
//! the codec, never a recoverable condition.

use super::state::{CaptureEntry, HistorySnapshot, ListEntry, KING_SLOT};
use super::types::EMPTY;
use super::{castle_bit, Color, Move, MoveFlag, Piece, Position, Square};
use crate::zobrist::ZOBRIST;

impl Position {
    #[cold]
    #[inline(never)]
    fn defect(&self, mv: Move, msg: &str) -> ! {
        panic!(
            "position desynchronized: {msg} (move {mv}, position {})",
            self.to_fen()
        );
    }

    /// Move the piece held by `slot` from `from` to `to`.
    fn shift_piece(&mut self, color: Color, slot: usize, piece: Piece, from: Square, to: Square, mv: Move) {
        let expected = ListEntry::encode(piece, from);
        let actual = self.piece_lists[color.index()].slots[slot];
        if actual != expected {
            self.defect(
                mv,
                &format!("slot {slot} holds {actual:?}, expected {expected:?}"),
            );
        }
        if self.board[from.as_index()] != piece.code(color) {
            self.defect(mv, &format!("board square {from} does not hold {piece:?}"));
        }
        if self.board[to.as_index()] != EMPTY {
            self.defect(mv, &format!("destination square {to} is not empty"));
        }

        self.board[from.as_index()] = EMPTY;
        self.board[to.as_index()] = piece.code(color);
        self.piece_lists[color.index()].slots[slot] = ListEntry::encode(piece, to);
        self.hash ^= ZOBRIST.piece(piece, color, from) ^ ZOBRIST.piece(piece, color, to);
    }

    /// Remove the piece held by `slot` from the board, vacating the slot.
    fn lift_piece(&mut self, color: Color, slot: usize, piece: Piece, sq: Square, mv: Move) {
        let expected = ListEntry::encode(piece, sq);
        let actual = self.piece_lists[color.index()].slots[slot];
        if actual != expected {
            self.defect(
                mv,
                &format!("slot {slot} holds {actual:?}, expected {expected:?}"),
            );
        }

        self.board[sq.as_index()] = EMPTY;
        self.piece_lists[color.index()].slots[slot] = ListEntry::VACANT;
        self.hash ^= ZOBRIST.piece(piece, color, sq);
    }

    /// Place a piece into a vacant `slot` on an empty square.
    fn drop_piece(&mut self, color: Color, slot: usize, piece: Piece, sq: Square, mv: Move) {
        let current = self.piece_lists[color.index()].slots[slot];
        if !current.is_vacant() {
            self.defect(mv, &format!("slot {slot} is occupied: {current:?}"));
        }
        if self.board[sq.as_index()] != EMPTY {
            self.defect(mv, &format!("square {sq} is not empty"));
        }

        self.board[sq.as_index()] = piece.code(color);
        self.piece_lists[color.index()].slots[slot] = ListEntry::encode(piece, sq);
        self.hash ^= ZOBRIST.piece(piece, color, sq);
    }

    /// Rook's from/to squares for a castle described by the king's move.
    fn castle_rook_squares(color: Color, king_to: Square) -> (Square, Square) {
        let rank = color.back_rank();
        if king_to.file() == 6 {
            (Square::from_coords(rank, 7), Square::from_coords(rank, 5))
        } else {
            (Square::from_coords(rank, 0), Square::from_coords(rank, 3))
        }
    }

    /// Apply a move produced by the generator for the side to move.
    ///
    /// Pushes one entry onto the played-move and irreversible-state stacks
    /// (plus the capture stack when a piece is taken); the matching
    /// `unmake` pops them. The Zobrist hash is maintained incrementally.
    pub fn make(&mut self, mv: Move) {
        let mover = self.side_to_move();
        let opponent = mover.opponent();
        let from = mv.from();
        let to = mv.to();
        let slot = mv.slot();

        self.played.push(mv);
        self.irreversible.push(HistorySnapshot {
            en_passant: self.en_passant,
            castling_rights: self.castling_rights,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        });

        let piece = match self.piece_at(from) {
            Some((color, piece)) if color == mover => piece,
            other => self.defect(mv, &format!("from-square {from} holds {other:?}")),
        };

        self.hash ^= ZOBRIST.black_to_move_key;
        self.hash ^= ZOBRIST.en_passant(self.en_passant);
        let old_rights = self.castling_rights;

        let mut captured: Option<(Piece, Square)> = None;

        match mv.flag() {
            MoveFlag::Quiet => {
                self.shift_piece(mover, slot, piece, from, to, mv);
                self.en_passant = None;
                if piece == Piece::Pawn {
                    self.halfmove_clock = 0;
                } else {
                    self.halfmove_clock += 1;
                }
            }
            MoveFlag::DoublePawnPush => {
                self.shift_piece(mover, slot, piece, from, to, mv);
                // The square passed over becomes the en-passant target
                let step = mover.pawn_step();
                self.en_passant = Some(Square::from_raw((from.0 as i8 + step) as u8));
                self.halfmove_clock = 0;
            }
            MoveFlag::Capture => {
                let (victim, victim_slot) = self.locate_victim(opponent, to, mv);
                self.captures.push(CaptureEntry {
                    piece: victim,
                    slot: victim_slot,
                });
                self.lift_piece(opponent, victim_slot, victim, to, mv);
                self.shift_piece(mover, slot, piece, from, to, mv);
                captured = Some((victim, to));
                self.en_passant = None;
                self.halfmove_clock = 0;
            }
            MoveFlag::EnPassant => {
                // The victim pawn sits one rank behind the destination
                let victim_sq = Square::from_raw((to.0 as i8 - mover.pawn_step()) as u8);
                let (victim, victim_slot) = self.locate_victim(opponent, victim_sq, mv);
                if victim != Piece::Pawn {
                    self.defect(mv, &format!("en passant victim on {victim_sq} is {victim:?}"));
                }
                self.captures.push(CaptureEntry {
                    piece: victim,
                    slot: victim_slot,
                });
                self.lift_piece(opponent, victim_slot, victim, victim_sq, mv);
                self.shift_piece(mover, slot, piece, from, to, mv);
                self.en_passant = None;
                self.halfmove_clock = 0;
            }
            MoveFlag::Promotion => {
                let promoted = mv.promotion().unwrap_or(Piece::Queen);
                self.lift_piece(mover, slot, Piece::Pawn, from, mv);
                self.drop_piece(mover, slot, promoted, to, mv);
                self.en_passant = None;
                self.halfmove_clock = 0;
            }
            MoveFlag::PromotionCapture => {
                let promoted = mv.promotion().unwrap_or(Piece::Queen);
                let (victim, victim_slot) = self.locate_victim(opponent, to, mv);
                self.captures.push(CaptureEntry {
                    piece: victim,
                    slot: victim_slot,
                });
                self.lift_piece(opponent, victim_slot, victim, to, mv);
                self.lift_piece(mover, slot, Piece::Pawn, from, mv);
                self.drop_piece(mover, slot, promoted, to, mv);
                captured = Some((victim, to));
                self.en_passant = None;
                self.halfmove_clock = 0;
            }
            MoveFlag::Castle => {
                if slot != KING_SLOT {
                    self.defect(mv, &format!("castle move carries slot {slot}"));
                }
                self.shift_piece(mover, slot, Piece::King, from, to, mv);
                let (rook_from, rook_to) = Self::castle_rook_squares(mover, to);
                let rook_slot = match self.find_slot(mover, rook_from) {
                    Some(s) => s,
                    None => self.defect(mv, &format!("no rook on {rook_from} to castle with")),
                };
                self.shift_piece(mover, rook_slot, Piece::Rook, rook_from, rook_to, mv);
                self.en_passant = None;
                self.halfmove_clock += 1;
            }
        }

        // Castling-rights bookkeeping: a king move (castling included)
        // revokes both of the mover's rights, a rook move from its home
        // square revokes that side, and capturing a rook on its home square
        // revokes the victim's side.
        if piece == Piece::King {
            self.castling_rights &= !(castle_bit(mover, true) | castle_bit(mover, false));
        } else if piece == Piece::Rook {
            let rank = mover.back_rank();
            if from == Square::from_coords(rank, 0) {
                self.castling_rights &= !castle_bit(mover, false);
            } else if from == Square::from_coords(rank, 7) {
                self.castling_rights &= !castle_bit(mover, true);
            }
        }
        if let Some((Piece::Rook, victim_sq)) = captured {
            let rank = opponent.back_rank();
            if victim_sq == Square::from_coords(rank, 0) {
                self.castling_rights &= !castle_bit(opponent, false);
            } else if victim_sq == Square::from_coords(rank, 7) {
                self.castling_rights &= !castle_bit(opponent, true);
            }
        }

        self.hash ^= ZOBRIST.castling(old_rights) ^ ZOBRIST.castling(self.castling_rights);
        self.hash ^= ZOBRIST.en_passant(self.en_passant);

        if mover == Color::Black {
            self.fullmove_number += 1;
        }
        self.white_to_move = !self.white_to_move;
    }

    /// Exactly reverse the most recent `make`.
    ///
    /// The caller must pass the same move; the stacks enforce LIFO order.
    pub fn unmake(&mut self, mv: Move) {
        match self.played.pop() {
            Some(last) if last.same_move(mv) => {}
            other => self.defect(mv, &format!("unmake out of order, last played {other:?}")),
        }

        // The move was made by the opponent of the current side
        self.white_to_move = !self.white_to_move;
        let mover = self.side_to_move();
        let opponent = mover.opponent();
        if mover == Color::Black {
            self.fullmove_number -= 1;
        }

        let from = mv.from();
        let to = mv.to();
        let slot = mv.slot();

        match mv.flag() {
            MoveFlag::Quiet | MoveFlag::DoublePawnPush => {
                let piece = self.expect_piece(mover, to, mv);
                self.shift_piece(mover, slot, piece, to, from, mv);
            }
            MoveFlag::Capture => {
                let piece = self.expect_piece(mover, to, mv);
                self.shift_piece(mover, slot, piece, to, from, mv);
                let entry = self.pop_capture(mv);
                self.drop_piece(opponent, entry.slot, entry.piece, to, mv);
            }
            MoveFlag::EnPassant => {
                self.shift_piece(mover, slot, Piece::Pawn, to, from, mv);
                let victim_sq = Square::from_raw((to.0 as i8 - mover.pawn_step()) as u8);
                let entry = self.pop_capture(mv);
                self.drop_piece(opponent, entry.slot, entry.piece, victim_sq, mv);
            }
            MoveFlag::Promotion => {
                let promoted = mv.promotion().unwrap_or(Piece::Queen);
                self.lift_piece(mover, slot, promoted, to, mv);
                self.drop_piece(mover, slot, Piece::Pawn, from, mv);
            }
            MoveFlag::PromotionCapture => {
                let promoted = mv.promotion().unwrap_or(Piece::Queen);
                self.lift_piece(mover, slot, promoted, to, mv);
                self.drop_piece(mover, slot, Piece::Pawn, from, mv);
                let entry = self.pop_capture(mv);
                self.drop_piece(opponent, entry.slot, entry.piece, to, mv);
            }
            MoveFlag::Castle => {
                let (rook_from, rook_to) = Self::castle_rook_squares(mover, to);
                let rook_slot = match self.find_slot(mover, rook_to) {
                    Some(s) => s,
                    None => self.defect(mv, &format!("no rook on {rook_to} to uncastle")),
                };
                self.shift_piece(mover, rook_slot, Piece::Rook, rook_to, rook_from, mv);
                self.shift_piece(mover, slot, Piece::King, to, from, mv);
            }
        }

        let snapshot = match self.irreversible.pop() {
            Some(s) => s,
            None => self.defect(mv, "irreversible stack empty on unmake"),
        };
        self.en_passant = snapshot.en_passant;
        self.castling_rights = snapshot.castling_rights;
        self.halfmove_clock = snapshot.halfmove_clock;
        // Piece-key XORs from the reversal cancel pairwise; restoring the
        // snapshot hash also reverts the side/castling/en-passant keys.
        self.hash = snapshot.hash;
    }

    /// Captured piece and list slot for the victim on `sq`.
    fn locate_victim(&self, owner: Color, sq: Square, mv: Move) -> (Piece, usize) {
        let victim = match self.piece_at(sq) {
            Some((color, piece)) if color == owner => piece,
            other => self.defect(mv, &format!("capture square {sq} holds {other:?}")),
        };
        if victim == Piece::King {
            self.defect(mv, "attempted capture of the king");
        }
        match self.find_slot(owner, sq) {
            Some(slot) => (victim, slot),
            None => self.defect(mv, &format!("no {owner} list slot for victim on {sq}")),
        }
    }

    fn expect_piece(&self, owner: Color, sq: Square, mv: Move) -> Piece {
        match self.piece_at(sq) {
            Some((color, piece)) if color == owner => piece,
            other => self.defect(mv, &format!("square {sq} holds {other:?}")),
        }
    }

    fn pop_capture(&mut self, mv: Move) -> CaptureEntry {
        match self.captures.pop() {
            Some(entry) => entry,
            None => self.defect(mv, "capture stack empty on unmake"),
        }
    }
}
