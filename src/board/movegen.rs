//! Pseudo-legal and legal move generation.
//!
//! Generation walks the side-to-move's piece list and steps fixed offsets
//! on the padded board; the sentinel border makes bounds checks
//! unnecessary. "Pseudo-legal" moves respect piece movement rules but may
//! still leave the mover's own king attacked; legality is established by
//! trial application in `generate_legal` (and lazily by the search).

use super::state::KING_SLOT;
use super::types::{EMPTY, OFF_BOARD};
use super::{castle_bit, Color, Move, MoveFlag, MoveList, Piece, Position, Square, PROMOTION_PIECES};

const KNIGHT_OFFSETS: [i8; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];
const BISHOP_OFFSETS: [i8; 4] = [-11, -9, 9, 11];
const ROOK_OFFSETS: [i8; 4] = [-10, -1, 1, 10];
const KING_OFFSETS: [i8; 8] = [-11, -10, -9, -1, 1, 9, 10, 11];

// Ordering-score bands baked into generated moves (8 bits).
// Captures are ranked most-valuable-victim first, least-valuable-attacker
// as tiebreak; promotions outrank plain captures.
const CAPTURE_BASE: u8 = 100;
const EN_PASSANT_SCORE: u8 = 105;
const PROMOTION_BASE: u8 = 200;
const PROMOTION_CAPTURE_BASE: u8 = 220;

#[inline]
fn capture_score(victim: Piece, attacker: Piece) -> u8 {
    CAPTURE_BASE + (victim.index() as u8) * 10 + (5 - attacker.index() as u8)
}

impl Position {
    /// All pseudo-legal moves for the side to move.
    #[must_use]
    pub fn generate_pseudo_legal(&self) -> MoveList {
        let mover = self.side_to_move();
        let mut moves = MoveList::new();

        for (slot, entry) in self.piece_lists[mover.index()].occupied() {
            let from = entry.square();
            match entry.piece() {
                Piece::Pawn => self.gen_pawn_moves(mover, slot, from, &mut moves),
                Piece::Knight => {
                    self.gen_step_moves(mover, slot, Piece::Knight, from, &KNIGHT_OFFSETS, &mut moves)
                }
                Piece::Bishop => {
                    self.gen_slide_moves(mover, slot, Piece::Bishop, from, &BISHOP_OFFSETS, &mut moves)
                }
                Piece::Rook => {
                    self.gen_slide_moves(mover, slot, Piece::Rook, from, &ROOK_OFFSETS, &mut moves)
                }
                Piece::Queen => {
                    self.gen_slide_moves(mover, slot, Piece::Queen, from, &KING_OFFSETS, &mut moves)
                }
                Piece::King => {
                    self.gen_step_moves(mover, slot, Piece::King, from, &KING_OFFSETS, &mut moves)
                }
            }
        }

        self.gen_castles(mover, &mut moves);
        moves
    }

    /// All legal moves for the side to move, established by trial
    /// application: make, test the mover's king, unmake.
    #[must_use]
    pub fn generate_legal(&mut self) -> MoveList {
        let mover = self.side_to_move();
        let pseudo = self.generate_pseudo_legal();
        let mut legal = MoveList::new();

        for &mv in pseudo.iter() {
            self.make(mv);
            if !self.is_in_check(mover) {
                legal.push(mv);
            }
            self.unmake(mv);
        }
        legal
    }

    /// True when the side to move is checkmated.
    #[must_use]
    pub fn is_checkmate(&mut self) -> bool {
        self.is_in_check(self.side_to_move()) && self.generate_legal().is_empty()
    }

    /// True when the side to move is stalemated.
    #[must_use]
    pub fn is_stalemate(&mut self) -> bool {
        !self.is_in_check(self.side_to_move()) && self.generate_legal().is_empty()
    }

    /// Single-step pieces: knight and king take exactly one step per
    /// direction.
    fn gen_step_moves(
        &self,
        mover: Color,
        slot: usize,
        piece: Piece,
        from: Square,
        offsets: &[i8],
        moves: &mut MoveList,
    ) {
        for &d in offsets {
            let idx = (from.0 as i8 + d) as u8;
            match self.board[idx as usize] {
                OFF_BOARD => {}
                EMPTY => moves.push(Move::pack(
                    from,
                    Square::from_raw(idx),
                    Piece::Knight,
                    MoveFlag::Quiet,
                    slot,
                    0,
                )),
                code => {
                    if let Some((color, victim)) = Piece::from_code(code) {
                        // The enemy king is never a capture target
                        if color != mover && victim != Piece::King {
                            moves.push(Move::pack(
                                from,
                                Square::from_raw(idx),
                                Piece::Knight,
                                MoveFlag::Capture,
                                slot,
                                capture_score(victim, piece),
                            ));
                        }
                    }
                }
            }
        }
    }

    /// Sliding pieces: continue along each ray until the border, a friendly
    /// piece (stop), or an enemy piece (capture, stop).
    fn gen_slide_moves(
        &self,
        mover: Color,
        slot: usize,
        piece: Piece,
        from: Square,
        directions: &[i8],
        moves: &mut MoveList,
    ) {
        for &d in directions {
            let mut idx = (from.0 as i8 + d) as u8;
            loop {
                match self.board[idx as usize] {
                    OFF_BOARD => break,
                    EMPTY => {
                        moves.push(Move::pack(
                            from,
                            Square::from_raw(idx),
                            Piece::Knight,
                            MoveFlag::Quiet,
                            slot,
                            0,
                        ));
                        idx = (idx as i8 + d) as u8;
                    }
                    code => {
                        if let Some((color, victim)) = Piece::from_code(code) {
                            if color != mover && victim != Piece::King {
                                moves.push(Move::pack(
                                    from,
                                    Square::from_raw(idx),
                                    Piece::Knight,
                                    MoveFlag::Capture,
                                    slot,
                                    capture_score(victim, piece),
                                ));
                            }
                        }
                        break;
                    }
                }
            }
        }
    }

    fn gen_pawn_moves(&self, mover: Color, slot: usize, from: Square, moves: &mut MoveList) {
        let step = mover.pawn_step();
        let promotion_rank = mover.pawn_promotion_rank();

        // Forward pushes
        let one = (from.0 as i8 + step) as u8;
        if self.board[one as usize] == EMPTY {
            let to = Square::from_raw(one);
            if to.rank() == promotion_rank {
                for promo in PROMOTION_PIECES {
                    moves.push(Move::pack(
                        from,
                        to,
                        promo,
                        MoveFlag::Promotion,
                        slot,
                        PROMOTION_BASE + promo.index() as u8,
                    ));
                }
            } else {
                moves.push(Move::pack(from, to, Piece::Knight, MoveFlag::Quiet, slot, 0));
                if from.rank() == mover.pawn_start_rank() {
                    let two = (one as i8 + step) as u8;
                    if self.board[two as usize] == EMPTY {
                        moves.push(Move::pack(
                            from,
                            Square::from_raw(two),
                            Piece::Knight,
                            MoveFlag::DoublePawnPush,
                            slot,
                            0,
                        ));
                    }
                }
            }
        }

        // Diagonal captures, including onto the en-passant target
        for d in [step - 1, step + 1] {
            let idx = (from.0 as i8 + d) as u8;
            let cell = self.board[idx as usize];
            if cell == OFF_BOARD {
                continue;
            }
            let to = Square::from_raw(idx);

            if self.en_passant == Some(to) {
                moves.push(Move::pack(
                    from,
                    to,
                    Piece::Knight,
                    MoveFlag::EnPassant,
                    slot,
                    EN_PASSANT_SCORE,
                ));
                continue;
            }

            if let Some((color, victim)) = Piece::from_code(cell) {
                if color == mover || victim == Piece::King {
                    continue;
                }
                if to.rank() == promotion_rank {
                    for promo in PROMOTION_PIECES {
                        moves.push(Move::pack(
                            from,
                            to,
                            promo,
                            MoveFlag::PromotionCapture,
                            slot,
                            PROMOTION_CAPTURE_BASE + promo.index() as u8,
                        ));
                    }
                } else {
                    moves.push(Move::pack(
                        from,
                        to,
                        Piece::Knight,
                        MoveFlag::Capture,
                        slot,
                        capture_score(victim, Piece::Pawn),
                    ));
                }
            }
        }
    }

    /// Castling: the right must survive, the path must be empty, the rook
    /// must still be home, and neither the king's square nor the square it
    /// crosses may be attacked. The destination square is vetted by the
    /// legality filter like any other king move.
    fn gen_castles(&self, mover: Color, moves: &mut MoveList) {
        let opponent = mover.opponent();
        let rank = mover.back_rank();
        let king_home = Square::from_coords(rank, 4);

        if self.piece_at(king_home) != Some((mover, Piece::King)) {
            return;
        }

        if self.castling_rights & castle_bit(mover, true) != 0 {
            let f = Square::from_coords(rank, 5);
            let g = Square::from_coords(rank, 6);
            let rook_home = Square::from_coords(rank, 7);
            if self.is_empty_square(f)
                && self.is_empty_square(g)
                && self.piece_at(rook_home) == Some((mover, Piece::Rook))
                && !self.is_square_attacked(king_home, opponent)
                && !self.is_square_attacked(f, opponent)
            {
                moves.push(Move::pack(
                    king_home,
                    g,
                    Piece::Knight,
                    MoveFlag::Castle,
                    KING_SLOT,
                    0,
                ));
            }
        }

        if self.castling_rights & castle_bit(mover, false) != 0 {
            let d = Square::from_coords(rank, 3);
            let c = Square::from_coords(rank, 2);
            let b = Square::from_coords(rank, 1);
            let rook_home = Square::from_coords(rank, 0);
            if self.is_empty_square(d)
                && self.is_empty_square(c)
                && self.is_empty_square(b)
                && self.piece_at(rook_home) == Some((mover, Piece::Rook))
                && !self.is_square_attacked(king_home, opponent)
                && !self.is_square_attacked(d, opponent)
            {
                moves.push(Move::pack(
                    king_home,
                    c,
                    Piece::Knight,
                    MoveFlag::Castle,
                    KING_SLOT,
                    0,
                ));
            }
        }
    }
}
