//! FEN construction and printing, and coordinate-notation move parsing.
//!
//! This is the input-error boundary: everything malformed is rejected here
//! with a typed error before the core ever sees it. Beyond syntax, parsing
//! enforces the structural invariants the core relies on: exactly one king
//! per side, at most sixteen pieces per side, no pawns on back ranks.

use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::state::KING_SLOT;
use super::{
    file_to_index, rank_to_index, Color, Move, Piece, Position, Square, CASTLE_BLACK_K,
    CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q,
};

impl Position {
    /// Parse a position from FEN notation.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut pos = Position::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        // Piece placement, rank 8 first
        for (rank_idx, rank_str) in parts[0].split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(FenError::InvalidRank { rank: rank_idx });
            }
            let rank = 7 - rank_idx;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let color = if c.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            files: file + 1,
                        });
                    }
                    let sq = Square::from_coords(rank, file);
                    if piece == Piece::Pawn && (rank == 0 || rank == 7) {
                        return Err(FenError::PawnOnBackRank {
                            square: sq.to_string(),
                        });
                    }
                    pos.place_for_setup(color, piece, sq)?;
                    file += 1;
                }
            }
        }

        for color in Color::BOTH {
            if pos.piece_lists[color.index()].slots[KING_SLOT].is_vacant() {
                return Err(FenError::BadKingCount {
                    color: match color {
                        Color::White => "White",
                        Color::Black => "Black",
                    },
                    found: 0,
                });
            }
        }

        match parts[1] {
            "w" => pos.white_to_move = true,
            "b" => pos.white_to_move = false,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        }

        for c in parts[2].chars() {
            match c {
                'K' => pos.castling_rights |= CASTLE_WHITE_K,
                'Q' => pos.castling_rights |= CASTLE_WHITE_Q,
                'k' => pos.castling_rights |= CASTLE_BLACK_K,
                'q' => pos.castling_rights |= CASTLE_BLACK_Q,
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }

        pos.en_passant = if parts[3] == "-" {
            None
        } else {
            let chars: Vec<char> = parts[3].chars().collect();
            if chars.len() == 2
                && ('a'..='h').contains(&chars[0])
                && ('1'..='8').contains(&chars[1])
            {
                Some(Square::from_coords(
                    rank_to_index(chars[1]),
                    file_to_index(chars[0]),
                ))
            } else {
                return Err(FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                });
            }
        };

        if parts.len() >= 5 {
            pos.halfmove_clock = parts[4].parse().unwrap_or(0);
        }
        if parts.len() >= 6 {
            pos.fullmove_number = parts[5].parse().unwrap_or(1);
        }

        pos.hash = pos.calculate_hash();
        Ok(pos)
    }

    /// Parse a position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible
    /// parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Render the position in FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::from_coords(rank, file);
                match self.piece_at(sq) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let mut castling = String::new();
        if self.castling_rights & CASTLE_WHITE_K != 0 {
            castling.push('K');
        }
        if self.castling_rights & CASTLE_WHITE_Q != 0 {
            castling.push('Q');
        }
        if self.castling_rights & CASTLE_BLACK_K != 0 {
            castling.push('k');
        }
        if self.castling_rights & CASTLE_BLACK_Q != 0 {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = match self.en_passant {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            if self.white_to_move { "w" } else { "b" },
            castling,
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a coordinate-notation move (`e2e4`, `e7e8q`) against the legal
    /// move list of this position.
    pub fn parse_move(&mut self, notation: &str) -> Result<Move, MoveParseError> {
        let len = notation.len();
        if !(4..=5).contains(&len) {
            return Err(MoveParseError::InvalidLength { len });
        }

        let from = Square::from_str(&notation[0..2]).map_err(|_| {
            MoveParseError::InvalidSquare {
                notation: notation.to_string(),
            }
        })?;
        let to = Square::from_str(&notation[2..4]).map_err(|_| {
            MoveParseError::InvalidSquare {
                notation: notation.to_string(),
            }
        })?;

        let promotion = if len == 5 {
            let c = notation.chars().nth(4).unwrap_or('?');
            match Piece::from_char(c) {
                Some(p @ (Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen)) => Some(p),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            }
        } else {
            None
        };

        self.generate_legal()
            .iter()
            .copied()
            .find(|m| m.from() == from && m.to() == to && m.promotion() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: notation.to_string(),
            })
    }
}
