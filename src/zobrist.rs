//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes for the
//! transposition table. Keys are indexed by the compact 0-63 square index,
//! not the padded 120-cell index, so border cells never need keys.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Color, Piece, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[piece_kind][color][square64]
    pub(crate) piece_keys: [[[u64; 64]; 2]; 6],
    pub(crate) black_to_move_key: u64,
    // castling_keys[color][side]: 0 = kingside, 1 = queenside
    pub(crate) castling_keys: [[u64; 2]; 2],
    // en_passant_keys[file]: only the file of the target matters
    pub(crate) en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        // Fixed seed keeps hashes reproducible across runs
        let mut rng = StdRng::seed_from_u64(0x5EED_CAB1E_u64);
        let mut piece_keys = [[[0; 64]; 2]; 6];
        let mut castling_keys = [[0; 2]; 2];
        let mut en_passant_keys = [0; 8];

        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        for color in &mut castling_keys {
            for key in color.iter_mut() {
                *key = rng.gen();
            }
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }

    /// Key for a piece of a given color on a given square.
    #[inline]
    pub(crate) fn piece(&self, piece: Piece, color: Color, sq: Square) -> u64 {
        self.piece_keys[piece.index()][color.index()][sq.as_index64()]
    }

    /// Combined key for a castling-rights bitmask.
    pub(crate) fn castling(&self, rights: u8) -> u64 {
        use crate::board::{CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q};

        let mut hash = 0;
        if rights & CASTLE_WHITE_K != 0 {
            hash ^= self.castling_keys[0][0];
        }
        if rights & CASTLE_WHITE_Q != 0 {
            hash ^= self.castling_keys[0][1];
        }
        if rights & CASTLE_BLACK_K != 0 {
            hash ^= self.castling_keys[1][0];
        }
        if rights & CASTLE_BLACK_Q != 0 {
            hash ^= self.castling_keys[1][1];
        }
        hash
    }

    /// Key for an en-passant target square, if any.
    #[inline]
    pub(crate) fn en_passant(&self, target: Option<Square>) -> u64 {
        match target {
            Some(sq) => self.en_passant_keys[sq.file()],
            None => 0,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
