//! Core chess types.
//!
//! This module contains the fundamental types used throughout the engine:
//! - `Piece` and `Color` - piece kinds and side colors
//! - `Square` - a cell on the padded 10x12 mailbox board
//! - `Move` and `MoveList` - packed move representation
//! - castling-rights bitmask constants

mod castling;
mod moves;
mod piece;
mod square;

// Public types
pub use moves::{Move, MoveFlag, MoveList};
pub use piece::{Color, Piece};
pub use square::Square;

// Internal utilities
pub(crate) use castling::{
    castle_bit, ALL_CASTLING_RIGHTS, CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K,
    CASTLE_WHITE_Q,
};
pub(crate) use moves::{ScoredMoveList, MAX_PLY};
pub(crate) use piece::{EMPTY, OFF_BOARD, PROMOTION_PIECES};
pub(crate) use square::{file_to_index, rank_to_index, BOARD_SIZE};
