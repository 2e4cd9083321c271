//! Chess position representation and game logic.
//!
//! Uses a padded 10x12 mailbox board with per-side piece lists: offset
//! stepping never needs bounds checks, and move generation iterates the
//! compact lists instead of scanning the board. Supports full chess rules
//! including castling, en passant, and promotions, with reversible
//! make/unmake transitions driving the search.
//!
//! # Example
//! ```
//! use mailbox_chess::board::Position;
//!
//! let mut pos = Position::startpos();
//! let moves = pos.generate_legal();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod attacks;
mod error;
pub mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod search;
mod state;
pub(crate) mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use error::{FenError, MoveParseError, SquareError};
pub use eval::{Evaluate, MaterialEvaluator};
pub use state::Position;
pub use types::{Color, Move, MoveFlag, MoveList, Piece, Square};

// Public API - search entry points
pub use search::{find_best_move, SearchLimits, SearchResult, Searcher, DEFAULT_TT_MB};

pub(crate) use types::{
    castle_bit, file_to_index, rank_to_index, ALL_CASTLING_RIGHTS, CASTLE_BLACK_K, CASTLE_BLACK_Q,
    CASTLE_WHITE_K, CASTLE_WHITE_Q, PROMOTION_PIECES,
};
