pub mod board;
pub mod tt;
pub(crate) mod zobrist;

pub use board::{
    find_best_move, Color, Evaluate, MaterialEvaluator, Move, Piece, Position, SearchLimits,
    SearchResult, Searcher, Square,
};
pub use tt::TranspositionTable;
