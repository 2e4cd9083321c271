//! Move ordering for the alpha-beta search.

use super::constants::{TACTICAL_BASE, TT_MOVE_SCORE};
use crate::board::types::ScoredMoveList;
use crate::board::{Move, MoveList};

/// Score pseudo-legal moves for ordering: the transposition-table (or
/// principal-variation) move first, then captures and promotions, then
/// quiets, each band ranked by the ordering score encoded in the move.
pub(crate) fn order_moves(moves: &MoveList, tt_move: Option<Move>) -> ScoredMoveList {
    let mut scored = ScoredMoveList::new();
    for &mv in moves.iter() {
        let score = if tt_move.is_some_and(|tm| tm.same_move(mv)) {
            TT_MOVE_SCORE
        } else if mv.is_tactical() {
            TACTICAL_BASE + i32::from(mv.score())
        } else {
            i32::from(mv.score())
        };
        scored.push(mv, score);
    }
    scored
}
