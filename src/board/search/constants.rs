//! Search constants.

use crate::board::types::MAX_PLY;

/// Score for delivering checkmate at the root; mate-in-N scores count down
/// from here by ply so shorter mates score higher.
pub(crate) const MATE_SCORE: i32 = 30000;

/// Scores with absolute value >= this are mate scores.
pub(crate) const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

/// Window bound wider than any reachable score.
pub(crate) const INFINITY: i32 = MATE_SCORE + 1;

/// Stalemate and rule draws.
pub(crate) const DRAW_SCORE: i32 = 0;

// Move-ordering priorities: TT move > tactical moves > quiets; within a
// band the generator's encoded score decides.

/// Hash move (from the transposition table), tried first.
pub(crate) const TT_MOVE_SCORE: i32 = 1 << 20;

/// Base offset lifting captures and promotions above every quiet move.
pub(crate) const TACTICAL_BASE: i32 = 10000;

/// Deadline polling interval in nodes.
pub(crate) const TIME_CHECK_INTERVAL: u64 = 1024;
