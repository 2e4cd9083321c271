//! Iterative-deepening search.
//!
//! Each invocation deepens from depth 1 to the configured maximum, running
//! a full negamax pass per iteration. The transposition table carries the
//! principal variation between iterations, so each deeper pass starts from
//! the previous best line. A configured time budget is polled inside the
//! search; running out aborts the current iteration and the best completed
//! result stands.

mod constants;
mod move_order;
mod negamax;

use std::time::{Duration, Instant};

use negamax::SearchContext;

use super::eval::Evaluate;
use super::types::MAX_PLY;
use super::{Move, Position};
use crate::tt::TranspositionTable;

pub(crate) use constants::{MATE_SCORE, MATE_THRESHOLD};

/// Default transposition table size in MB.
pub const DEFAULT_TT_MB: usize = 16;

/// Budget for one search invocation.
#[derive(Clone, Copy, Debug)]
pub struct SearchLimits {
    /// Maximum iterative-deepening depth in plies.
    pub depth: u32,
    /// Optional wall-clock budget in milliseconds.
    pub time_ms: Option<u64>,
}

impl SearchLimits {
    /// Depth-limited search with no time budget.
    #[must_use]
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            depth,
            time_ms: None,
        }
    }

    /// Add a wall-clock budget.
    #[must_use]
    pub fn with_time_ms(mut self, time_ms: u64) -> Self {
        self.time_ms = Some(time_ms);
        self
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits::depth(5)
    }
}

/// Outcome of a search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// The selected move, `None` only when the position has no legal moves.
    pub best_move: Option<Move>,
    /// Score from the mover's perspective, in centipawns (mate scores near
    /// +/-30000).
    pub score: i32,
    /// Deepest fully completed iteration.
    pub depth: u32,
    /// Nodes visited across all iterations.
    pub nodes: u64,
    /// Principal variation recovered from the transposition table.
    pub pv: Vec<Move>,
}

/// Owns the transposition table across searches.
pub struct Searcher {
    tt: TranspositionTable,
}

impl Searcher {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        Searcher {
            tt: TranspositionTable::new(tt_mb),
        }
    }

    /// Forget cached results from previous searches.
    pub fn clear(&mut self) {
        self.tt.clear();
    }

    /// Pick a move by iterative-deepening negamax.
    pub fn search<E: Evaluate>(
        &mut self,
        pos: &mut Position,
        eval: &E,
        limits: SearchLimits,
    ) -> SearchResult {
        let start = Instant::now();
        let deadline = limits
            .time_ms
            .map(|ms| start + Duration::from_millis(ms));
        let max_depth = limits.depth.clamp(1, MAX_PLY as u32);

        let mut result = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            pv: Vec::new(),
        };

        for depth in 1..=max_depth {
            let mut ctx = SearchContext {
                pos: &mut *pos,
                eval,
                tt: &mut self.tt,
                deadline,
                nodes: 0,
                stopped: false,
            };
            let (score, best_move) = ctx.root_search(depth);
            let stopped = ctx.stopped;
            result.nodes += ctx.nodes;

            // An aborted iteration searched an arbitrary subset of the
            // root moves; its result is unusable unless nothing better
            // exists yet.
            if stopped && result.best_move.is_some() {
                break;
            }

            result.best_move = best_move;
            result.score = score;
            result.depth = depth;
            result.pv = extract_pv(pos, &self.tt, depth as usize);

            log::debug!(
                "depth {depth} score {score} nodes {} time {}ms pv {}",
                result.nodes,
                start.elapsed().as_millis(),
                format_pv(&result.pv)
            );

            if best_move.is_none() || score.abs() >= MATE_THRESHOLD || stopped {
                break;
            }
        }

        result
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Searcher::new(DEFAULT_TT_MB)
    }
}

/// One-shot convenience entry point with a fresh default-size table.
pub fn find_best_move<E: Evaluate>(
    pos: &mut Position,
    eval: &E,
    limits: SearchLimits,
) -> Option<Move> {
    Searcher::new(DEFAULT_TT_MB).search(pos, eval, limits).best_move
}

/// Recover the principal variation by walking transposition-table best
/// moves from the current position, then rolling every move back.
fn extract_pv(pos: &mut Position, tt: &TranspositionTable, max_len: usize) -> Vec<Move> {
    let mut pv = Vec::with_capacity(max_len);
    let mut seen_hashes = [0u64; MAX_PLY];

    for len in 0..max_len.min(MAX_PLY) {
        let hash = pos.hash();
        // A cycle through the table would loop forever
        if seen_hashes[..len].contains(&hash) {
            break;
        }
        seen_hashes[len] = hash;

        let Some(tt_move) = tt.probe(hash).and_then(|e| e.best_move) else {
            break;
        };
        // Only trust the cached move if it is legal here; the slot may
        // have been written by a colliding position
        let Some(mv) = pos.generate_legal().find(tt_move) else {
            break;
        };

        pos.make(mv);
        pv.push(mv);
    }

    for &mv in pv.iter().rev() {
        pos.unmake(mv);
    }

    pv
}

fn format_pv(pv: &[Move]) -> String {
    pv.iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
