//! Negamax alpha-beta search.

use std::time::Instant;

use super::constants::{
    DRAW_SCORE, INFINITY, MATE_SCORE, MATE_THRESHOLD, TIME_CHECK_INTERVAL,
};
use super::move_order::order_moves;
use crate::board::eval::Evaluate;
use crate::board::{Move, Position};
use crate::tt::{Bound, TranspositionTable};

/// State for one search invocation.
pub(crate) struct SearchContext<'a, E: Evaluate> {
    pub(crate) pos: &'a mut Position,
    pub(crate) eval: &'a E,
    pub(crate) tt: &'a mut TranspositionTable,
    pub(crate) deadline: Option<Instant>,
    pub(crate) nodes: u64,
    pub(crate) stopped: bool,
}

/// Mate scores are stored relative to the storing node so a cached mate
/// distance stays correct when probed at a different ply.
fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

impl<E: Evaluate> SearchContext<'_, E> {
    fn past_deadline(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if self.nodes % TIME_CHECK_INTERVAL == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.stopped = true;
                }
            }
        }
        self.stopped
    }

    /// Search the root: like `negamax` but reports the best move alongside
    /// the score. With no legal moves the result carries `None` and the
    /// mate/stalemate score.
    pub(crate) fn root_search(&mut self, depth: u32) -> (i32, Option<Move>) {
        let mover = self.pos.side_to_move();
        let tt_move = self.tt.probe(self.pos.hash()).and_then(|e| e.best_move);

        let pseudo = self.pos.generate_pseudo_legal();
        let mut ordered = order_moves(&pseudo, tt_move);

        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best_move: Option<Move> = None;
        let mut legal_moves = 0;

        let mut idx = 0;
        while let Some(scored) = ordered.pick_best(idx) {
            idx += 1;
            let mv = scored.mv;

            self.pos.make(mv);
            if self.pos.is_in_check(mover) {
                self.pos.unmake(mv);
                continue;
            }
            legal_moves += 1;

            let score = -self.negamax(depth - 1, 1, -beta, -alpha);
            self.pos.unmake(mv);

            if self.stopped {
                return (alpha, best_move);
            }

            if score > alpha || best_move.is_none() {
                alpha = score;
                best_move = Some(mv);
            }
        }

        if legal_moves == 0 {
            let score = if self.pos.is_in_check(mover) {
                -MATE_SCORE
            } else {
                DRAW_SCORE
            };
            return (score, None);
        }

        self.tt
            .store(self.pos.hash(), depth, score_to_tt(alpha, 0), Bound::Exact, best_move);
        (alpha, best_move)
    }

    /// Negamax with alpha-beta pruning and transposition caching.
    ///
    /// Pseudo-legal moves that leave the mover's own king attacked are
    /// skipped before recursion; they never contribute to the score.
    fn negamax(&mut self, depth: u32, ply: usize, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        if self.past_deadline() {
            return 0;
        }

        if self.pos.is_draw() {
            return DRAW_SCORE;
        }

        let hash = self.pos.hash();
        let mut tt_move: Option<Move> = None;
        if let Some(entry) = self.tt.probe(hash) {
            tt_move = entry.best_move;
            if u32::from(entry.depth) >= depth {
                let score = score_from_tt(i32::from(entry.score), ply);
                match entry.bound {
                    Bound::Exact => return score,
                    Bound::Lower if score >= beta => return score,
                    Bound::Upper if score <= alpha => return score,
                    _ => {}
                }
            }
        }

        if depth == 0 {
            let sign = self.pos.side_to_move().sign();
            return sign * self.eval.evaluate(self.pos);
        }

        let mover = self.pos.side_to_move();
        let pseudo = self.pos.generate_pseudo_legal();
        let mut ordered = order_moves(&pseudo, tt_move);

        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut best_move: Option<Move> = None;
        let mut legal_moves = 0;

        let mut idx = 0;
        while let Some(scored) = ordered.pick_best(idx) {
            idx += 1;
            let mv = scored.mv;

            self.pos.make(mv);
            if self.pos.is_in_check(mover) {
                self.pos.unmake(mv);
                continue;
            }
            legal_moves += 1;

            let score = -self.negamax(depth - 1, ply + 1, -beta, -alpha);
            self.pos.unmake(mv);

            if self.stopped {
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if best_score > alpha {
                alpha = best_score;
            }
            if alpha >= beta {
                break;
            }
        }

        if legal_moves == 0 {
            // Depth-adjusted decisive score for mate, zero for stalemate
            return if self.pos.is_in_check(mover) {
                -(MATE_SCORE - ply as i32)
            } else {
                DRAW_SCORE
            };
        }

        let bound = if best_score <= original_alpha {
            Bound::Upper
        } else if best_score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt
            .store(hash, depth, score_to_tt(best_score, ply), bound, best_move);

        best_score
    }
}
