//! Search behaviour: mate scores, draw scores, and transposition-table
//! consistency against a plain non-caching negamax.

use crate::board::eval::{Evaluate, MaterialEvaluator};
use crate::board::search::{MATE_SCORE, MATE_THRESHOLD};
use crate::board::{Position, SearchLimits, Searcher};

use super::sq;

#[test]
fn test_finds_back_rank_mate_in_one() {
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
    let mut searcher = Searcher::new(1);
    let result = searcher.search(&mut pos, &MaterialEvaluator, SearchLimits::depth(4));

    let best = result.best_move.unwrap();
    assert_eq!(best.from(), sq("e1"));
    assert_eq!(best.to(), sq("e8"));
    assert_eq!(result.score, MATE_SCORE - 1);
}

#[test]
fn test_finds_scholars_mate() {
    let mut pos = Position::from_fen(
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4",
    );
    let mut searcher = Searcher::new(1);
    let result = searcher.search(&mut pos, &MaterialEvaluator, SearchLimits::depth(3));

    let best = result.best_move.unwrap();
    assert_eq!(best.from(), sq("h5"));
    assert_eq!(best.to(), sq("f7"));
    assert!(result.score >= MATE_THRESHOLD);
}

#[test]
fn test_takes_hanging_queen() {
    let mut pos = Position::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    let mut searcher = Searcher::new(1);
    let result = searcher.search(&mut pos, &MaterialEvaluator, SearchLimits::depth(2));

    let best = result.best_move.unwrap();
    assert_eq!(best.from(), sq("e4"));
    assert_eq!(best.to(), sq("d5"));
    assert!(result.score >= 800);
}

#[test]
fn test_checkmated_root_reports_mate() {
    let mut pos = Position::from_fen(
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    );
    let mut searcher = Searcher::new(1);
    let result = searcher.search(&mut pos, &MaterialEvaluator, SearchLimits::depth(3));

    assert!(result.best_move.is_none());
    assert_eq!(result.score, -MATE_SCORE);
}

#[test]
fn test_stalemate_root_reports_draw() {
    let mut pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    let mut searcher = Searcher::new(1);
    let result = searcher.search(&mut pos, &MaterialEvaluator, SearchLimits::depth(3));

    assert!(result.best_move.is_none());
    assert_eq!(result.score, 0);
    assert!(result.pv.is_empty());
}

#[test]
fn test_drawn_position_scores_zero() {
    let mut pos = Position::from_fen("8/8/8/4k3/8/8/8/3BK3 w - - 0 1");
    let mut searcher = Searcher::new(1);
    let result = searcher.search(&mut pos, &MaterialEvaluator, SearchLimits::depth(4));
    assert_eq!(result.score, 0);
}

#[test]
fn test_search_leaves_position_untouched() {
    let mut pos = Position::from_fen(
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    );
    let before = pos.clone();
    let mut searcher = Searcher::new(1);
    searcher.search(&mut pos, &MaterialEvaluator, SearchLimits::depth(4));

    assert_eq!(pos, before);
    pos.check_synchronized().unwrap();
}

#[test]
fn test_repeat_search_is_stable() {
    // A warm table must reproduce the cold result, not distort it
    let mut pos = Position::from_fen(
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w KQkq - 4 4",
    );
    let mut searcher = Searcher::new(1);
    let cold = searcher.search(&mut pos, &MaterialEvaluator, SearchLimits::depth(3));
    let warm = searcher.search(&mut pos, &MaterialEvaluator, SearchLimits::depth(3));

    assert_eq!(warm.score, cold.score);
    assert!(warm.best_move.unwrap().same_move(cold.best_move.unwrap()));
    assert!(warm.nodes <= cold.nodes, "warm table should not search more");
}

#[test]
fn test_pv_starts_with_best_move_and_is_legal() {
    let mut pos = Position::startpos();
    let mut searcher = Searcher::new(1);
    let result = searcher.search(&mut pos, &MaterialEvaluator, SearchLimits::depth(4));

    let best = result.best_move.unwrap();
    assert!(result.pv[0].same_move(best));

    // Replaying the line must be legal throughout
    let mut replay = pos.clone();
    for &mv in &result.pv {
        assert!(replay.generate_legal().find(mv).is_some());
        replay.make(mv);
    }
}

/// Plain full-width negamax with no caching and no pruning, used as the
/// ground truth the cached search must agree with.
fn plain_negamax(pos: &mut Position, eval: &MaterialEvaluator, depth: u32, ply: i32) -> i32 {
    if pos.is_draw() {
        return 0;
    }
    if depth == 0 {
        return pos.side_to_move().sign() * eval.evaluate(pos);
    }

    let mover = pos.side_to_move();
    let mut best: Option<i32> = None;
    for &mv in pos.generate_pseudo_legal().iter() {
        pos.make(mv);
        if pos.is_in_check(mover) {
            pos.unmake(mv);
            continue;
        }
        let score = -plain_negamax(pos, eval, depth - 1, ply + 1);
        pos.unmake(mv);
        best = Some(best.map_or(score, |b| b.max(score)));
    }

    match best {
        Some(score) => score,
        None if pos.is_in_check(mover) => -(MATE_SCORE - ply),
        None => 0,
    }
}

#[test]
fn test_cached_search_matches_plain_negamax() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 4 4",
        "8/5pk1/6p1/8/8/6P1/5PK1/8 w - - 0 1",
        "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1",
    ];

    for fen in fens {
        let mut pos = Position::from_fen(fen);
        let expected = plain_negamax(&mut pos, &MaterialEvaluator, 3, 0);

        let mut searcher = Searcher::new(1);
        let result = searcher.search(&mut pos, &MaterialEvaluator, SearchLimits::depth(3));
        assert_eq!(result.score, expected, "cached search diverged for {fen}");
    }
}

#[test]
fn test_depth_clamps_to_at_least_one() {
    let mut pos = Position::startpos();
    let mut searcher = Searcher::new(1);
    let result = searcher.search(&mut pos, &MaterialEvaluator, SearchLimits::depth(0));
    assert!(result.best_move.is_some());
    assert_eq!(result.depth, 1);
}

#[test]
fn test_time_limited_search_returns_a_move() {
    let mut pos = Position::startpos();
    let mut searcher = Searcher::new(1);
    let limits = SearchLimits::depth(64).with_time_ms(50);
    let result = searcher.search(&mut pos, &MaterialEvaluator, limits);
    assert!(result.best_move.is_some());
}
