//! Property-based tests using proptest.

use crate::board::Position;
use proptest::prelude::*;

/// Strategy to generate a random playout length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=30usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

proptest! {
    /// Property: make followed by unmake restores the position exactly
    #[test]
    fn prop_make_unmake_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        use rand::prelude::*;

        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);

        let initial = pos.clone();
        let initial_fen = pos.to_fen();
        let mut played = Vec::new();

        for _ in 0..num_moves {
            let moves = pos.generate_legal();
            if moves.is_empty() {
                break;
            }
            let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
            pos.make(mv);
            played.push(mv);
        }

        while let Some(mv) = played.pop() {
            pos.unmake(mv);
        }

        prop_assert_eq!(pos.to_fen(), initial_fen);
        prop_assert_eq!(pos, initial);
    }

    /// Property: the incremental hash always matches a full recompute
    #[test]
    fn prop_hash_consistency(seed in seed_strategy(), num_moves in move_count_strategy()) {
        use rand::prelude::*;

        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = pos.generate_legal();
            if moves.is_empty() {
                break;
            }
            let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
            pos.make(mv);

            prop_assert_eq!(pos.hash(), pos.calculate_hash());
        }
    }

    /// Property: board array and piece lists never drift apart
    #[test]
    fn prop_board_and_lists_stay_synchronized(seed in seed_strategy(), num_moves in move_count_strategy()) {
        use rand::prelude::*;

        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut played = Vec::new();

        for _ in 0..num_moves {
            let moves = pos.generate_legal();
            if moves.is_empty() {
                break;
            }
            let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
            pos.make(mv);
            played.push(mv);
            prop_assert!(pos.check_synchronized().is_ok());
        }

        while let Some(mv) = played.pop() {
            pos.unmake(mv);
            prop_assert!(pos.check_synchronized().is_ok());
        }
    }

    /// Property: FEN round-trip preserves the position
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        use rand::prelude::*;

        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = pos.generate_legal();
            if moves.is_empty() {
                break;
            }
            let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
            pos.make(mv);
        }

        let fen = pos.to_fen();
        let restored = Position::from_fen(&fen);

        prop_assert_eq!(restored.hash(), pos.hash());
        prop_assert_eq!(restored.white_to_move(), pos.white_to_move());
        prop_assert_eq!(restored.en_passant_target(), pos.en_passant_target());
        prop_assert_eq!(restored.to_fen(), fen);
    }

    /// Property: every generated legal move leaves the mover's king safe
    #[test]
    fn prop_legal_moves_never_leave_king_attacked(seed in seed_strategy(), num_moves in move_count_strategy()) {
        use rand::prelude::*;

        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let mover = pos.side_to_move();
            let moves = pos.generate_legal();
            if moves.is_empty() {
                break;
            }

            for &mv in moves.iter() {
                pos.make(mv);
                prop_assert!(!pos.is_in_check(mover), "move {} left the king attacked", mv);
                pos.unmake(mv);
            }

            let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
            pos.make(mv);
        }
    }

    /// Property: generated moves report slots consistent with the lists
    #[test]
    fn prop_move_slots_match_piece_lists(seed in seed_strategy(), num_moves in move_count_strategy()) {
        use rand::prelude::*;

        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let mover = pos.side_to_move();
            let moves = pos.generate_legal();
            if moves.is_empty() {
                break;
            }

            for &mv in moves.iter() {
                prop_assert_eq!(pos.find_slot(mover, mv.from()), Some(mv.slot()));
            }

            let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
            pos.make(mv);
        }
    }
}
