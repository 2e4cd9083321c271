//! Make/unmake round-trips and state bookkeeping.

use crate::board::{Color, Piece, Position};

use super::{find_move, sq};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn roundtrip(fen: &str, from: &str, to: &str, promotion: Option<Piece>) {
    let mut pos = Position::from_fen(fen);
    let before = pos.clone();
    let hash_before = pos.hash();

    let mv = find_move(&mut pos, sq(from), sq(to), promotion);
    pos.make(mv);
    pos.check_synchronized().unwrap();
    assert_eq!(pos.hash(), pos.calculate_hash(), "incremental hash diverged");

    pos.unmake(mv);
    pos.check_synchronized().unwrap();
    assert_eq!(pos, before);
    assert_eq!(pos.hash(), hash_before);
    assert_eq!(pos.to_fen(), fen);
}

#[test]
fn test_quiet_move_round_trip() {
    roundtrip(START_FEN, "g1", "f3", None);
}

#[test]
fn test_double_pawn_push_round_trip() {
    roundtrip(START_FEN, "e2", "e4", None);
}

#[test]
fn test_capture_round_trip() {
    roundtrip(
        "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
        "e4",
        "d5",
        None,
    );
}

#[test]
fn test_en_passant_round_trip() {
    roundtrip(
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "e5",
        "f6",
        None,
    );
}

#[test]
fn test_en_passant_removes_bypassing_pawn() {
    let mut pos =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let mv = find_move(&mut pos, sq("e5"), sq("f6"), None);
    assert!(mv.is_en_passant());

    pos.make(mv);
    assert_eq!(pos.piece_at(sq("f6")), Some((Color::White, Piece::Pawn)));
    assert_eq!(pos.piece_at(sq("f5")), None, "bypassed pawn must be removed");
    assert_eq!(pos.piece_at(sq("e5")), None);

    pos.unmake(mv);
    assert_eq!(pos.piece_at(sq("f5")), Some((Color::Black, Piece::Pawn)));
    assert_eq!(pos.piece_at(sq("e5")), Some((Color::White, Piece::Pawn)));
}

#[test]
fn test_promotion_round_trip_all_pieces() {
    let fen = "8/P3k3/8/8/8/8/8/K7 w - - 0 1";
    for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
        roundtrip(fen, "a7", "a8", Some(piece));
    }
}

#[test]
fn test_promotion_replaces_pawn_in_list() {
    let mut pos = Position::from_fen("8/P3k3/8/8/8/8/8/K7 w - - 0 1");
    let mv = find_move(&mut pos, sq("a7"), sq("a8"), Some(Piece::Queen));
    pos.make(mv);

    assert_eq!(pos.piece_at(sq("a8")), Some((Color::White, Piece::Queen)));
    assert_eq!(pos.piece_at(sq("a7")), None);
    pos.check_synchronized().unwrap();
}

#[test]
fn test_promotion_capture_round_trip() {
    roundtrip("1n2k3/P7/8/8/8/8/8/K7 w - - 0 1", "a7", "b8", Some(Piece::Queen));
}

#[test]
fn test_castle_round_trip_both_sides() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    roundtrip(fen, "e1", "g1", None);
    roundtrip(fen, "e1", "c1", None);

    let black = "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1";
    roundtrip(black, "e8", "g8", None);
    roundtrip(black, "e8", "c8", None);
}

#[test]
fn test_castle_moves_rook() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mv = find_move(&mut pos, sq("e1"), sq("g1"), None);
    assert!(mv.is_castle());
    pos.make(mv);

    assert_eq!(pos.piece_at(sq("g1")), Some((Color::White, Piece::King)));
    assert_eq!(pos.piece_at(sq("f1")), Some((Color::White, Piece::Rook)));
    assert_eq!(pos.piece_at(sq("h1")), None);
    assert_eq!(pos.piece_at(sq("e1")), None);
    pos.check_synchronized().unwrap();
}

#[test]
fn test_king_move_revokes_both_rights() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mv = find_move(&mut pos, sq("e1"), sq("e2"), None);
    pos.make(mv);
    assert_eq!(pos.to_fen(), "r3k2r/8/8/8/8/8/4K3/R6R b kq - 1 1");

    pos.unmake(mv);
    assert_eq!(pos.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
}

#[test]
fn test_rook_capture_revokes_victims_right() {
    // Rxh8 loses White's h-rook right (rook left h1) and Black's (rook gone)
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mv = find_move(&mut pos, sq("h1"), sq("h8"), None);
    pos.make(mv);
    assert_eq!(pos.to_fen(), "r3k2R/8/8/8/8/8/8/R3K3 b Qq - 0 1");

    pos.unmake(mv);
    assert_eq!(pos.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
}

#[test]
fn test_en_passant_target_lives_one_ply() {
    let mut pos = Position::startpos();
    let e4 = find_move(&mut pos, sq("e2"), sq("e4"), None);
    pos.make(e4);
    assert_eq!(pos.en_passant_target(), Some(sq("e3")));

    let nf6 = find_move(&mut pos, sq("g8"), sq("f6"), None);
    pos.make(nf6);
    assert_eq!(pos.en_passant_target(), None);

    pos.unmake(nf6);
    assert_eq!(pos.en_passant_target(), Some(sq("e3")));
    pos.unmake(e4);
    assert_eq!(pos.en_passant_target(), None);
}

#[test]
fn test_clock_bookkeeping() {
    let mut pos = Position::startpos();
    assert_eq!(pos.halfmove_clock(), 0);
    assert_eq!(pos.fullmove_number(), 1);

    let nf3 = find_move(&mut pos, sq("g1"), sq("f3"), None);
    pos.make(nf3);
    assert_eq!(pos.halfmove_clock(), 1);
    assert_eq!(pos.fullmove_number(), 1);

    let nf6 = find_move(&mut pos, sq("g8"), sq("f6"), None);
    pos.make(nf6);
    assert_eq!(pos.halfmove_clock(), 2);
    assert_eq!(pos.fullmove_number(), 2);

    // A pawn push resets the clock
    let e4 = find_move(&mut pos, sq("e2"), sq("e4"), None);
    pos.make(e4);
    assert_eq!(pos.halfmove_clock(), 0);

    pos.unmake(e4);
    pos.unmake(nf6);
    pos.unmake(nf3);
    assert_eq!(pos, Position::startpos());
}

#[test]
fn test_ply_tracks_history_depth() {
    let mut pos = Position::startpos();
    assert_eq!(pos.ply(), 0);
    assert_eq!(pos.last_move(), None);

    let e4 = find_move(&mut pos, sq("e2"), sq("e4"), None);
    pos.make(e4);
    assert_eq!(pos.ply(), 1);
    assert_eq!(pos.last_move(), Some(e4));

    let e5 = find_move(&mut pos, sq("e7"), sq("e5"), None);
    pos.make(e5);
    assert_eq!(pos.ply(), 2);

    pos.unmake(e5);
    pos.unmake(e4);
    assert_eq!(pos.ply(), 0);
}

#[test]
fn test_deep_sequence_round_trip() {
    let mut pos = Position::startpos();
    let before = pos.clone();
    let line = ["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6"];

    let mut made = Vec::new();
    for lan in line {
        let mv = pos.parse_move(lan).unwrap();
        pos.make(mv);
        pos.check_synchronized().unwrap();
        assert_eq!(pos.hash(), pos.calculate_hash());
        made.push(mv);
    }

    for mv in made.into_iter().rev() {
        pos.unmake(mv);
    }
    assert_eq!(pos, before);
}
