//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `codec.rs` - packed-move round-trip
//! - `attacks.rs` - attack and check detection
//! - `make_unmake.rs` - make/unmake correctness
//! - `movegen.rs` - move generation rules
//! - `perft.rs` - move-count fixtures
//! - `draw.rs` - draw detection
//! - `search.rs` - search behaviour and transposition consistency
//! - `proptest.rs` - property-based tests

mod make_unmake;
mod proptest;
mod search;

use crate::board::{Move, Piece, Position, Square};

/// Locate a legal move by coordinates, panicking when absent.
pub(crate) fn find_move(
    pos: &mut Position,
    from: Square,
    to: Square,
    promotion: Option<Piece>,
) -> Move {
    for &m in pos.generate_legal().iter() {
        if m.from() == from && m.to() == to && m.promotion() == promotion {
            return m;
        }
    }
    panic!("Expected move {from}{to} not found");
}

/// Shorthand for squares in tests.
pub(crate) fn sq(notation: &str) -> Square {
    notation.parse().expect("bad test square")
}
