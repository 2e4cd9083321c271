//! Evaluation seam.
//!
//! The search consumes evaluation through the single `Evaluate` contract.
//! A plain material counter ships as the default so the engine is usable
//! out of the box; anything smarter plugs in through the trait.

use super::{Color, Piece, Position};

/// Static evaluation contract.
///
/// Scores are centipawns from White's perspective (positive favors White);
/// the search applies the side-to-move sign. Implementations must be
/// deterministic for a fixed position and free of side effects.
pub trait Evaluate {
    fn evaluate(&self, pos: &Position) -> i32;
}

/// Material-only evaluator.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator;

impl Evaluate for MaterialEvaluator {
    fn evaluate(&self, pos: &Position) -> i32 {
        let mut score = 0;
        for color in Color::BOTH {
            let mut material = 0;
            for (_, entry) in pos.piece_lists[color.index()].occupied() {
                let piece = entry.piece();
                if piece != Piece::King {
                    material += piece.value();
                }
            }
            score += color.sign() * material;
        }
        score
    }
}

impl<E: Evaluate + ?Sized> Evaluate for &E {
    fn evaluate(&self, pos: &Position) -> i32 {
        (**self).evaluate(pos)
    }
}
