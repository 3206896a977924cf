//! The built-in strategies.

mod manual;
mod max_capture;
mod min_openness;
mod random;

pub use manual::Manual;
pub use max_capture::MaxCapture;
pub use min_openness::MinOpenness;
pub use random::RandomMove;

use crate::Scores;
use othello_core::{Location, Player, Position};

/// Score every legal move of `player` with `score(position, move)`.
fn score_moves<F>(position: &Position, player: Player, score: F) -> Scores
where
    F: Fn(&Position, Location) -> f64,
{
    let mut scores = Scores::default();
    for loc in position.legal_moves(player) {
        scores.set(loc, score(position, loc));
    }
    scores
}
