use super::score_moves;
use crate::{Scores, Strategy, Version};
use othello_core::{Location, Player, Position};

/// Greedy: the move leaving the mover with the most discs.
/// Ties go to the lowest cell index.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxCapture;

impl Strategy for MaxCapture {
    fn name(&self) -> &str {
        "Max capture"
    }

    fn version(&self) -> Version {
        Version::new(2, 0, 1)
    }

    fn decide(&self, position: &Position, player: Player) -> Option<Location> {
        self.evaluate(position, player)?.best_by(|a, b| a > b)
    }

    /// The mover's disc count after each legal move.
    fn evaluate(&self, position: &Position, player: Player) -> Option<Scores> {
        Some(score_moves(position, player, |position, loc| {
            let mut after = *position;
            after.apply_move(player, loc);
            f64::from(after.count(player))
        }))
    }
}
