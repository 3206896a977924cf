use super::score_moves;
use crate::{Scores, Strategy, Version};
use othello_core::bitboard::Direction;
use othello_core::{Location, Player, Position};

/// Quiet moves: flip the discs with the fewest empty neighbours.
/// Ties go to the lowest cell index.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinOpenness;

impl Strategy for MinOpenness {
    fn name(&self) -> &str {
        "Min openness"
    }

    fn version(&self) -> Version {
        Version::new(2, 0, 1)
    }

    fn decide(&self, position: &Position, player: Player) -> Option<Location> {
        self.evaluate(position, player)?.best_by(|a, b| a < b)
    }

    /// For each legal move, the empty neighbours of every disc it flips, summed.
    /// Empties are counted before the move, so the played cell is one of them.
    fn evaluate(&self, position: &Position, player: Player) -> Option<Scores> {
        let empties = position.empty_mask();
        let board = position.board(player);

        Some(score_moves(position, player, |_, loc| {
            // A shift moves distinct discs to distinct cells, so one popcount
            // per direction counts every (disc, neighbour) pair.
            let flips = board.get_flips(loc);
            let openness: u32 = Direction::ALL
                .iter()
                .map(|direction| (direction.shift(flips) & empties).count_occupied() as u32)
                .sum();
            f64::from(openness)
        }))
    }
}
