use crate::{Strategy, Version};
use othello_core::{Location, Player, Position};
use rand::seq::IteratorRandom;

/// Plays a uniformly random legal move.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomMove;

impl Strategy for RandomMove {
    fn name(&self) -> &str {
        "Random"
    }

    fn version(&self) -> Version {
        Version::new(2, 0, 1).no_eval()
    }

    fn decide(&self, position: &Position, player: Player) -> Option<Location> {
        position
            .legal_moves(player)
            .choose(&mut rand::thread_rng())
    }
}
