use crate::{Strategy, Version};
use othello_core::{Location, Player, Position};

/// A human at the board: never decides anything on its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manual;

impl Strategy for Manual {
    fn name(&self) -> &str {
        "Manual"
    }

    fn version(&self) -> Version {
        Version::new(2, 0, 0).no_match()
    }

    fn decide(&self, _position: &Position, _player: Player) -> Option<Location> {
        None
    }
}
