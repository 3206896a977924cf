use crate::SessionSnapshot;
use async_trait::async_trait;
use othello_core::Location;

/// Something a person at the board can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Play here, if it is the human's turn and the move is legal.
    Cell(Location),
    /// Let the side to move act on its own: a strategy moves or a forced pass is taken.
    Advance,
    /// Abandon this game and start a new one.
    Restart,
    Quit,
}

/// A front end for a [`GameSession`](crate::GameSession): it shows snapshots and
/// collects input.
#[async_trait]
pub trait Connector {
    /// Show the current state of the session.
    fn render(&mut self, snapshot: &SessionSnapshot);

    /// Wait for the next input. `None` means the front end has gone away.
    async fn read_input(&mut self) -> Option<Input>;
}
