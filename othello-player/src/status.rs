//! What a front end needs to show: per-side status, counts and per-cell views.

use othello_core::{Color, Game, MoveRecord, Outcome, Player};

/// The state of one side of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Not this side's turn.
    Empty,
    Win,
    Lose,
    Draw,
    /// A human has to pick a cell.
    WaitingForManualInput,
    /// A strategy will move on the next submission.
    Ready,
    Computing,
    /// No legal move; the next submission records a pass.
    Passed,
}

impl Default for Status {
    fn default() -> Self {
        Self::Empty
    }
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Empty => "",
            Status::Win => "Win",
            Status::Lose => "Lose",
            Status::Draw => "Draw",
            Status::WaitingForManualInput => "Your move",
            Status::Ready => "Next",
            Status::Computing => "Computing...",
            Status::Passed => "Pass",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Win | Status::Lose | Status::Draw)
    }
}

/// Status of both sides, disc counts and the moves so far.
///
/// While a game is live exactly one side is not [`Status::Empty`]: the side to move.
/// Once it is over, both sides are terminal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameStatus {
    pub black: Status,
    pub white: Status,
    pub black_count: u8,
    pub white_count: u8,
    pub record: MoveRecord,
}

impl GameStatus {
    /// Status for `game`, where `mover` is the status of the side to move, if any.
    pub fn new(game: &Game, mover: Status) -> Self {
        let mut status = Self {
            black_count: game.count(Player::Black),
            white_count: game.count(Player::White),
            record: game.record().clone(),
            ..Self::default()
        };

        match (game.turn(), game.outcome()) {
            (Some(player), _) => status.set(player, mover),
            (None, Some(Outcome::Win(winner))) => {
                status.set(winner, Status::Win);
                status.set(!winner, Status::Lose);
            }
            (None, _) => {
                status.black = Status::Draw;
                status.white = Status::Draw;
            }
        }
        status
    }

    pub fn of(&self, player: Player) -> Status {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    fn set(&mut self, player: Player, status: Status) {
        match player {
            Player::Black => self.black = status,
            Player::White => self.white = status,
        }
    }
}

/// The six text fields of a status bar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusFields {
    /// "Black: Next", "White: Computing..." or "Black: Win / White: Lose".
    pub status_line: String,
    /// Comma-separated cell indices, -1 for a pass.
    pub record: String,
    pub black_count: String,
    pub black_name: String,
    pub white_count: String,
    pub white_name: String,
}

impl StatusFields {
    pub fn new(status: &GameStatus, black_name: &str, white_name: &str) -> Self {
        let black = status.black.label();
        let white = status.white.label();
        let status_line = match (black.is_empty(), white.is_empty()) {
            (true, _) => format!("White: {}", white),
            (_, true) => format!("Black: {}", black),
            _ => format!("Black: {} / White: {}", black, white),
        };

        Self {
            status_line,
            record: status.record.to_string(),
            black_count: format!("Black: {}", status.black_count),
            black_name: black_name.to_string(),
            white_count: format!("White: {}", status.white_count),
            white_name: white_name.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Highlight {
    Normal,
    /// Among the three best-scored cells.
    Top,
}

impl Default for Highlight {
    fn default() -> Self {
        Self::Normal
    }
}

/// Evaluation output for one cell. `text` is empty when the cell has no score.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Annotation {
    pub highlight: Highlight,
    pub text: String,
}

/// One cell as a front end draws it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub color: Color,
    /// The side to move may play here.
    pub legal: bool,
    pub annotation: Annotation,
}

/// Everything needed to draw the session at one instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// 64 cells in row-major order.
    pub cells: Vec<CellView>,
    pub fields: StatusFields,
    pub status: GameStatus,
    pub turn: Option<Player>,
}
