//! Implements game-level Othello logic.
//!
//! For correctness, this higher-level interface is preferred, but for
//! performance you may use [`Board`](crate::Board) for raw bitboard access.

use crate::bitboard::Bitboard;
use crate::{Location, LocationList, Position};
use derive_more::{Display, Error};
use std::fmt;

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Player {
    Black,
    White,
}

impl Default for Player {
    /// Gets the starting player (black).
    fn default() -> Self {
        Self::Black
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

/// Why a [`Game`] refused an action.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum GameError {
    #[display(fmt = "{} is not a legal move", location)]
    IllegalMove { location: Location },
    #[display(fmt = "cannot pass while moves are available")]
    MovesAvailable,
    #[display(fmt = "the game is over")]
    GameOver,
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

/// The locations played so far, in order. `None` is a pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveRecord(Vec<Option<Location>>);

#[derive(Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "invalid move record entry {:?}", entry)]
pub struct ParseRecordError {
    entry: String,
}

impl MoveRecord {
    pub fn push(&mut self, entry: Option<Location>) {
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[Option<Location>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries as cell indices, with -1 standing for a pass.
    pub fn indices(&self) -> impl Iterator<Item = i8> + '_ {
        self.0
            .iter()
            .map(|entry| entry.map_or(-1, |loc| loc.to_index() as i8))
    }
}

/// Comma-separated cell indices: "19,18,-1".
impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = self
            .indices()
            .map(|index| index.to_string())
            .collect::<Vec<String>>()
            .join(",");
        f.write_str(&string)
    }
}

impl std::str::FromStr for MoveRecord {
    type Err = ParseRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }

        s.split(',')
            .map(|entry| {
                let bad_entry = || ParseRecordError {
                    entry: entry.to_string(),
                };
                let index: i64 = entry.trim().parse().map_err(|_| bad_entry())?;
                match index {
                    -1 => Ok(None),
                    n => Location::checked_from_index(n)
                        .map(Some)
                        .ok_or_else(bad_entry),
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(MoveRecord)
    }
}

/// The complete state of an Othello game: position, side to move and history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    position: Position,
    turn: Option<Player>,
    record: MoveRecord,
}

impl Default for Game {
    /// The starting position with Black to move.
    fn default() -> Self {
        Self::from_position(Position::default(), Player::default())
    }
}

impl Game {
    /// Start a game from an arbitrary position with `player` to move.
    pub fn from_position(position: Position, player: Player) -> Self {
        Self {
            position,
            turn: Some(player),
            record: MoveRecord::default(),
        }
    }

    /// Replay a record from the starting position.
    pub fn replay(record: &MoveRecord) -> Result<Self, GameError> {
        let mut game = Self::default();
        for entry in record.entries() {
            match entry {
                Some(loc) => {
                    game.play(*loc)?;
                }
                None => game.pass()?,
            }
        }
        Ok(game)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The player to move, or `None` once the game is over.
    pub fn turn(&self) -> Option<Player> {
        self.turn
    }

    pub fn record(&self) -> &MoveRecord {
        &self.record
    }

    pub fn is_finished(&self) -> bool {
        self.turn.is_none()
    }

    pub fn count(&self, player: Player) -> u8 {
        self.position.count(player)
    }

    /// Legal moves of the player to move; empty once the game is over.
    pub fn legal_moves(&self) -> LocationList {
        match self.turn {
            Some(player) => self.position.legal_moves(player),
            None => LocationList::default(),
        }
    }

    /// True when the game is live but the player to move can only pass.
    pub fn must_pass(&self) -> bool {
        !self.is_finished() && self.legal_moves().is_empty()
    }

    /// Place a piece for the player to move, returning the captured pieces.
    pub fn play(&mut self, loc: Location) -> Result<Bitboard, GameError> {
        let player = self.turn.ok_or(GameError::GameOver)?;
        let flips = self.position.try_apply_move(player, loc)?;
        self.end_turn(player, Some(loc));
        Ok(flips)
    }

    /// Pass for the player to move. Only allowed when they have no legal move.
    pub fn pass(&mut self) -> Result<(), GameError> {
        let player = self.turn.ok_or(GameError::GameOver)?;
        if !self.position.legal_moves(player).is_empty() {
            return Err(GameError::MovesAvailable);
        }
        self.end_turn(player, None);
        Ok(())
    }

    /// Hand the turn over. Two consecutive turns without a move end the game:
    /// a pass followed by an opponent who cannot move either.
    fn end_turn(&mut self, player: Player, played: Option<Location>) {
        self.record.push(played);
        let next = !player;
        self.turn = if played.is_none() && self.position.legal_moves(next).is_empty() {
            None
        } else {
            Some(next)
        };
    }

    /// The result, once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_finished() {
            return None;
        }

        let black = self.count(Player::Black);
        let white = self.count(Player::White);
        Some(if black > white {
            Outcome::Win(Player::Black)
        } else if white > black {
            Outcome::Win(Player::White)
        } else {
            Outcome::Draw
        })
    }

    /// The winning player, if the game is over and was not drawn.
    pub fn winner(&self) -> Option<Player> {
        match self.outcome() {
            Some(Outcome::Win(player)) => Some(player),
            _ => None,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.position)?;
        match self.turn {
            Some(player) => write!(f, "{} to move", player),
            None => f.write_str("Game over"),
        }
    }
}
