//! The [`Strategy`] contract shared by every player, and the pieces around it.

use derive_more::{Display, Error};
use othello_core::{CellArray, Location, Player, Position, NUM_SPACES};
use std::fmt;
use std::ops::Index;
use tracing::warn;

/// Release number of a strategy, plus the capabilities it opts out of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    /// Excluded from automated matches (it needs a human).
    pub no_match: bool,
    /// Never produces evaluation scores.
    pub no_eval: bool,
}

#[derive(Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "invalid version string {:?}", text)]
pub struct ParseVersionError {
    text: String,
}

impl Version {
    pub const fn new(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build,
            no_match: false,
            no_eval: false,
        }
    }

    pub const fn no_match(self) -> Self {
        Self {
            no_match: true,
            ..self
        }
    }

    pub const fn no_eval(self) -> Self {
        Self {
            no_eval: true,
            ..self
        }
    }
}

/// Renders as "2.0.1", followed by "/NoMatch" and "/NoEval" when set.
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)?;
        if self.no_match {
            f.write_str("/NoMatch")?;
        }
        if self.no_eval {
            f.write_str("/NoEval")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseVersionError {
            text: s.to_string(),
        };

        let mut parts = s.trim().split('/');
        let numbers = parts
            .next()
            .ok_or_else(error)?
            .split('.')
            .map(|n| n.parse::<u32>().map_err(|_| error()))
            .collect::<Result<Vec<u32>, _>>()?;

        let mut version = match numbers.as_slice() {
            &[major, minor, build] => Version::new(major, minor, build),
            _ => return Err(error()),
        };

        for flag in parts {
            match flag {
                "NoMatch" => version.no_match = true,
                "NoEval" => version.no_eval = true,
                _ => return Err(error()),
            }
        }
        Ok(version)
    }
}

/// One score per cell. Cells that are not candidates hold NaN ("not applicable"),
/// which is distinct from an applicable score of zero.
#[derive(Clone, Copy, Debug)]
pub struct Scores([f64; NUM_SPACES]);

impl Default for Scores {
    fn default() -> Self {
        Self([f64::NAN; NUM_SPACES])
    }
}

impl Scores {
    /// Copy scores out of a slice. `None` unless it holds exactly one score per cell.
    pub fn from_slice(scores: &[f64]) -> Option<Self> {
        if scores.len() != NUM_SPACES {
            return None;
        }
        let mut result = Self::default();
        result.0.copy_from_slice(scores);
        Some(result)
    }

    pub fn set(&mut self, loc: Location, score: f64) {
        self.0[loc.to_index() as usize] = score;
    }

    /// The score at `loc`, or `None` if that cell is not applicable.
    pub fn get(&self, loc: Location) -> Option<f64> {
        let score = self[loc];
        if score.is_nan() {
            None
        } else {
            Some(score)
        }
    }

    /// All 64 scores in cell order, NaN included.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The first applicable cell, in index order, that no later cell beats.
    /// `beats(candidate, best)` decides whether `candidate` replaces `best`.
    pub fn best_by<F: Fn(f64, f64) -> bool>(&self, beats: F) -> Option<Location> {
        let mut best: Option<(usize, f64)> = None;
        for (index, score) in self.iter().enumerate() {
            if score.is_nan() {
                continue;
            }
            match best {
                Some((_, best_score)) if !beats(score, best_score) => {}
                _ => best = Some((index, score)),
            }
        }
        best.map(|(index, _)| Location::from_index(index as u8))
    }
}

impl Index<usize> for Scores {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl Index<Location> for Scores {
    type Output = f64;

    fn index(&self, loc: Location) -> &f64 {
        &self.0[loc.to_index() as usize]
    }
}

/// A way of choosing moves.
///
/// Strategies are called from blocking worker threads, one position at a time.
/// Both methods receive a copy of the position and must not rely on shared
/// mutable state.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &str;

    fn version(&self) -> Version;

    /// The move to play for `player`, or `None` to defer (a human decides).
    /// When `player` has legal moves, a returned location must be one of them.
    fn decide(&self, position: &Position, player: Player) -> Option<Location>;

    /// Per-cell scores of `player`'s candidate moves, if this strategy has any.
    fn evaluate(&self, _position: &Position, _player: Player) -> Option<Scores> {
        None
    }
}

/// The older, cell-array contract for strategies.
pub trait ArrayStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn version(&self) -> Version;

    /// The cell index to play for `player`, or `None` to defer.
    fn decide(&self, cells: &CellArray, player: Player) -> Option<usize>;

    /// One score per cell, NaN where not applicable.
    fn evaluate(&self, _cells: &CellArray, _player: Player) -> Option<Vec<f64>> {
        None
    }
}

/// Runs an [`ArrayStrategy`] as a [`Strategy`], converting positions on the way in
/// and results on the way out.
///
/// A cell index off the board becomes no move, and a score vector that does not
/// cover the board becomes no scores. Both are logged.
#[derive(Clone, Debug, Default)]
pub struct ArrayAdapter<S>(pub S);

impl<S: ArrayStrategy> Strategy for ArrayAdapter<S> {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn version(&self) -> Version {
        self.0.version()
    }

    fn decide(&self, position: &Position, player: Player) -> Option<Location> {
        let index = self.0.decide(&position.to_array(), player)?;
        let loc = Location::checked_from_index(index as i64);
        if loc.is_none() {
            warn!(strategy = self.name(), index, "chose a cell off the board");
        }
        loc
    }

    fn evaluate(&self, position: &Position, player: Player) -> Option<Scores> {
        let scores = self.0.evaluate(&position.to_array(), player)?;
        let converted = Scores::from_slice(&scores);
        if converted.is_none() {
            warn!(
                strategy = self.name(),
                len = scores.len(),
                expected = NUM_SPACES,
                "returned scores that do not cover the board"
            );
        }
        converted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_core::{Color, Game};

    /// Plays the lowest legal cell and scores every black disc as 1.
    struct FirstCell;

    impl ArrayStrategy for FirstCell {
        fn name(&self) -> &str {
            "First cell"
        }

        fn version(&self) -> Version {
            Version::new(1, 0, 0)
        }

        fn decide(&self, cells: &CellArray, player: Player) -> Option<usize> {
            let position = othello_core::Position::from_array(cells);
            position
                .legal_moves(player)
                .next()
                .map(|loc| loc.to_index() as usize)
        }

        fn evaluate(&self, cells: &CellArray, _player: Player) -> Option<Vec<f64>> {
            Some(
                cells
                    .iter()
                    .map(|c| if c == Color::Black { 1.0 } else { f64::NAN })
                    .collect(),
            )
        }
    }

    struct OffBoard;

    impl ArrayStrategy for OffBoard {
        fn name(&self) -> &str {
            "Off board"
        }

        fn version(&self) -> Version {
            Version::new(1, 0, 0)
        }

        fn decide(&self, _cells: &CellArray, _player: Player) -> Option<usize> {
            Some(64)
        }

        fn evaluate(&self, _cells: &CellArray, _player: Player) -> Option<Vec<f64>> {
            Some(vec![0.0; 10])
        }
    }

    #[test]
    fn version_display() {
        assert_eq!(Version::new(2, 0, 1).to_string(), "2.0.1");
        assert_eq!(
            Version::new(2, 0, 0).no_match().to_string(),
            "2.0.0/NoMatch"
        );
        assert_eq!(
            Version::new(1, 2, 3).no_match().no_eval().to_string(),
            "1.2.3/NoMatch/NoEval"
        );
    }

    #[test]
    fn version_parse() {
        assert_eq!("2.0.1".parse(), Ok(Version::new(2, 0, 1)));
        assert_eq!("2.0.1/NoEval".parse(), Ok(Version::new(2, 0, 1).no_eval()));
        assert_eq!(
            "0.0.7/NoEval/NoMatch".parse(),
            Ok(Version::new(0, 0, 7).no_match().no_eval())
        );
        assert!("2.0".parse::<Version>().is_err());
        assert!("2.0.x".parse::<Version>().is_err());
        assert!("2.0.1/Fast".parse::<Version>().is_err());
    }

    #[test]
    fn scores_distinguish_zero_from_not_applicable() {
        let mut scores = Scores::default();
        let loc = Location::from_index(19);
        scores.set(loc, 0.0);
        assert_eq!(scores.get(loc), Some(0.0));
        assert_eq!(scores.get(Location::from_index(20)), None);
        assert!(scores[20].is_nan());
    }

    #[test]
    fn best_by_takes_first_in_index_order() {
        let mut scores = Scores::default();
        scores.set(Location::from_index(44), 3.0);
        scores.set(Location::from_index(19), 3.0);
        scores.set(Location::from_index(26), 1.0);
        assert_eq!(scores.best_by(|a, b| a > b), Some(Location::from_index(19)));
        assert_eq!(scores.best_by(|a, b| a < b), Some(Location::from_index(26)));
        assert_eq!(Scores::default().best_by(|a, b| a > b), None);
    }

    #[test]
    fn adapter_converts_both_ways() {
        let adapter = ArrayAdapter(FirstCell);
        let game = Game::default();
        assert_eq!(
            adapter.decide(&game.position(), Player::Black),
            Some(Location::from_index(19))
        );

        let scores = adapter.evaluate(&game.position(), Player::Black).unwrap();
        assert_eq!(scores.get(Location::from_index(28)), Some(1.0));
        assert_eq!(scores.get(Location::from_index(27)), None);
        assert_eq!(adapter.version(), Version::new(1, 0, 0));
    }

    #[test]
    fn adapter_drops_off_board_cell() {
        let adapter = ArrayAdapter(OffBoard);
        assert_eq!(adapter.decide(&Position::default(), Player::Black), None);
    }

    #[test]
    fn adapter_drops_short_scores() {
        let adapter = ArrayAdapter(OffBoard);
        assert!(adapter.evaluate(&Position::default(), Player::Black).is_none());
    }
}
