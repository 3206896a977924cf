//! Strategy-versus-strategy matches, without a session in between.

use crate::Strategy;
use derive_more::Error;
use othello_core::{Location, Player, Position};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// A strategy that had legal moves returned no move or an illegal one.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub struct ContractViolation {
    pub strategy: String,
    pub player: Player,
    pub proposed: Option<Location>,
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.proposed {
            Some(loc) => write!(
                f,
                "{} playing {} proposed {}, which is not a legal move",
                self.strategy, self.player, loc
            ),
            None => write!(
                f,
                "{} playing {} proposed no move while moves were available",
                self.strategy, self.player
            ),
        }
    }
}

/// Results of a match, from the first strategy's point of view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchStatistics {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub elapsed: Duration,
}

impl MatchStatistics {
    pub fn total(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

/// "wins/draws/losses @ N ms"
impl fmt::Display for MatchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} @ {} ms",
            self.wins,
            self.draws,
            self.losses,
            self.elapsed.as_millis()
        )
    }
}

/// Play out `position` with `black` and `white` alternating, Black first.
/// Returns Black's discs minus White's.
pub fn playout(
    black: &dyn Strategy,
    white: &dyn Strategy,
    mut position: Position,
) -> Result<i8, ContractViolation> {
    loop {
        let black_moved = take_turn(black, &mut position, Player::Black)?;
        let white_moved = take_turn(white, &mut position, Player::White)?;
        if !black_moved && !white_moved {
            break;
        }
    }
    Ok(position.board(Player::Black).score_absolute_difference())
}

/// Let `strategy` move for `player` if it can. Returns whether a move was made.
fn take_turn(
    strategy: &dyn Strategy,
    position: &mut Position,
    player: Player,
) -> Result<bool, ContractViolation> {
    let legal = position.legal_moves(player);
    if legal.is_empty() {
        return Ok(false);
    }

    match strategy.decide(position, player) {
        Some(loc) if legal.contains(loc) => {
            position.apply_move(player, loc);
            Ok(true)
        }
        proposed => {
            let violation = ContractViolation {
                strategy: strategy.name().to_string(),
                player,
                proposed,
            };
            warn!(%violation, "aborting playout");
            Err(violation)
        }
    }
}

/// Play `count` games from the standard start, `first` as Black.
/// Stops early, with partial counts, once `cancel` is set.
pub fn run_statistics(
    first: &dyn Strategy,
    second: &dyn Strategy,
    count: u32,
    cancel: &AtomicBool,
) -> Result<MatchStatistics, ContractViolation> {
    run_statistics_with_progress(first, second, count, cancel, |_| {})
}

/// [`run_statistics`], calling `progress` with the number of finished games after each one.
pub fn run_statistics_with_progress<F: FnMut(u32)>(
    first: &dyn Strategy,
    second: &dyn Strategy,
    count: u32,
    cancel: &AtomicBool,
    mut progress: F,
) -> Result<MatchStatistics, ContractViolation> {
    let start = Instant::now();
    let mut statistics = MatchStatistics::default();

    for played in 1..=count {
        if cancel.load(Ordering::Relaxed) {
            info!(played = played - 1, "match cancelled");
            break;
        }

        match playout(first, second, Position::default())? {
            score if score > 0 => statistics.wins += 1,
            0 => statistics.draws += 1,
            _ => statistics.losses += 1,
        }
        progress(played);
    }

    statistics.elapsed = start.elapsed();
    info!(
        black = first.name(),
        white = second.name(),
        %statistics,
        "match finished"
    );
    Ok(statistics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::{Manual, MaxCapture, MinOpenness, RandomMove};
    use crate::Version;

    /// Always plays a1, legal or not.
    struct Stubborn;

    impl Strategy for Stubborn {
        fn name(&self) -> &str {
            "Stubborn"
        }

        fn version(&self) -> Version {
            Version::new(0, 1, 0)
        }

        fn decide(&self, _position: &Position, _player: Player) -> Option<Location> {
            Some(Location::from_index(0))
        }
    }

    #[test]
    fn playout_fills_the_game() {
        let score = playout(&MaxCapture, &MinOpenness, Position::default()).unwrap();
        assert!((-64..=64).contains(&score));
    }

    #[test]
    fn playout_is_deterministic_for_greedy_strategies() {
        let first = playout(&MaxCapture, &MaxCapture, Position::default()).unwrap();
        let second = playout(&MaxCapture, &MaxCapture, Position::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn finished_position_scores_immediately() {
        let position: Position = format!("{}{}", "X".repeat(40), "O".repeat(24))
            .parse()
            .unwrap();
        assert_eq!(playout(&Manual, &Manual, position), Ok(16));
    }

    #[test]
    fn manual_strategy_violates_contract() {
        let err = playout(&Manual, &RandomMove, Position::default()).unwrap_err();
        assert_eq!(err.strategy, "Manual");
        assert_eq!(err.player, Player::Black);
        assert_eq!(err.proposed, None);
    }

    #[test]
    fn illegal_proposal_violates_contract() {
        let err = playout(&RandomMove, &Stubborn, Position::default()).unwrap_err();
        assert_eq!(err.player, Player::White);
        assert_eq!(err.proposed, Some(Location::from_index(0)));
        assert_eq!(
            err.to_string(),
            "Stubborn playing White proposed A1, which is not a legal move"
        );
    }

    #[test]
    fn statistics_count_every_game() {
        let cancel = AtomicBool::new(false);
        let mut reported = Vec::new();
        let statistics =
            run_statistics_with_progress(&RandomMove, &RandomMove, 20, &cancel, |n| {
                reported.push(n)
            })
            .unwrap();
        assert_eq!(statistics.total(), 20);
        assert_eq!(reported, (1..=20).collect::<Vec<u32>>());
    }

    #[test]
    fn cancelled_match_plays_nothing() {
        let cancel = AtomicBool::new(true);
        let statistics = run_statistics(&RandomMove, &RandomMove, 100, &cancel).unwrap();
        assert_eq!(statistics.total(), 0);
    }

    #[test]
    fn statistics_display() {
        let statistics = MatchStatistics {
            wins: 60,
            draws: 5,
            losses: 35,
            elapsed: Duration::from_millis(1234),
        };
        assert_eq!(statistics.to_string(), "60/5/35 @ 1234 ms");
    }
}
