//! Play Othello in the terminal, or pit two strategies against each other.

use indicatif::{ProgressBar, ProgressStyle};
use othello_player::connectors::{self, CandidateDisplay, ConsoleConnector};
use othello_player::selfplay;
use othello_player::strategies::MaxCapture;
use othello_player::{GameSession, Registry, SessionConfig, Strategy};
use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  othello <black> <white> [candidates] [log file]
      play a game; candidates: 0 none, 1 legal moves, 2 legal moves and scores
  othello stats <black> <white> <count>
      play <count> games between two strategies and print wins/draws/losses for black";

enum Command {
    Play {
        black: Arc<dyn Strategy>,
        white: Arc<dyn Strategy>,
        candidates: CandidateDisplay,
        log_path: Option<PathBuf>,
    },
    Stats {
        black: Arc<dyn Strategy>,
        white: Arc<dyn Strategy>,
        count: u32,
    },
}

fn parse_args(registry: &Registry, args: &[String]) -> Option<Command> {
    let strategy = |arg: &String| registry.get(arg.parse().ok()?);

    match args {
        [command, black, white, count] if command == "stats" => {
            let black = strategy(black)?;
            let white = strategy(white)?;
            if black.version().no_match || white.version().no_match {
                return None;
            }
            Some(Command::Stats {
                black,
                white,
                count: count.parse().ok()?,
            })
        }
        [black, white, rest @ ..] if rest.len() <= 2 => {
            let candidates = match rest.first() {
                Some(level) => CandidateDisplay::from_level(level.parse().ok()?)?,
                None => CandidateDisplay::None,
            };
            Some(Command::Play {
                black: strategy(black)?,
                white: strategy(white)?,
                candidates,
                log_path: rest.get(1).map(PathBuf::from),
            })
        }
        _ => None,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let registry = Registry::with_builtins();
    let args: Vec<String> = env::args().skip(1).collect();

    let command = match parse_args(&registry, &args) {
        Some(command) => command,
        None => {
            eprintln!("{}\n\nstrategies:\n{}", USAGE, registry);
            process::exit(2);
        }
    };

    match command {
        Command::Play {
            black,
            white,
            candidates,
            log_path,
        } => {
            let evaluator = registry
                .evaluators()
                .into_iter()
                .find(|s| !s.version().no_match)
                .unwrap_or_else(|| Arc::new(MaxCapture) as Arc<dyn Strategy>);
            let config = SessionConfig {
                log_path,
                ..SessionConfig::default()
            };
            let session = GameSession::new(black, white, evaluator, config);
            let mut connector = ConsoleConnector::new(candidates);
            async_std::task::block_on(connectors::play(&session, &mut connector));
        }

        Command::Stats {
            black,
            white,
            count,
        } => {
            let progress = ProgressBar::new(count as u64);
            progress.set_style(
                ProgressStyle::default_bar().template("{bar:40} {pos}/{len} games [{elapsed}]"),
            );

            let cancel = AtomicBool::new(false);
            let result = selfplay::run_statistics_with_progress(
                black.as_ref(),
                white.as_ref(),
                count,
                &cancel,
                |played| progress.set_position(played as u64),
            );
            progress.finish_and_clear();

            match result {
                Ok(statistics) => println!(
                    "{} vs {}: {}",
                    black.name(),
                    white.name(),
                    statistics
                ),
                Err(violation) => {
                    eprintln!("{}", violation);
                    process::exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn play_shows_no_candidates_by_default() {
        let registry = Registry::with_builtins();
        match parse_args(&registry, &args("0 2")) {
            Some(Command::Play {
                candidates,
                log_path,
                ..
            }) => {
                assert_eq!(candidates, CandidateDisplay::None);
                assert_eq!(log_path, None);
            }
            _ => panic!("expected a game"),
        }
        match parse_args(&registry, &args("0 2 2 games.log")) {
            Some(Command::Play {
                candidates,
                log_path,
                ..
            }) => {
                assert_eq!(candidates, CandidateDisplay::Scores);
                assert_eq!(log_path, Some(PathBuf::from("games.log")));
            }
            _ => panic!("expected a game"),
        }
    }

    #[test]
    fn stats_rejects_manual_players() {
        let registry = Registry::with_builtins();
        assert!(parse_args(&registry, &args("stats 0 2 10")).is_none());
        assert!(matches!(
            parse_args(&registry, &args("stats 1 2 10")),
            Some(Command::Stats { count: 10, .. })
        ));
        assert!(parse_args(&registry, &args("0 2 7")).is_none());
    }
}
