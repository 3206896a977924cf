//! A live game between two strategies, driven by submissions.
//!
//! [`GameSession`] owns the [`Game`] and decides who moves. Strategy moves are
//! computed on a blocking worker while the session stays responsive: a submission
//! that arrives meanwhile gets [`Submission::Busy`] back instead of waiting.

use crate::{
    records, Annotation, CellView, Evaluator, GameStatus, SessionSnapshot, Status, StatusFields,
    Strategy,
};
use async_std::channel::{self, Receiver, Sender};
use async_std::sync::Mutex;
use async_std::task;
use othello_core::{Game, Location, Player, Position, NUM_SPACES};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Keep playing strategy turns after each completed turn, without waiting for input.
    pub auto_play: bool,
    /// How long auto-play waits before retrying while a move is being computed.
    pub retry_delay: Duration,
    /// Append each finished game's move record to this file.
    pub log_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_play: false,
            retry_delay: Duration::from_millis(10),
            log_path: None,
        }
    }
}

/// What came of a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// A move was played at this location.
    Played(Location),
    /// The side to move had no legal move and passed.
    Passed,
    /// Another move is still being computed; nothing happened.
    Busy,
    /// No legal move was chosen; nothing happened.
    Ignored,
    /// The game is over.
    Finished,
}

struct SessionState {
    game: Game,
    black: Arc<dyn Strategy>,
    white: Arc<dyn Strategy>,
    status: GameStatus,
    computing: bool,
    /// Bumped by every restart, so results computed for an older game are dropped.
    generation: u64,
    /// The position last handed to the evaluator.
    evaluated: Option<(Position, Player)>,
}

impl SessionState {
    fn strategy(&self, player: Player) -> &Arc<dyn Strategy> {
        match player {
            Player::Black => &self.black,
            Player::White => &self.white,
        }
    }

    fn refresh_status(&mut self) {
        let mover = match self.game.turn() {
            None => Status::Empty,
            Some(player) => {
                let manual = self.strategy(player).version().no_match;
                if self.computing && !manual {
                    Status::Computing
                } else if self.game.must_pass() {
                    Status::Passed
                } else if manual {
                    Status::WaitingForManualInput
                } else {
                    Status::Ready
                }
            }
        };
        self.status = GameStatus::new(&self.game, mover);
    }

    /// The evaluation the evaluator should be working on, if it changed since last time.
    fn evaluation_request(&mut self) -> Option<(Position, Player)> {
        let request = (self.game.position(), self.game.turn()?);
        if self.evaluated == Some(request) {
            return None;
        }
        self.evaluated = Some(request);
        Some(request)
    }
}

struct Shared {
    state: Mutex<SessionState>,
    evaluator: Evaluator,
    config: SessionConfig,
    updates: Option<Sender<SessionSnapshot>>,
}

/// A cloneable handle to one game session.
#[derive(Clone)]
pub struct GameSession {
    shared: Arc<Shared>,
}

impl GameSession {
    /// A session at the starting position. Call [`start`](Self::start) to begin.
    pub fn new(
        black: Arc<dyn Strategy>,
        white: Arc<dyn Strategy>,
        evaluator: Arc<dyn Strategy>,
        config: SessionConfig,
    ) -> Self {
        Self::build(black, white, evaluator, config, None)
    }

    /// Like [`new`](Self::new), also sending a snapshot down the returned channel
    /// after every change.
    pub fn with_updates(
        black: Arc<dyn Strategy>,
        white: Arc<dyn Strategy>,
        evaluator: Arc<dyn Strategy>,
        config: SessionConfig,
    ) -> (Self, Receiver<SessionSnapshot>) {
        let (sender, receiver) = channel::unbounded();
        let session = Self::build(black, white, evaluator, config, Some(sender));
        (session, receiver)
    }

    fn build(
        black: Arc<dyn Strategy>,
        white: Arc<dyn Strategy>,
        evaluator: Arc<dyn Strategy>,
        config: SessionConfig,
        updates: Option<Sender<SessionSnapshot>>,
    ) -> Self {
        let mut state = SessionState {
            game: Game::default(),
            black,
            white,
            status: GameStatus::default(),
            computing: false,
            generation: 0,
            evaluated: None,
        };
        state.refresh_status();

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                evaluator: Evaluator::new(evaluator),
                config,
                updates,
            }),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.shared.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.shared.evaluator
    }

    /// Begin a new game from the starting position, Black to move.
    /// A move still being computed for the previous game is discarded when it arrives.
    pub async fn start(&self) {
        {
            let mut state = self.shared.state.lock().await;
            state.generation += 1;
            state.game = Game::default();
            state.computing = false;
            state.evaluated = None;
            state.refresh_status();
            info!(
                black = state.black.name(),
                white = state.white.name(),
                generation = state.generation,
                "game started"
            );
        }
        self.changed().await;
    }

    /// Ask the side to move to play, offering `choice` for sides that do not decide
    /// for themselves. Out-of-turn and illegal choices are ignored.
    ///
    /// With auto-play on, strategy turns keep being played until input is needed or
    /// the game ends; the result of the first turn is returned.
    pub async fn submit(&self, choice: Option<Location>) -> Submission {
        let auto_play = self.shared.config.auto_play;
        let mut choice = choice;
        let mut first = None;

        loop {
            let result = self.step(choice).await;
            match result {
                Submission::Busy if auto_play && choice.is_none() => {
                    task::sleep(self.shared.config.retry_delay).await;
                }
                Submission::Played(_) | Submission::Passed if auto_play => {
                    first.get_or_insert(result);
                    choice = None;
                }
                _ => return first.unwrap_or(result),
            }
        }
    }

    /// One turn, at most.
    async fn step(&self, choice: Option<Location>) -> Submission {
        let (strategy, position, player, generation) = {
            let mut state = self.shared.state.lock().await;
            let player = match state.game.turn() {
                Some(player) => player,
                None => return Submission::Finished,
            };
            if state.computing {
                debug!(?choice, "submission while computing");
                return Submission::Busy;
            }

            if state.game.must_pass() {
                if state.game.pass().is_err() {
                    return Submission::Ignored;
                }
                debug!(%player, "passed");
                state.refresh_status();
                drop(state);
                self.turn_ended().await;
                return Submission::Passed;
            }

            state.computing = true;
            state.refresh_status();
            (
                state.strategy(player).clone(),
                state.game.position(),
                player,
                state.generation,
            )
        };
        self.changed().await;

        let decided = task::spawn_blocking(move || strategy.decide(&position, player)).await;

        let mut state = self.shared.state.lock().await;
        if state.generation != generation {
            debug!("dropping a move computed for an earlier game");
            return Submission::Ignored;
        }
        state.computing = false;

        let legal = state.game.legal_moves();
        let played = decided
            .or(choice)
            .filter(|&loc| legal.contains(loc))
            .and_then(|loc| state.game.play(loc).ok().map(|_| loc));
        state.refresh_status();
        drop(state);

        match played {
            Some(loc) => {
                debug!(%player, %loc, "played");
                self.turn_ended().await;
                Submission::Played(loc)
            }
            None => {
                self.changed().await;
                Submission::Ignored
            }
        }
    }

    /// Replace both strategies, keeping the game as it is.
    pub async fn set_strategies(&self, black: Arc<dyn Strategy>, white: Arc<dyn Strategy>) {
        {
            let mut state = self.shared.state.lock().await;
            info!(
                black = black.name(),
                white = white.name(),
                "strategies changed"
            );
            state.black = black;
            state.white = white;
            state.refresh_status();
        }
        self.changed().await;
    }

    /// Replace the strategy producing the advisory scores.
    pub async fn set_evaluator(&self, strategy: Arc<dyn Strategy>) {
        self.shared.evaluator.set_strategy(strategy).await;
        self.shared.state.lock().await.evaluated = None;
        self.changed().await;
    }

    /// The current state of the board, with the latest evaluation if it is of this position.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let evaluation = self.shared.evaluator.latest().await;
        let state = self.shared.state.lock().await;

        let position = state.game.position();
        let legal = state.game.legal_moves();
        let annotations = match (&evaluation, state.game.turn()) {
            (Some(evaluation), Some(player)) if evaluation.is_for(&position, player) => {
                evaluation.annotations()
            }
            _ => vec![Annotation::default(); NUM_SPACES],
        };

        let cells = position
            .to_array()
            .iter()
            .zip(annotations)
            .enumerate()
            .map(|(index, (color, annotation))| CellView {
                color,
                legal: legal.contains(Location::from_index(index as u8)),
                annotation,
            })
            .collect();

        SessionSnapshot {
            cells,
            fields: StatusFields::new(&state.status, state.black.name(), state.white.name()),
            status: state.status.clone(),
            turn: state.game.turn(),
        }
    }

    /// After a move or pass: log the game if it just ended, then publish.
    async fn turn_ended(&self) {
        let finished = {
            let state = self.shared.state.lock().await;
            if state.game.is_finished() {
                info!(
                    black = state.status.black_count,
                    white = state.status.white_count,
                    record = %state.game.record(),
                    "game over"
                );
                Some(state.game.record().to_string())
            } else {
                None
            }
        };

        if let (Some(record), Some(path)) = (finished, self.shared.config.log_path.clone()) {
            task::spawn_blocking(move || records::save_log_lines(path, &[record])).await;
        }
        self.changed().await;
    }

    /// Request a fresh evaluation if the position moved on, and push a snapshot.
    async fn changed(&self) {
        let request = self.shared.state.lock().await.evaluation_request();
        if let Some((position, player)) = request {
            self.shared.evaluator.request(position, player).await;
        }

        if let Some(updates) = &self.shared.updates {
            // Nobody listening is fine.
            let _ = updates.try_send(self.snapshot().await);
        }
    }
}
