//! Advisory evaluation in the background.
//!
//! At most one evaluation runs at a time. Requests that arrive while it runs
//! overwrite each other; when it finishes, the worker moves straight on to the
//! newest request and throws the stale result away.

use crate::{Annotation, Highlight, Scores, Strategy};
use arrayvec::ArrayVec;
use async_std::channel::{self, Receiver, Sender};
use async_std::sync::Mutex;
use async_std::task::{self, JoinHandle};
use itertools::Itertools;
use othello_core::{Player, Position, NUM_SPACES};
use std::cmp::Ordering;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error};

/// Scores of one position, as produced by the evaluating strategy.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub position: Position,
    pub player: Player,
    /// `None` when the strategy does not evaluate.
    pub scores: Option<Scores>,
}

impl Evaluation {
    /// One annotation per cell.
    ///
    /// Scores render with three decimals; cells without a score render empty.
    /// Cells scoring at least the third-highest score are [`Highlight::Top`],
    /// unless fewer than three cells have a score at all.
    pub fn annotations(&self) -> Vec<Annotation> {
        let scores = match &self.scores {
            Some(scores) => scores,
            None => return vec![Annotation::default(); NUM_SPACES],
        };

        let applicable: ArrayVec<[f64; NUM_SPACES]> =
            scores.iter().filter(|score| !score.is_nan()).collect();
        let threshold = applicable
            .iter()
            .copied()
            .sorted_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal))
            .nth(2);

        scores
            .iter()
            .map(|score| {
                if score.is_nan() {
                    return Annotation::default();
                }
                let highlight = match threshold {
                    Some(threshold) if score >= threshold => Highlight::Top,
                    _ => Highlight::Normal,
                };
                Annotation {
                    highlight,
                    text: format!("{:.3}", score),
                }
            })
            .collect()
    }

    /// Whether this evaluation is of `position` with `player` to move.
    pub fn is_for(&self, position: &Position, player: Player) -> bool {
        self.position == *position && self.player == player
    }
}

struct EvalState {
    strategy: Arc<dyn Strategy>,
    pending: Option<(Position, Player)>,
    running: bool,
    latest: Option<Evaluation>,
    runs: usize,
}

/// Runs a [`Strategy`]'s `evaluate` off the caller's task, coalescing requests.
#[derive(Clone)]
pub struct Evaluator {
    state: Arc<Mutex<EvalState>>,
    published: Option<Sender<Evaluation>>,
}

impl Evaluator {
    pub fn new(strategy: Arc<dyn Strategy>) -> Self {
        Self::build(strategy, None)
    }

    /// An evaluator that also sends every published evaluation down a channel.
    pub fn with_channel(strategy: Arc<dyn Strategy>) -> (Self, Receiver<Evaluation>) {
        let (sender, receiver) = channel::unbounded();
        (Self::build(strategy, Some(sender)), receiver)
    }

    fn build(strategy: Arc<dyn Strategy>, published: Option<Sender<Evaluation>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(EvalState {
                strategy,
                pending: None,
                running: false,
                latest: None,
                runs: 0,
            })),
            published,
        }
    }

    /// Replace the evaluating strategy. An evaluation already running finishes with the old one.
    pub async fn set_strategy(&self, strategy: Arc<dyn Strategy>) {
        let mut state = self.state.lock().await;
        debug!(strategy = strategy.name(), "evaluator strategy changed");
        state.strategy = strategy;
        state.latest = None;
    }

    pub async fn strategy(&self) -> Arc<dyn Strategy> {
        self.state.lock().await.strategy.clone()
    }

    /// Ask for `position` to be evaluated for `player`.
    ///
    /// Returns the worker's handle if this call started one, or `None` if a worker is
    /// already running and will pick the request up when it finishes.
    pub async fn request(&self, position: Position, player: Player) -> Option<JoinHandle<()>> {
        let mut state = self.state.lock().await;
        if state.pending.replace((position, player)).is_some() {
            debug!("superseded a pending evaluation request");
        }
        if state.running {
            return None;
        }
        state.running = true;
        drop(state);

        let worker = self.clone();
        Some(task::spawn(async move { worker.work().await }))
    }

    /// The most recently published evaluation.
    pub async fn latest(&self) -> Option<Evaluation> {
        self.state.lock().await.latest.clone()
    }

    /// Number of evaluations run so far, including discarded ones.
    pub async fn runs(&self) -> usize {
        self.state.lock().await.runs
    }

    async fn work(&self) {
        loop {
            let (strategy, (position, player)) = {
                let mut state = self.state.lock().await;
                match state.pending.take() {
                    Some(request) => (state.strategy.clone(), request),
                    None => {
                        state.running = false;
                        return;
                    }
                }
            };

            let name = strategy.name().to_string();
            let outcome = task::spawn_blocking(move || {
                panic::catch_unwind(AssertUnwindSafe(|| strategy.evaluate(&position, player)))
            })
            .await;

            if outcome.is_err() {
                error!(strategy = %name, "evaluation panicked");
            }

            let mut state = self.state.lock().await;
            state.runs += 1;
            if state.pending.is_some() {
                debug!("discarding stale evaluation");
                continue;
            }

            let scores = match outcome {
                Ok(scores) => scores,
                Err(_) => {
                    state.latest = None;
                    state.running = false;
                    return;
                }
            };

            let evaluation = Evaluation {
                position,
                player,
                scores,
            };
            state.latest = Some(evaluation.clone());
            state.running = false;
            drop(state);

            if let Some(sender) = &self.published {
                // Nobody listening is fine.
                let _ = sender.try_send(evaluation);
            }
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::{MaxCapture, RandomMove};
    use crate::Version;
    use othello_core::{Location, Position};
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::mpsc;

    /// Blocks each evaluation until the test lets it through.
    struct Gated {
        gate: std::sync::Mutex<mpsc::Receiver<()>>,
        calls: AtomicUsize,
    }

    impl Strategy for Gated {
        fn name(&self) -> &str {
            "Gated"
        }

        fn version(&self) -> Version {
            Version::new(0, 0, 1)
        }

        fn decide(&self, _position: &Position, _player: Player) -> Option<Location> {
            None
        }

        fn evaluate(&self, position: &Position, player: Player) -> Option<Scores> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            self.gate.lock().unwrap().recv().unwrap();
            MaxCapture.evaluate(position, player)
        }
    }

    /// Panics on its first evaluation, then scores like [`MaxCapture`].
    struct Flaky {
        calls: AtomicUsize,
    }

    impl Strategy for Flaky {
        fn name(&self) -> &str {
            "Flaky"
        }

        fn version(&self) -> Version {
            Version::new(0, 0, 1)
        }

        fn decide(&self, _position: &Position, _player: Player) -> Option<Location> {
            None
        }

        fn evaluate(&self, position: &Position, player: Player) -> Option<Scores> {
            if self.calls.fetch_add(1, AtomicOrdering::SeqCst) == 0 {
                panic!("first evaluation fails");
            }
            MaxCapture.evaluate(position, player)
        }
    }

    fn scores_of(values: &[(u8, f64)]) -> Evaluation {
        let mut scores = Scores::default();
        for &(index, value) in values {
            scores.set(Location::from_index(index), value);
        }
        Evaluation {
            position: Position::default(),
            player: Player::Black,
            scores: Some(scores),
        }
    }

    #[test]
    fn annotations_mark_top_three() {
        let evaluation = scores_of(&[(0, 1.0), (1, 5.0), (2, 3.0), (3, 3.0), (4, 0.0)]);
        let annotations = evaluation.annotations();
        assert_eq!(annotations.len(), NUM_SPACES);

        let top: Vec<usize> = annotations
            .iter()
            .positions(|a| a.highlight == Highlight::Top)
            .collect();
        assert_eq!(top, vec![1, 2, 3]);
        assert_eq!(annotations[1].text, "5.000");
        assert_eq!(annotations[4].text, "0.000");
        assert_eq!(annotations[5].text, "");
    }

    #[test]
    fn no_top_with_fewer_than_three_scores() {
        let annotations = scores_of(&[(10, 2.0), (11, 1.0)]).annotations();
        assert!(annotations.iter().all(|a| a.highlight == Highlight::Normal));
        assert_eq!(annotations[10].text, "2.000");
    }

    #[test]
    fn no_scores_no_annotations() {
        let evaluation = Evaluation {
            position: Position::default(),
            player: Player::Black,
            scores: None,
        };
        assert!(evaluation
            .annotations()
            .iter()
            .all(|a| *a == Annotation::default()));
    }

    #[async_std::test]
    async fn publishes_evaluation() {
        let (evaluator, published) = Evaluator::with_channel(Arc::new(MaxCapture));
        let handle = evaluator
            .request(Position::default(), Player::Black)
            .await
            .unwrap();
        handle.await;

        let latest = evaluator.latest().await.unwrap();
        assert!(latest.is_for(&Position::default(), Player::Black));
        assert_eq!(
            latest.scores.unwrap().get(Location::from_index(19)),
            Some(4.0)
        );
        assert!(published.try_recv().is_ok());
        assert_eq!(evaluator.runs().await, 1);
    }

    #[async_std::test]
    async fn non_evaluating_strategy_publishes_nothing_scored() {
        let evaluator = Evaluator::new(Arc::new(RandomMove));
        evaluator
            .request(Position::default(), Player::Black)
            .await
            .unwrap()
            .await;
        assert!(evaluator.latest().await.unwrap().scores.is_none());
    }

    #[async_std::test]
    async fn coalesces_to_latest_request() {
        let (open, gate) = mpsc::channel();
        let strategy = Arc::new(Gated {
            gate: std::sync::Mutex::new(gate),
            calls: AtomicUsize::new(0),
        });
        let (evaluator, published) = Evaluator::with_channel(strategy.clone());

        let first = Position::default();
        let mut second = first;
        second.apply_move(Player::Black, Location::from_index(19));
        let mut third = second;
        third.apply_move(Player::White, Location::from_index(18));

        let handle = evaluator.request(first, Player::Black).await.unwrap();
        assert!(evaluator.request(second, Player::White).await.is_none());
        assert!(evaluator.request(third, Player::Black).await.is_none());

        open.send(()).unwrap();
        open.send(()).unwrap();
        handle.await;

        assert!(strategy.calls.load(AtomicOrdering::SeqCst) <= 2);
        let latest = evaluator.latest().await.unwrap();
        assert!(latest.is_for(&third, Player::Black));

        let only = published.try_recv().unwrap();
        assert!(only.is_for(&third, Player::Black));
        assert!(published.try_recv().is_err());
    }

    #[async_std::test]
    async fn recovers_after_a_panicking_evaluation() {
        let evaluator = Evaluator::new(Arc::new(Flaky {
            calls: AtomicUsize::new(0),
        }));

        let handle = evaluator
            .request(Position::default(), Player::Black)
            .await
            .unwrap();
        handle.await;
        assert!(evaluator.latest().await.is_none());
        assert_eq!(evaluator.runs().await, 1);

        let handle = evaluator
            .request(Position::default(), Player::Black)
            .await
            .expect("the worker is free again");
        handle.await;
        let latest = evaluator.latest().await.unwrap();
        assert_eq!(
            latest.scores.unwrap().get(Location::from_index(19)),
            Some(4.0)
        );
    }
}
