//! `othello-player` turns the board logic of `othello-core` into something playable:
//! interchangeable [`Strategy`] implementations, a [`GameSession`] that runs them off
//! the interactive path, an [`Evaluator`] for advisory scores, and a self-play harness
//! for pitting strategies against each other.

pub mod connectors;
pub mod records;
pub mod selfplay;
pub mod strategies;

mod evaluator;
mod registry;
mod session;
mod status;
mod strategy;

pub use evaluator::{Evaluation, Evaluator};
pub use registry::Registry;
pub use session::{GameSession, SessionConfig, Submission};
pub use status::*;
pub use strategy::*;
