//! Utilities used for testing and benchmarking.

mod perft;
pub use perft::{count_leaves, run_perft};

pub mod raycast;
