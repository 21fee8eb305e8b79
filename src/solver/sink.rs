//! Solution output boundary.

use crate::moves::MoveList;

/// Receives the final plan of a run.
///
/// Writers (files, channels, test collectors) implement this. Any
/// `FnMut(&MoveList, f64, u64, &str)` closure is a sink.
pub trait SolutionSink {
    /// Called once with the best plan, its objective, the elapsed
    /// milliseconds and the run label.
    fn emit(&mut self, moves: &MoveList, objective: f64, elapsed_ms: u64, label: &str);
}

impl<F> SolutionSink for F
where
    F: FnMut(&MoveList, f64, u64, &str),
{
    fn emit(&mut self, moves: &MoveList, objective: f64, elapsed_ms: u64, label: &str) {
        self(moves, objective, elapsed_ms, label)
    }
}
