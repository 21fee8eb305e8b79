//! VNS result type.

use crate::incumbent::Incumbent;

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsOutcome {
    /// Best solution found. The resource state matches it on return.
    pub best: Incumbent,
    /// Iterations (shake, repair, evaluate cycles) executed.
    pub iterations: usize,
    /// Iterations whose candidate was accepted.
    pub improvements: usize,
    /// Whether a repair ran out of users. The caller should switch to the
    /// GRASP fallback.
    pub exhausted: bool,
    /// Best cost after each iteration.
    pub cost_history: Vec<f64>,
}
