//! The best-known solution.

use crate::moves::MoveList;
use crate::resources::{ResourceState, Snapshot};

/// Objective differences below this are not improvements.
const IMPROVEMENT_EPS: f64 = 1e-9;

/// A move list together with its objective and the pool it leaves behind.
///
/// Restoring [`snapshot`](Self::snapshot) puts the resource state back in
/// line with [`moves`](Self::moves).
#[derive(Debug, Clone)]
pub struct Incumbent {
    pub moves: MoveList,
    pub cost: f64,
    pub snapshot: Snapshot,
}

impl Incumbent {
    /// Captures `moves` against the current state of `state`.
    pub fn capture(moves: MoveList, state: &ResourceState) -> Self {
        let cost = moves.objective(state);
        Self {
            moves,
            cost,
            snapshot: state.snapshot(),
        }
    }

    /// Whether `cost` strictly beats this incumbent.
    pub fn is_improved_by(&self, cost: f64) -> bool {
        cost < self.cost - IMPROVEMENT_EPS
    }
}
