//! Per-cell user requirements.

use crate::moves::MoveList;

/// Users of each type to send to each destination cell.
///
/// Aggregated from a plan: entry `(dest, type)` is the number of users of
/// that type the plan moves into `dest`, over all sources and slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirements {
    user_types: usize,
    counts: Vec<u32>,
}

impl Requirements {
    /// Aggregates the users `moves` sends to each cell.
    pub fn from_moves(moves: &MoveList, cells: usize, user_types: usize) -> Self {
        let mut counts = vec![0u32; cells * user_types];
        for mv in moves {
            counts[mv.dest * user_types + mv.user_type] += mv.users;
        }
        Self { user_types, counts }
    }

    /// Users of `user_type` required at `dest`.
    #[inline]
    pub fn get(&self, dest: usize, user_type: usize) -> u32 {
        self.counts[dest * self.user_types + user_type]
    }

    /// Users required across all cells.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }
}
