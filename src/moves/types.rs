//! The move record.

use crate::resources::ResourceState;

/// One transfer of users of a single type from a source `(cell, slot)`
/// to a destination cell.
///
/// Invariants: `users > 0`, `source != dest`, and
/// `tasks <= users * capacity[user_type]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub source: usize,
    pub dest: usize,
    pub slot: usize,
    pub user_type: usize,
    /// Users moved.
    pub users: u32,
    /// Tasks these users perform at the destination.
    pub tasks: u32,
}

/// Identity of a move for merging: everything but the counts.
pub(crate) type MoveKey = (usize, usize, usize, usize);

impl Move {
    pub fn new(
        source: usize,
        dest: usize,
        slot: usize,
        user_type: usize,
        users: u32,
        tasks: u32,
    ) -> Self {
        Self {
            source,
            dest,
            slot,
            user_type,
            users,
            tasks,
        }
    }

    pub(crate) fn key(&self) -> MoveKey {
        (self.source, self.dest, self.slot, self.user_type)
    }

    /// Weighted cost of this move: per-user cost times users.
    #[inline]
    pub fn cost(&self, state: &ResourceState) -> f64 {
        state.cost(self.source, self.dest, self.slot, self.user_type) * f64::from(self.users)
    }

    /// Capacity of the moved users not spent on tasks.
    #[inline]
    pub fn slack(&self, capacity: u32) -> u32 {
        (self.users * capacity).saturating_sub(self.tasks)
    }
}
