//! The move list: the solution representation.

use super::types::Move;
use crate::resources::ResourceState;

/// An ordered sequence of moves.
///
/// Order does not affect the objective. It decides which duplicate is
/// "most recent" when [compacting](MoveList::compact).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            moves: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn push(&mut self, mv: Move) {
        debug_assert!(mv.users > 0, "move with zero users: {mv:?}");
        debug_assert_ne!(mv.source, mv.dest, "self-loop move: {mv:?}");
        self.moves.push(mv);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub(crate) fn moves_mut(&mut self) -> &mut Vec<Move> {
        &mut self.moves
    }

    /// Total weighted cost: `sum(cost(source, dest, slot, type) * users)`.
    pub fn objective(&self, state: &ResourceState) -> f64 {
        self.moves.iter().map(|mv| mv.cost(state)).sum()
    }

    /// Tasks performed at `dest`.
    pub fn covered(&self, dest: usize) -> u32 {
        self.moves
            .iter()
            .filter(|mv| mv.dest == dest)
            .map(|mv| mv.tasks)
            .sum()
    }

    /// Users held by all moves.
    pub fn total_users(&self) -> u64 {
        self.moves.iter().map(|mv| u64::from(mv.users)).sum()
    }

    /// Users drawn per user type.
    pub fn users_by_type(&self, user_types: usize) -> Vec<u64> {
        let mut counts = vec![0u64; user_types];
        for mv in &self.moves {
            counts[mv.user_type] += u64::from(mv.users);
        }
        counts
    }

    /// Removes the moves at `indices` and returns them, keeping the order
    /// of the survivors.
    pub fn remove_indices(&mut self, indices: &[usize]) -> Vec<Move> {
        let mut doomed = vec![false; self.moves.len()];
        for &i in indices {
            doomed[i] = true;
        }
        let mut removed = Vec::with_capacity(indices.len());
        let mut i = 0;
        self.moves.retain(|mv| {
            let keep = !doomed[i];
            i += 1;
            if !keep {
                removed.push(*mv);
            }
            keep
        });
        removed
    }
}

impl From<Vec<Move>> for MoveList {
    fn from(moves: Vec<Move>) -> Self {
        Self { moves }
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
