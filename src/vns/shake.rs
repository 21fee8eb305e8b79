//! Shaking: random removal of moves.

use crate::moves::MoveList;
use crate::resources::ResourceState;
use rand::seq::index::sample;
use rand::Rng;
use std::collections::BTreeSet;

/// Number of moves a shake of size `k` removes from a list of `len` moves.
pub(crate) fn perturbation_size(len: usize, k: usize, min_moves: usize) -> usize {
    ((len / 6) * k / 100).max(min_moves).min(len)
}

/// Removes a random subset of moves and returns their users to the pool.
///
/// The subset has [`perturbation_size`] distinct moves, sampled uniformly
/// without replacement. Returns the destination cells that lost coverage,
/// in ascending order.
pub fn perturb<R: Rng>(
    moves: &mut MoveList,
    state: &mut ResourceState,
    k: usize,
    min_moves: usize,
    rng: &mut R,
) -> BTreeSet<usize> {
    let amount = perturbation_size(moves.len(), k, min_moves);
    if amount == 0 {
        return BTreeSet::new();
    }
    let picked = sample(rng, moves.len(), amount).into_vec();

    let mut touched = BTreeSet::new();
    for mv in moves.remove_indices(&picked) {
        state.give_back(mv.source, mv.slot, mv.user_type, mv.users);
        touched.insert(mv.dest);
    }
    touched
}
