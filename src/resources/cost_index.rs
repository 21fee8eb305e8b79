//! Cheapest-available-source lookup over the cost matrix.
//!
//! Two lookups serve the constructors:
//!
//! - [`CostIndex::min_for_type`]: cheapest `(cell, slot)` holding a free
//!   user of one given type.
//! - [`CostIndex::min_for_any`]: cheapest `(cell, slot, type)` over all
//!   types, comparing costs per unit of task throughput:
//!   `raw * max_capacity / capacity[type]`.
//!
//! A source never equals the destination. Ties resolve to the lowest
//! cell, then the highest slot, then the lowest user type.
//!
//! With the `parallel` feature the outer scan over source cells runs on
//! rayon; each worker yields its cell's best candidate and the
//! candidates are merged with the same total order the sequential scan
//! uses, so both produce the same answer.

use super::state::ResourceState;
use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Below this many cells the scan stays sequential.
const PARALLEL_MIN_CELLS: usize = 32;

/// A source coordinate returned by the cost index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Source {
    pub cell: usize,
    pub slot: usize,
    pub user_type: usize,
    /// The compared cost: raw per-user cost for
    /// [`min_for_type`](CostIndex::min_for_type), throughput-normalised
    /// cost for [`min_for_any`](CostIndex::min_for_any).
    pub cost: f64,
}

impl Source {
    fn order(&self, other: &Source) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then(self.cell.cmp(&other.cell))
            .then(other.slot.cmp(&self.slot))
            .then(self.user_type.cmp(&other.user_type))
    }

    fn better(a: Source, b: Source) -> Source {
        if b.order(&a) == Ordering::Less {
            b
        } else {
            a
        }
    }

    fn keep_better(best: &mut Option<Source>, candidate: Source) {
        match best {
            Some(current) if current.order(&candidate) != Ordering::Greater => {}
            _ => *best = Some(candidate),
        }
    }
}

/// Stateless min-cost lookup.
#[derive(Debug, Clone, Copy)]
pub struct CostIndex {
    parallel: bool,
}

impl Default for CostIndex {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl CostIndex {
    /// Creates an index; `parallel` has no effect without the `parallel` feature.
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    /// Cheapest free user of `user_type` for `dest`.
    ///
    /// Returns `None` when no other cell holds a free user of that type.
    pub fn min_for_type(
        &self,
        state: &ResourceState,
        dest: usize,
        user_type: usize,
    ) -> Option<Source> {
        if !state.is_usable(user_type) {
            return None;
        }
        self.scan(state, dest, |start| {
            let mut best = None;
            for slot in (0..state.time_slots()).rev() {
                if state.available(start, slot, user_type) == 0 {
                    continue;
                }
                Source::keep_better(
                    &mut best,
                    Source {
                        cell: start,
                        slot,
                        user_type,
                        cost: state.cost(start, dest, slot, user_type),
                    },
                );
            }
            best
        })
    }

    /// Cheapest free user of any type for `dest`, per unit of throughput.
    ///
    /// Returns `None` when no other cell holds a free user.
    pub fn min_for_any(&self, state: &ResourceState, dest: usize) -> Option<Source> {
        if state.remaining() == 0 {
            return None;
        }
        let max_capacity = f64::from(state.max_capacity());
        self.scan(state, dest, |start| {
            let mut best = None;
            for slot in (0..state.time_slots()).rev() {
                for user_type in 0..state.user_types() {
                    if state.available(start, slot, user_type) == 0 {
                        continue;
                    }
                    let raw = state.cost(start, dest, slot, user_type);
                    Source::keep_better(
                        &mut best,
                        Source {
                            cell: start,
                            slot,
                            user_type,
                            cost: raw * max_capacity / f64::from(state.capacity(user_type)),
                        },
                    );
                }
            }
            best
        })
    }

    fn scan<F>(&self, state: &ResourceState, dest: usize, best_in_cell: F) -> Option<Source>
    where
        F: Fn(usize) -> Option<Source> + Sync,
    {
        if self.parallel && state.cells() >= PARALLEL_MIN_CELLS {
            parallel_scan(state.cells(), dest, best_in_cell)
        } else {
            sequential_scan(state.cells(), dest, best_in_cell)
        }
    }

    /// Whether this index splits its scan across threads.
    pub fn is_parallel(&self) -> bool {
        cfg!(feature = "parallel") && self.parallel
    }
}

fn sequential_scan<F>(cells: usize, dest: usize, best_in_cell: F) -> Option<Source>
where
    F: Fn(usize) -> Option<Source>,
{
    (0..cells)
        .filter(|&start| start != dest)
        .filter_map(best_in_cell)
        .reduce(Source::better)
}

#[cfg(feature = "parallel")]
fn parallel_scan<F>(cells: usize, dest: usize, best_in_cell: F) -> Option<Source>
where
    F: Fn(usize) -> Option<Source> + Sync,
{
    (0..cells)
        .into_par_iter()
        .filter(|&start| start != dest)
        .filter_map(&best_in_cell)
        .reduce_with(Source::better)
}

#[cfg(not(feature = "parallel"))]
fn parallel_scan<F>(cells: usize, dest: usize, best_in_cell: F) -> Option<Source>
where
    F: Fn(usize) -> Option<Source> + Sync,
{
    sequential_scan(cells, dest, best_in_cell)
}
