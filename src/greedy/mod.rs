//! Greedy construction.
//!
//! Builds a complete move list against one resource state, one
//! destination cell at a time, cells visited by ascending demand. Each
//! cell is filled in one of two modes:
//!
//! - **Exact** ([`GreedyConstructor::assign_exact`]): when the demand
//!   partitions into whole users with no unused capacity, draw exactly
//!   that per-type split from the cheapest sources of each type.
//! - **Flexible** ([`GreedyConstructor::assign_flexible`]): repeatedly
//!   draw from the cheapest source per unit of throughput; when the last
//!   draw overshoots, reclaim the overbooking from lower-capacity moves
//!   already serving the cell. Also used to repair perturbed solutions.
//!
//! Both modes fail with [`AllocError::ResourceExhaustion`] when no source
//! is left for the cell; construction then moves on to the next cell.

mod exact;
mod flexible;

use crate::error::{AllocError, Result};
use crate::moves::MoveList;
use crate::partition::partition;
use crate::resources::{CostIndex, ResourceState};
use tracing::{debug, info};

/// Greedy constructor over a [`CostIndex`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyConstructor {
    index: CostIndex,
}

impl GreedyConstructor {
    pub fn new(index: CostIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &CostIndex {
        &self.index
    }

    /// Covers the demand of every cell, appending to `moves`.
    ///
    /// A cell that cannot be fully covered while users remain elsewhere
    /// (for example when the only free users sit at the cell itself) is
    /// left short and construction moves on to the next cell. It stops
    /// once the pool is empty.
    ///
    /// # Errors
    ///
    /// [`AllocError::ResourceExhaustion`] for the first cell left short.
    /// `moves` keeps everything built and `state` reflects it, so callers
    /// may keep the partial plan.
    pub fn construct(&self, state: &mut ResourceState, moves: &mut MoveList) -> Result<()> {
        let mut order: Vec<usize> = (0..state.cells())
            .filter(|&cell| state.task_demand(cell) > 0)
            .collect();
        order.sort_by_key(|&cell| (state.task_demand(cell), cell));

        info!(
            event = "phase_start",
            phase = "Greedy Construction",
            cells = order.len(),
            demand = state.total_demand(),
            users = state.remaining(),
        );

        let mut shortfall: Option<AllocError> = None;
        let mut short_cells = 0usize;
        for dest in order {
            let need = state.task_demand(dest).saturating_sub(moves.covered(dest));
            if need == 0 {
                continue;
            }
            let exact = partition(need, state.capacities(), state.user_types(), |t| {
                state.is_usable(t)
            })
            .is_some_and(|split| split.is_exact());

            debug!(
                event = "assign",
                cell = dest,
                need = need,
                mode = if exact { "exact" } else { "flexible" },
            );
            let assigned = if exact {
                self.assign_exact(state, moves, dest, need)
            } else {
                self.assign_flexible(state, moves, dest)
            };

            if let Err(err) = assigned {
                if !err.is_exhaustion() {
                    return Err(err);
                }
                debug!(event = "cell_short", cell = dest, reason = %err);
                short_cells += 1;
                shortfall.get_or_insert(err);
                if state.remaining() == 0 {
                    break;
                }
            }
        }

        info!(
            event = "phase_end",
            phase = "Greedy Construction",
            moves = moves.len(),
            short_cells = short_cells,
            users_left = state.remaining(),
        );
        match shortfall {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
