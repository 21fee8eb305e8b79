//! Flexible assignment with overbooking repair.

use super::GreedyConstructor;
use crate::error::{AllocError, Result};
use crate::moves::{Move, MoveList};
use crate::resources::ResourceState;

impl GreedyConstructor {
    /// Covers whatever demand at `dest` the moves in `moves` leave open.
    ///
    /// Draws from the cheapest source per unit of throughput until the
    /// demand is met. A draw that would overshoot takes only
    /// `ceil(remaining / capacity)` users; the capacity it leaves unused
    /// is then reclaimed from earlier moves into `dest`, lowest-capacity
    /// types first.
    pub fn assign_flexible(
        &self,
        state: &mut ResourceState,
        moves: &mut MoveList,
        dest: usize,
    ) -> Result<()> {
        let mut need = state.task_demand(dest).saturating_sub(moves.covered(dest));

        while need > 0 {
            let exhausted = AllocError::ResourceExhaustion {
                cell: dest,
                unmet: need,
            };
            if state.remaining() == 0 {
                return Err(exhausted);
            }
            let src = self.index.min_for_any(state, dest).ok_or(exhausted)?;
            let capacity = state.capacity(src.user_type);
            let free = state.available(src.cell, src.slot, src.user_type);

            if u64::from(free) * u64::from(capacity) <= u64::from(need) {
                let tasks = free * capacity;
                state.take(src.cell, src.slot, src.user_type, free);
                let mv = Move::new(src.cell, dest, src.slot, src.user_type, free, tasks);
                moves.push(mv);
                need -= tasks;
            } else {
                let users = need.div_ceil(capacity);
                state.take(src.cell, src.slot, src.user_type, users);
                let mv = Move::new(src.cell, dest, src.slot, src.user_type, users, need);
                moves.push(mv);
                let overbooked = users * capacity - need;
                need = 0;
                if overbooked > 0 {
                    reclaim(state, moves, dest, overbooked);
                }
            }
        }
        Ok(())
    }
}

/// Frees users of earlier moves into `dest` whose work the newest move
/// can absorb with its `overbooked` spare capacity.
///
/// A move of capacity `c` gives up `k <= overbooked / c` users; any tasks
/// they were doing shift onto the newest move. Emptied moves are dropped.
fn reclaim(state: &mut ResourceState, moves: &mut MoveList, dest: usize, overbooked: u32) {
    let moves = moves.moves_mut();
    let Some(last) = moves.len().checked_sub(1) else {
        return;
    };
    let mut spare = overbooked;

    for i in 0..state.capacities().len() {
        let tc = state.capacities()[i];
        if tc.capacity > spare {
            break;
        }
        for j in (0..last).rev() {
            let mv = &mut moves[j];
            if mv.dest != dest || mv.user_type != tc.user_type || mv.users == 0 {
                continue;
            }
            let freed = mv.users.min(spare / tc.capacity);
            if freed == 0 {
                break;
            }
            let kept_capacity = (mv.users - freed) * tc.capacity;
            let shifted = mv.tasks.saturating_sub(kept_capacity);
            mv.users -= freed;
            mv.tasks -= shifted;
            let (source, slot, user_type) = (mv.source, mv.slot, mv.user_type);
            state.give_back(source, slot, user_type, freed);
            moves[last].tasks += shifted;
            spare -= shifted;
        }
    }

    moves.retain(|mv| mv.users > 0);
}
