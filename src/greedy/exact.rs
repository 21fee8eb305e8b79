//! Exact-partition assignment.

use super::GreedyConstructor;
use crate::error::{AllocError, Result};
use crate::moves::{Move, MoveList};
use crate::partition::partition;
use crate::resources::ResourceState;

impl GreedyConstructor {
    /// Covers `need` tasks at `dest` with a minimum-user split.
    ///
    /// The split comes from the demand partitioner over the usable user
    /// types. Each type's share is drawn from its cheapest sources in
    /// turn, one move per source. When a type runs dry before its share is
    /// drawn (or is only left at `dest` itself), the remainder is
    /// partitioned again without it.
    pub fn assign_exact(
        &self,
        state: &mut ResourceState,
        moves: &mut MoveList,
        dest: usize,
        need: u32,
    ) -> Result<()> {
        let mut need = need;
        let mut excluded = vec![false; state.user_types()];

        'split: while need > 0 {
            let split = partition(need, state.capacities(), state.user_types(), |t| {
                !excluded[t] && state.is_usable(t)
            })
            .ok_or(AllocError::ResourceExhaustion {
                cell: dest,
                unmet: need,
            })?;

            for i in 0..state.capacities().len() {
                let user_type = state.capacities()[i].user_type;
                let capacity = state.capacities()[i].capacity;
                let mut wanted = split.counts[user_type];

                while wanted > 0 && need > 0 {
                    let Some(src) = self.index.min_for_type(state, dest, user_type) else {
                        excluded[user_type] = true;
                        continue 'split;
                    };
                    let users = wanted.min(state.available(src.cell, src.slot, user_type));
                    let tasks = need.min(users.saturating_mul(capacity));

                    state.take(src.cell, src.slot, user_type, users);
                    moves.push(Move::new(src.cell, dest, src.slot, user_type, users, tasks));
                    wanted -= users;
                    need -= tasks;
                }
                if wanted > 0 && need > 0 {
                    continue 'split;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3 cells, 1 slot, capacities [2, 3, 5].
    fn state(availability: Vec<u32>) -> ResourceState {
        let costs = ResourceState::cost_matrix_from_fn(3, 1, 3, |s, d, _, t| {
            if s == d {
                0.0
            } else {
                (s + 1) as f64 * (t + 1) as f64
            }
        });
        ResourceState::new(3, 1, 3, vec![7, 0, 0], vec![2, 3, 5], costs, availability).unwrap()
    }

    #[test]
    fn test_draws_minimum_user_split() {
        let mut state = state(vec![0, 0, 0, 5, 5, 5, 5, 5, 5]);
        let mut moves = MoveList::new();
        GreedyConstructor::default()
            .assign_exact(&mut state, &mut moves, 0, 7)
            .unwrap();

        assert_eq!(moves.len(), 2);
        assert_eq!(moves.total_users(), 2);
        assert_eq!(moves.covered(0), 7);
        assert_eq!(moves.users_by_type(3), vec![1, 0, 1]);
        // cell 1 is cheaper than cell 2 for every type
        assert!(moves.iter().all(|m| m.source == 1));
    }

    #[test]
    fn test_spreads_share_over_sources() {
        // capacity-2 users only: one at cell 1, three at cell 2
        let mut state = state(vec![0, 0, 0, 1, 0, 0, 3, 0, 0]);
        let mut moves = MoveList::new();
        GreedyConstructor::default()
            .assign_exact(&mut state, &mut moves, 0, 8)
            .unwrap();

        assert_eq!(
            moves.as_slice(),
            &[Move::new(1, 0, 0, 0, 1, 2), Move::new(2, 0, 0, 0, 3, 6)]
        );
        assert_eq!(state.remaining(), 0);
    }

    #[test]
    fn test_repartitions_when_type_runs_dry() {
        // split for 7 is {2, 5}, but only capacity-2 and capacity-3 users
        // exist besides one capacity-5 user sitting at the destination
        let mut state = state(vec![0, 0, 1, 2, 2, 0, 0, 0, 0]);
        let mut moves = MoveList::new();
        GreedyConstructor::default()
            .assign_exact(&mut state, &mut moves, 0, 7)
            .unwrap();

        assert_eq!(moves.covered(0), 7);
        assert!(moves.iter().all(|m| m.user_type != 2 && m.source != 0));
        assert_eq!(state.available(0, 0, 2), 1);
        for mv in &moves {
            assert!(mv.tasks <= mv.users * state.capacity(mv.user_type));
        }
    }

    #[test]
    fn test_exhaustion_reports_unmet() {
        let mut state = state(vec![0, 0, 0, 1, 0, 0, 0, 0, 0]);
        let mut moves = MoveList::new();
        let err = GreedyConstructor::default()
            .assign_exact(&mut state, &mut moves, 0, 7)
            .unwrap_err();
        assert_eq!(err, AllocError::ResourceExhaustion { cell: 0, unmet: 5 });
        assert_eq!(moves.covered(0), 2);
    }
}
