//! Plan feasibility checks.
//!
//! [`check`] validates a move list against the instance a resource state
//! was built from. It looks at the initial pool only, so it gives the same
//! answer whatever the state's current availability.

use crate::moves::MoveList;
use crate::resources::ResourceState;
use std::collections::HashMap;
use thiserror::Error;

/// One way a plan breaks the instance's rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// A move refers to a cell, slot or user type the instance lacks.
    #[error("move {index} is out of range for the instance")]
    OutOfRange { index: usize },

    /// A move's source and destination coincide.
    #[error("move {index} starts and ends at cell {cell}")]
    SelfLoop { index: usize, cell: usize },

    /// A move assigns no users.
    #[error("move {index} assigns no users")]
    EmptyMove { index: usize },

    /// A move claims more tasks than its users can perform.
    #[error("move {index} claims {tasks} tasks but its users can perform {limit}")]
    OverCapacity { index: usize, tasks: u64, limit: u64 },

    /// A cell's covered tasks differ from its demand.
    #[error("cell {cell} has demand {demand} but {covered} tasks are covered")]
    UnmetDemand { cell: usize, demand: u32, covered: u64 },

    /// A bucket lends more users than it initially held.
    #[error("{drawn} users of type {user_type} drawn from cell {cell} slot {slot}, only {available} available")]
    OverDrawn {
        cell: usize,
        slot: usize,
        user_type: usize,
        drawn: u64,
        available: u32,
    },
}

/// Every violation in `moves`, in a stable order: per-move problems by
/// move index, then demand by cell, then over-drawn buckets by position.
pub fn check(state: &ResourceState, moves: &MoveList) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut covered = vec![0u64; state.cells()];
    let mut drawn: HashMap<(usize, usize, usize), u64> = HashMap::new();

    for (index, mv) in moves.iter().enumerate() {
        if mv.source >= state.cells()
            || mv.dest >= state.cells()
            || mv.slot >= state.time_slots()
            || mv.user_type >= state.user_types()
        {
            violations.push(Violation::OutOfRange { index });
            continue;
        }
        if mv.source == mv.dest {
            violations.push(Violation::SelfLoop {
                index,
                cell: mv.source,
            });
        }
        if mv.users == 0 {
            violations.push(Violation::EmptyMove { index });
        }
        let limit = u64::from(mv.users) * u64::from(state.capacity(mv.user_type));
        if u64::from(mv.tasks) > limit {
            violations.push(Violation::OverCapacity {
                index,
                tasks: u64::from(mv.tasks),
                limit,
            });
        }
        covered[mv.dest] += u64::from(mv.tasks);
        *drawn.entry((mv.source, mv.slot, mv.user_type)).or_default() += u64::from(mv.users);
    }

    for (cell, &covered) in covered.iter().enumerate() {
        let demand = state.task_demand(cell);
        if covered != u64::from(demand) {
            violations.push(Violation::UnmetDemand {
                cell,
                demand,
                covered,
            });
        }
    }

    let mut buckets: Vec<_> = drawn.into_iter().collect();
    buckets.sort_unstable_by_key(|&(key, _)| key);
    for ((cell, slot, user_type), drawn) in buckets {
        let available = state.initial_available(cell, slot, user_type);
        if drawn > u64::from(available) {
            violations.push(Violation::OverDrawn {
                cell,
                slot,
                user_type,
                drawn,
                available,
            });
        }
    }

    violations
}

/// Whether `moves` is a complete, feasible plan.
pub fn is_feasible(state: &ResourceState, moves: &MoveList) -> bool {
    check(state, moves).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;

    fn state() -> ResourceState {
        let costs = vec![1.0; 3 * 3 * 2];
        ResourceState::new(
            3,
            1,
            2,
            vec![4, 3, 0],
            vec![1, 3],
            costs,
            vec![0, 0, 0, 0, 2, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_feasible_plan() {
        let state = state();
        let moves = MoveList::from(vec![
            Move::new(2, 0, 0, 0, 1, 1),
            Move::new(2, 0, 0, 1, 1, 3),
        ]);
        // cell 1 is still open
        assert_eq!(
            check(&state, &moves),
            vec![Violation::UnmetDemand {
                cell: 1,
                demand: 3,
                covered: 0
            }]
        );

        let costs = vec![1.0; 3 * 3 * 2];
        let state = ResourceState::new(
            3,
            1,
            2,
            vec![4, 0, 0],
            vec![1, 3],
            costs,
            vec![0, 0, 0, 0, 2, 1],
        )
        .unwrap();
        assert!(is_feasible(&state, &moves));
    }

    #[test]
    fn test_reports_move_level_violations() {
        let state = state();
        let moves = MoveList::from(vec![
            Move::new(1, 1, 0, 0, 1, 1),
            Move::new(2, 0, 0, 0, 1, 2),
            Move::new(7, 0, 0, 0, 1, 1),
        ]);
        let violations = check(&state, &moves);
        assert!(violations.contains(&Violation::SelfLoop { index: 0, cell: 1 }));
        assert!(violations.contains(&Violation::OverCapacity {
            index: 1,
            tasks: 2,
            limit: 1
        }));
        assert!(violations.contains(&Violation::OutOfRange { index: 2 }));
    }

    #[test]
    fn test_reports_over_drawn_bucket() {
        let state = state();
        let moves = MoveList::from(vec![
            Move::new(2, 0, 0, 1, 1, 3),
            Move::new(2, 1, 0, 1, 1, 3),
            Move::new(2, 0, 0, 0, 1, 1),
        ]);
        let violations = check(&state, &moves);
        assert_eq!(
            violations,
            vec![Violation::OverDrawn {
                cell: 2,
                slot: 0,
                user_type: 1,
                drawn: 2,
                available: 1
            }]
        );
    }

    #[test]
    fn test_violation_messages() {
        let v = Violation::UnmetDemand {
            cell: 4,
            demand: 9,
            covered: 7,
        };
        assert_eq!(v.to_string(), "cell 4 has demand 9 but 7 tasks are covered");
    }
}
