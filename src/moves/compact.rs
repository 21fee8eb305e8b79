//! Move list compaction.

use super::list::MoveList;
use super::types::{Move, MoveKey};
use crate::resources::ResourceState;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

impl MoveList {
    /// Collapses duplicate moves and trims the overbooking merges expose.
    ///
    /// Moves sharing `(source, dest, slot, user_type)` are summed into the
    /// most recent of them. When a merged move holds at least one whole
    /// user's capacity it does not spend on tasks, the surplus users are
    /// returned to `state`. Moves left with no users are dropped.
    ///
    /// Returns the number of users given back. Compacting an already
    /// compacted list changes nothing.
    pub fn compact(&mut self, state: &mut ResourceState) -> u32 {
        let moves = self.moves_mut();
        let mut position: HashMap<MoveKey, usize> = HashMap::with_capacity(moves.len());
        let mut merged: Vec<Move> = Vec::with_capacity(moves.len());
        let mut returned = 0;

        for mv in moves.iter().rev() {
            match position.entry(mv.key()) {
                Entry::Occupied(slot) => {
                    let target = &mut merged[*slot.get()];
                    target.users += mv.users;
                    target.tasks += mv.tasks;
                    returned += trim_overbooking(target, state);
                }
                Entry::Vacant(slot) => {
                    slot.insert(merged.len());
                    merged.push(*mv);
                }
            }
        }

        merged.retain(|mv| mv.users > 0);
        merged.reverse();
        *moves = merged;
        returned
    }
}

/// Drops whole users whose capacity `mv` does not use.
fn trim_overbooking(mv: &mut Move, state: &mut ResourceState) -> u32 {
    let capacity = state.capacity(mv.user_type);
    let excess = mv.slack(capacity) / capacity;
    if excess > 0 {
        mv.users -= excess;
        state.give_back(mv.source, mv.slot, mv.user_type, excess);
    }
    excess
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// 3 cells, 2 slots, types with capacity 2 and 5. Pool starts empty
    /// so the totals only count what compaction gives back.
    fn state() -> ResourceState {
        let costs = ResourceState::cost_matrix_from_fn(3, 2, 2, |s, d, slot, t| {
            1.0 + (s + d + slot + t) as f64
        });
        ResourceState::new(3, 2, 2, vec![10, 10, 10], vec![2, 5], costs, vec![0; 12]).unwrap()
    }

    #[test]
    fn test_duplicates_merge_into_newest() {
        let mut state = state();
        let mut list = MoveList::from(vec![
            Move::new(1, 0, 0, 0, 1, 2),
            Move::new(2, 0, 1, 1, 1, 5),
            Move::new(1, 0, 0, 0, 2, 4),
        ]);
        let returned = list.compact(&mut state);
        assert_eq!(returned, 0);
        assert_eq!(
            list.as_slice(),
            &[Move::new(2, 0, 1, 1, 1, 5), Move::new(1, 0, 0, 0, 3, 6)]
        );
    }

    #[test]
    fn test_merge_trims_whole_unused_users() {
        let mut state = state();
        // 2 users of capacity 5 doing 3 tasks, plus 2 users doing 1 task:
        // merged 4 users, capacity 20, 4 tasks -> 3 users surplus
        let mut list = MoveList::from(vec![
            Move::new(1, 0, 1, 1, 2, 3),
            Move::new(1, 0, 1, 1, 2, 1),
        ]);
        let returned = list.compact(&mut state);
        assert_eq!(returned, 3);
        assert_eq!(list.as_slice(), &[Move::new(1, 0, 1, 1, 1, 4)]);
        assert_eq!(state.available(1, 1, 1), 3);
        assert_eq!(state.remaining(), 3);
    }

    #[test]
    fn test_zero_task_merge_dropped() {
        let mut state = state();
        let mut list = MoveList::from(vec![
            Move::new(2, 1, 0, 0, 1, 0),
            Move::new(2, 1, 0, 0, 1, 0),
        ]);
        assert_eq!(list.compact(&mut state), 2);
        assert!(list.is_empty());
        assert_eq!(state.available(2, 0, 0), 2);
    }

    #[test]
    fn test_distinct_moves_untouched() {
        let mut state = state();
        let original = MoveList::from(vec![
            Move::new(1, 0, 0, 0, 3, 1),
            Move::new(0, 1, 0, 0, 1, 2),
        ]);
        let mut list = original.clone();
        // single records are never trimmed, only merges
        assert_eq!(list.compact(&mut state), 0);
        assert_eq!(list, original);
    }

    fn arb_move() -> impl Strategy<Value = Move> {
        (0usize..3, 0usize..3, 0usize..2, 0usize..2, 1u32..4)
            .prop_filter("no self-loops", |(s, d, _, _, _)| s != d)
            .prop_flat_map(|(s, d, slot, t, users)| {
                let cap = if t == 0 { 2 } else { 5 };
                (0..=users * cap).prop_map(move |tasks| Move::new(s, d, slot, t, users, tasks))
            })
    }

    proptest! {
        #[test]
        fn prop_compaction_idempotent_and_conserving(
            moves in proptest::collection::vec(arb_move(), 0..30),
        ) {
            let mut state = state();
            let mut list = MoveList::from(moves);
            let users_before = list.total_users();
            let tasks_before: u32 = list.iter().map(|m| m.tasks).sum();

            let returned = list.compact(&mut state);
            prop_assert_eq!(list.total_users() + u64::from(returned), users_before);
            prop_assert_eq!(state.remaining(), u64::from(returned));
            prop_assert_eq!(list.iter().map(|m| m.tasks).sum::<u32>(), tasks_before);
            for mv in &list {
                prop_assert!(mv.users > 0);
                prop_assert!(mv.tasks <= mv.users * state.capacity(mv.user_type));
            }

            let once = list.clone();
            prop_assert_eq!(list.compact(&mut state), 0);
            prop_assert_eq!(list, once);
        }
    }
}
