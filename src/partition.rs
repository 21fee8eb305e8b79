//! Demand partitioning.
//!
//! Splits a task quantity into a multiset of user types of minimum total
//! user count, covering at least the requested tasks. This is minimum
//! coin change where coins are task capacities and any single coin may
//! overshoot; among equal user counts the split wasting the least
//! capacity wins.
//!
//! Dynamic programming over `p = 1..=tasks`:
//!
//! ```text
//! users[p] = min over usable t of
//!     1                      if capacity[t] >= p
//!     users[p - cap[t]] + 1  otherwise
//! ```
//!
//! ties broken by `waste[p]`, the capacity left unused by the choice.
//! The split is recovered by walking the choice table back from `tasks`.

use crate::resources::TaskCapacity;

/// A per-type user count covering a task quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Users required per user type, indexed by original type id.
    pub counts: Vec<u32>,
    /// Capacity provided beyond the requested tasks.
    pub waste: u32,
}

impl Partition {
    /// Total users in the split.
    pub fn total_users(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Whether the split covers the tasks with no unused capacity.
    pub fn is_exact(&self) -> bool {
        self.waste == 0
    }
}

/// Computes the minimum-user split of `tasks` over usable user types.
///
/// `capacities` is the ascending capacity table and `user_types` the
/// number of types (the length of [`Partition::counts`]). Returns `None`
/// when `tasks == 0` or no type is usable.
pub fn partition<U>(
    tasks: u32,
    capacities: &[TaskCapacity],
    user_types: usize,
    usable: U,
) -> Option<Partition>
where
    U: Fn(usize) -> bool,
{
    let usable: Vec<TaskCapacity> = capacities
        .iter()
        .copied()
        .filter(|tc| usable(tc.user_type))
        .collect();
    if tasks == 0 || usable.is_empty() {
        return None;
    }

    let n = tasks as usize;
    let mut users = vec![u32::MAX; n + 1];
    let mut waste = vec![0u32; n + 1];
    let mut choice = vec![0usize; n + 1];
    users[0] = 0;

    for p in 1..=n {
        for (i, tc) in usable.iter().enumerate() {
            let cap = tc.capacity as usize;
            let (count, wasted) = if cap >= p {
                (1, (cap - p) as u32)
            } else {
                (users[p - cap] + 1, waste[p - cap])
            };
            if count < users[p] || (count == users[p] && wasted < waste[p]) {
                users[p] = count;
                waste[p] = wasted;
                choice[p] = i;
            }
        }
    }

    let mut counts = vec![0u32; user_types];
    let mut p = n;
    while p > 0 {
        let tc = usable[choice[p]];
        counts[tc.user_type] += 1;
        p = p.saturating_sub(tc.capacity as usize);
    }

    Some(Partition {
        counts,
        waste: waste[n],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table(caps: &[u32]) -> Vec<TaskCapacity> {
        let mut t: Vec<TaskCapacity> = caps
            .iter()
            .enumerate()
            .map(|(user_type, &capacity)| TaskCapacity {
                user_type,
                capacity,
            })
            .collect();
        t.sort_by_key(|tc| tc.capacity);
        t
    }

    fn covered(p: &Partition, caps: &[u32]) -> u32 {
        p.counts.iter().zip(caps).map(|(n, c)| n * c).sum()
    }

    #[test]
    fn test_seven_tasks_two_users() {
        let caps = [2, 3, 5];
        let p = partition(7, &table(&caps), 3, |_| true).unwrap();
        assert_eq!(p.total_users(), 2, "got {:?}", p.counts);
        assert_eq!(p.counts, vec![1, 0, 1]);
        assert_eq!(covered(&p, &caps), 7);
        assert!(p.is_exact());
    }

    #[test]
    fn test_single_user_overshoot() {
        let caps = [1, 4];
        let p = partition(3, &table(&caps), 2, |_| true).unwrap();
        // one capacity-4 user beats three capacity-1 users
        assert_eq!(p.counts, vec![0, 1]);
        assert_eq!(p.waste, 1);
        assert!(!p.is_exact());
    }

    #[test]
    fn test_waste_breaks_user_count_ties() {
        // {2, 9} and {5, 5} both use two users; only {5, 5} is exact
        let caps = [2, 5, 9];
        let p = partition(10, &table(&caps), 3, |_| true).unwrap();
        assert_eq!(p.counts, vec![0, 2, 0]);
        assert_eq!(p.waste, 0);
    }

    #[test]
    fn test_excluded_type_not_used() {
        let caps = [2, 3, 5];
        let p = partition(7, &table(&caps), 3, |t| t != 2).unwrap();
        assert_eq!(p.counts[2], 0);
        // 2 + 2 + 3
        assert_eq!(p.total_users(), 3);
        assert_eq!(covered(&p, &caps), 7);
    }

    #[test]
    fn test_nothing_usable() {
        assert!(partition(5, &table(&[1, 2]), 2, |_| false).is_none());
        assert!(partition(0, &table(&[1, 2]), 2, |_| true).is_none());
    }

    /// Smallest user count reaching `tasks`, then smallest waste.
    fn brute_force(tasks: u32, caps: &[u32]) -> (u32, u32) {
        let max_cap = *caps.iter().max().unwrap();
        let bound = tasks.div_ceil(*caps.iter().min().unwrap());
        let mut best = (u32::MAX, u32::MAX);
        let mut counts = vec![0u32; caps.len()];
        loop {
            let users: u32 = counts.iter().sum();
            let cover: u32 = counts.iter().zip(caps).map(|(n, c)| n * c).sum();
            if cover >= tasks && cover < tasks + max_cap {
                best = best.min((users, cover - tasks));
            }
            // odometer increment
            let mut i = 0;
            loop {
                if i == counts.len() {
                    return best;
                }
                counts[i] += 1;
                if counts[i] <= bound {
                    break;
                }
                counts[i] = 0;
                i += 1;
            }
        }
    }

    proptest! {
        #[test]
        fn prop_minimum_users_and_waste(
            tasks in 1u32..40,
            caps in proptest::collection::vec(1u32..9, 1..4),
        ) {
            let p = partition(tasks, &table(&caps), caps.len(), |_| true).unwrap();
            let cover = covered(&p, &caps);
            prop_assert!(cover >= tasks);
            prop_assert_eq!(cover - tasks, p.waste);
            prop_assert_eq!((p.total_users(), p.waste), brute_force(tasks, &caps));
        }
    }
}
