//! Mutable availability pool plus the immutable cost and task tables.

use crate::error::{AllocError, Result};

/// Tasks one user of a given type performs.
///
/// [`ResourceState`] keeps these sorted ascending by `capacity`, each entry
/// remembering the user type it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskCapacity {
    /// Original user-type identifier.
    pub user_type: usize,
    /// Tasks one user of this type completes.
    pub capacity: u32,
}

/// Copy of the mutable part of a [`ResourceState`].
///
/// Taken when a solution is promoted to best-known and restored when a
/// candidate is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    availability: Vec<u32>,
    remaining: u64,
    remaining_by_type: Vec<u64>,
}

impl Snapshot {
    /// Total users free in this snapshot.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

/// The resource state of one run.
///
/// Owns the availability pool `availability[cell][slot][type]`, the cost
/// matrix `cost[start][dest][slot][type]` (both stored flattened in
/// row-major order), per-cell task demand, and the task capacity table.
/// Every component receives it by reference; all mutation goes through
/// [`take`](Self::take) and [`give_back`](Self::give_back), which keep
/// the running totals exact.
#[derive(Debug, Clone)]
pub struct ResourceState {
    cells: usize,
    time_slots: usize,
    user_types: usize,
    task_demand: Vec<u32>,
    capacities: Vec<TaskCapacity>,
    capacity_by_type: Vec<u32>,
    costs: Vec<f64>,
    availability: Vec<u32>,
    remaining: u64,
    remaining_by_type: Vec<u64>,
    initial: Snapshot,
}

impl ResourceState {
    /// Builds a resource state from loaded instance tables.
    ///
    /// * `task_capacity[t]` is the capacity of user type `t`.
    /// * `costs` is indexed `((start * cells + dest) * time_slots + slot) * user_types + type`.
    /// * `availability` is indexed `(cell * time_slots + slot) * user_types + type`.
    ///
    /// # Errors
    ///
    /// [`AllocError::InvalidInstance`] when a dimension is zero, a table
    /// length disagrees with the dimensions, a capacity is zero, or a cost
    /// is negative or not finite.
    pub fn new(
        cells: usize,
        time_slots: usize,
        user_types: usize,
        task_demand: Vec<u32>,
        task_capacity: Vec<u32>,
        costs: Vec<f64>,
        availability: Vec<u32>,
    ) -> Result<Self> {
        if cells == 0 || time_slots == 0 || user_types == 0 {
            return Err(AllocError::InvalidInstance(format!(
                "dimensions must be positive, got {cells} cells, {time_slots} slots, \
                 {user_types} user types"
            )));
        }
        check_len("task demand", task_demand.len(), cells)?;
        check_len("task capacity", task_capacity.len(), user_types)?;
        check_len(
            "cost matrix",
            costs.len(),
            cells * cells * time_slots * user_types,
        )?;
        check_len(
            "availability",
            availability.len(),
            cells * time_slots * user_types,
        )?;

        if let Some(t) = task_capacity.iter().position(|&c| c == 0) {
            return Err(AllocError::InvalidInstance(format!(
                "user type {t} has zero task capacity"
            )));
        }
        if let Some(i) = costs.iter().position(|c| !c.is_finite() || *c < 0.0) {
            return Err(AllocError::InvalidInstance(format!(
                "cost entry {i} is {}, expected a finite non-negative value",
                costs[i]
            )));
        }

        let mut capacities: Vec<TaskCapacity> = task_capacity
            .iter()
            .enumerate()
            .map(|(user_type, &capacity)| TaskCapacity {
                user_type,
                capacity,
            })
            .collect();
        capacities.sort_by_key(|tc| (tc.capacity, tc.user_type));

        let mut remaining_by_type = vec![0u64; user_types];
        for (i, &count) in availability.iter().enumerate() {
            remaining_by_type[i % user_types] += u64::from(count);
        }
        let remaining = remaining_by_type.iter().sum();

        let initial = Snapshot {
            availability: availability.clone(),
            remaining,
            remaining_by_type: remaining_by_type.clone(),
        };

        Ok(Self {
            cells,
            time_slots,
            user_types,
            task_demand,
            capacities,
            capacity_by_type: task_capacity,
            costs,
            availability,
            remaining,
            remaining_by_type,
            initial,
        })
    }

    /// Builds a flattened cost matrix from `f(start, dest, slot, type)`.
    pub fn cost_matrix_from_fn<F>(
        cells: usize,
        time_slots: usize,
        user_types: usize,
        f: F,
    ) -> Vec<f64>
    where
        F: Fn(usize, usize, usize, usize) -> f64,
    {
        let mut costs = Vec::with_capacity(cells * cells * time_slots * user_types);
        for start in 0..cells {
            for dest in 0..cells {
                for slot in 0..time_slots {
                    for user_type in 0..user_types {
                        costs.push(f(start, dest, slot, user_type));
                    }
                }
            }
        }
        costs
    }

    /// Builds a flattened availability table from `f(cell, slot, type)`.
    pub fn availability_from_fn<F>(
        cells: usize,
        time_slots: usize,
        user_types: usize,
        f: F,
    ) -> Vec<u32>
    where
        F: Fn(usize, usize, usize) -> u32,
    {
        let mut availability = Vec::with_capacity(cells * time_slots * user_types);
        for cell in 0..cells {
            for slot in 0..time_slots {
                for user_type in 0..user_types {
                    availability.push(f(cell, slot, user_type));
                }
            }
        }
        availability
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    pub fn time_slots(&self) -> usize {
        self.time_slots
    }

    pub fn user_types(&self) -> usize {
        self.user_types
    }

    /// Tasks required at `cell`.
    #[inline]
    pub fn task_demand(&self, cell: usize) -> u32 {
        self.task_demand[cell]
    }

    /// Sum of demand over all cells.
    pub fn total_demand(&self) -> u64 {
        self.task_demand.iter().map(|&d| u64::from(d)).sum()
    }

    /// Capacity table sorted ascending by capacity.
    pub fn capacities(&self) -> &[TaskCapacity] {
        &self.capacities
    }

    /// Capacity of `user_type`.
    #[inline]
    pub fn capacity(&self, user_type: usize) -> u32 {
        self.capacity_by_type[user_type]
    }

    /// Capacity of the most capable user type.
    #[inline]
    pub fn max_capacity(&self) -> u32 {
        self.capacities.last().map_or(1, |tc| tc.capacity)
    }

    #[inline]
    fn cost_offset(&self, start: usize, dest: usize, slot: usize, user_type: usize) -> usize {
        ((start * self.cells + dest) * self.time_slots + slot) * self.user_types + user_type
    }

    #[inline]
    fn pool_offset(&self, cell: usize, slot: usize, user_type: usize) -> usize {
        (cell * self.time_slots + slot) * self.user_types + user_type
    }

    /// Cost of moving one user of `user_type` from `start` to `dest` at `slot`.
    #[inline]
    pub fn cost(&self, start: usize, dest: usize, slot: usize, user_type: usize) -> f64 {
        self.costs[self.cost_offset(start, dest, slot, user_type)]
    }

    /// Free users of `user_type` at `(cell, slot)`.
    #[inline]
    pub fn available(&self, cell: usize, slot: usize, user_type: usize) -> u32 {
        self.availability[self.pool_offset(cell, slot, user_type)]
    }

    /// Free users across the whole pool.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Free users of `user_type` across all cells and slots.
    #[inline]
    pub fn remaining_of_type(&self, user_type: usize) -> u64 {
        self.remaining_by_type[user_type]
    }

    /// Whether any user of `user_type` is still free somewhere.
    #[inline]
    pub fn is_usable(&self, user_type: usize) -> bool {
        self.remaining_by_type[user_type] > 0
    }

    /// Users in the pool when the run started.
    pub fn initial_total(&self) -> u64 {
        self.initial.remaining
    }

    /// Users of `user_type` at `(cell, slot)` when the run started.
    pub fn initial_available(&self, cell: usize, slot: usize, user_type: usize) -> u32 {
        self.initial.availability[self.pool_offset(cell, slot, user_type)]
    }

    /// Consumes `count` users from `(cell, slot, user_type)`.
    ///
    /// The caller must not take more than [`available`](Self::available)
    /// reports.
    #[inline]
    pub fn take(&mut self, cell: usize, slot: usize, user_type: usize, count: u32) {
        let offset = self.pool_offset(cell, slot, user_type);
        debug_assert!(
            self.availability[offset] >= count,
            "taking {count} users from ({cell}, {slot}, {user_type}) with only {} free",
            self.availability[offset]
        );
        self.availability[offset] -= count;
        self.remaining -= u64::from(count);
        self.remaining_by_type[user_type] -= u64::from(count);
    }

    /// Returns `count` users to `(cell, slot, user_type)`.
    #[inline]
    pub fn give_back(&mut self, cell: usize, slot: usize, user_type: usize, count: u32) {
        let offset = self.pool_offset(cell, slot, user_type);
        self.availability[offset] += count;
        self.remaining += u64::from(count);
        self.remaining_by_type[user_type] += u64::from(count);
    }

    /// Captures the current availability.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            availability: self.availability.clone(),
            remaining: self.remaining,
            remaining_by_type: self.remaining_by_type.clone(),
        }
    }

    /// Restores availability captured by [`snapshot`](Self::snapshot).
    pub fn restore(&mut self, snapshot: &Snapshot) {
        debug_assert_eq!(snapshot.availability.len(), self.availability.len());
        self.availability.clone_from(&snapshot.availability);
        self.remaining = snapshot.remaining;
        self.remaining_by_type.clone_from(&snapshot.remaining_by_type);
    }

    /// Restores the availability the run started with.
    pub fn reset(&mut self) {
        self.availability.clone_from(&self.initial.availability);
        self.remaining = self.initial.remaining;
        self.remaining_by_type
            .clone_from(&self.initial.remaining_by_type);
    }
}

fn check_len(table: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(AllocError::InvalidInstance(format!(
            "{table} has {actual} entries, expected {expected}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_state() -> ResourceState {
        // 2 cells, 2 slots, 2 user types
        let costs = ResourceState::cost_matrix_from_fn(2, 2, 2, |s, d, slot, t| {
            (s * 8 + d * 4 + slot * 2 + t) as f64
        });
        let availability =
            ResourceState::availability_from_fn(2, 2, 2, |c, slot, t| (c + slot + t) as u32);
        ResourceState::new(2, 2, 2, vec![3, 5], vec![4, 1], costs, availability).unwrap()
    }

    #[test]
    fn test_capacities_sorted_ascending() {
        let state = small_state();
        let caps = state.capacities();
        assert_eq!(caps[0], TaskCapacity { user_type: 1, capacity: 1 });
        assert_eq!(caps[1], TaskCapacity { user_type: 0, capacity: 4 });
        assert_eq!(state.capacity(0), 4);
        assert_eq!(state.max_capacity(), 4);
    }

    #[test]
    fn test_flattened_indexing() {
        let state = small_state();
        assert_eq!(state.cost(1, 0, 1, 1), 8.0 + 2.0 + 1.0);
        assert_eq!(state.available(1, 1, 1), 3);
        assert_eq!(state.available(0, 0, 0), 0);
    }

    #[test]
    fn test_totals_match_table() {
        let state = small_state();
        // per entry c + slot + t over {0,1}^3 = 12
        assert_eq!(state.remaining(), 12);
        assert_eq!(state.remaining_of_type(0), 4);
        assert_eq!(state.remaining_of_type(1), 8);
        assert_eq!(state.initial_total(), 12);
        assert_eq!(state.total_demand(), 8);
    }

    #[test]
    fn test_take_and_give_back_keep_totals() {
        let mut state = small_state();
        state.take(1, 1, 1, 2);
        assert_eq!(state.available(1, 1, 1), 1);
        assert_eq!(state.remaining(), 10);
        assert_eq!(state.remaining_of_type(1), 6);

        state.give_back(1, 1, 1, 2);
        assert_eq!(state.available(1, 1, 1), 3);
        assert_eq!(state.remaining(), 12);
    }

    #[test]
    fn test_snapshot_restore_and_reset() {
        let mut state = small_state();
        state.take(1, 0, 0, 1);
        let snap = state.snapshot();
        assert_eq!(snap.remaining(), 11);

        state.take(1, 1, 1, 3);
        assert_eq!(state.remaining_of_type(1), 5);
        state.restore(&snap);
        assert_eq!(state.remaining(), 11);
        assert_eq!(state.available(1, 1, 1), 3);

        state.reset();
        assert_eq!(state.remaining(), 12);
        assert_eq!(state.available(1, 0, 0), 1);
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = ResourceState::new(2, 1, 1, vec![1], vec![1], vec![0.0; 4], vec![0; 2]);
        assert!(matches!(err, Err(AllocError::InvalidInstance(_))));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = ResourceState::new(1, 1, 1, vec![1], vec![0], vec![0.0], vec![1]);
        assert!(matches!(err, Err(AllocError::InvalidInstance(_))));
    }

    #[test]
    fn test_rejects_negative_cost() {
        let err = ResourceState::new(1, 1, 1, vec![1], vec![1], vec![-1.0], vec![1]);
        assert!(matches!(err, Err(AllocError::InvalidInstance(_))));
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let err = ResourceState::new(0, 1, 1, vec![], vec![1], vec![], vec![]);
        assert!(matches!(err, Err(AllocError::InvalidInstance(_))));
    }
}
