//! Workforce allocation optimizer.
//!
//! Assigns pools of typed users, available in `(cell, time slot)` buckets,
//! to per-cell task demand at minimum movement cost:
//!
//! - **Resources**: the availability pool with running totals, the
//!   immutable cost matrix, and the cost index that finds the cheapest
//!   free user for a destination.
//! - **Partition**: minimum-user splitting of a task quantity over user
//!   capacities (minimum coin change with overshoot).
//! - **Moves**: the flat move-list solution, its objective, and
//!   compaction of duplicate moves.
//! - **Greedy**: construction of a complete plan, exact-split where the
//!   demand allows it and flexible with overbooking repair elsewhere.
//! - **VNS**: Variable Neighborhood Search over plans with greedy repair.
//! - **GRASP**: randomized reconstruction, the fallback for instances
//!   where users run out.
//! - **Solver**: the driver chaining the above under a deadline.
//!
//! # Example
//!
//! ```
//! use u_workforce::resources::ResourceState;
//! use u_workforce::solver::{AllocationSolver, SolverConfig};
//! use u_workforce::vns::VnsConfig;
//! use u_workforce::grasp::GraspConfig;
//!
//! // 2 cells, 1 slot, 1 user type of capacity 2; 6 users at cell 1,
//! // 4 tasks at cell 0
//! let costs = ResourceState::cost_matrix_from_fn(2, 1, 1, |s, d, _, _| {
//!     if s == 1 && d == 0 { 3.0 } else { 0.0 }
//! });
//! let mut state = ResourceState::new(2, 1, 1, vec![4, 0], vec![2], costs, vec![0, 6])?;
//!
//! let config = SolverConfig::default()
//!     .without_time_limit()
//!     .with_vns(VnsConfig::default().with_max_iterations(10))
//!     .with_grasp(GraspConfig::default().with_max_attempts(10))
//!     .with_seed(1);
//! let result = AllocationSolver::solve(&mut state, &config)?;
//! assert_eq!(result.objective, 6.0);
//! # Ok::<(), u_workforce::AllocError>(())
//! ```

pub mod error;
pub mod grasp;
pub mod greedy;
pub mod moves;
pub mod partition;
pub mod resources;
pub mod solver;
pub mod verify;
pub mod vns;

mod incumbent;
mod random;
mod termination;

pub use error::{AllocError, Result};
pub use incumbent::Incumbent;
pub use moves::{Move, MoveList};
pub use resources::ResourceState;
pub use solver::{AllocationResult, AllocationSolver, SolverConfig, Strategy};
pub use termination::Termination;
