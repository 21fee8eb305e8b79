//! Allocation solver.
//!
//! Wires the strategies together the way a full run uses them:
//!
//! 1. Greedy construction from the initial pool.
//! 2. VNS over the constructed plan until stopped.
//! 3. On resource exhaustion in either step, a permanent switch to
//!    repeated GRASP construction against the users the best plan so far
//!    draws, each attempt from the untouched initial pool.
//!
//! Stopping is cooperative: a cancellation token and a wall-clock budget
//! are polled once per iteration. The run never fails on exhaustion; it
//! returns the best plan found within the budget.

mod config;
mod runner;
mod sink;

pub use config::SolverConfig;
pub use runner::{AllocationResult, AllocationSolver, Strategy};
pub use sink::SolutionSink;
