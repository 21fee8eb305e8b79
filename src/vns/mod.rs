//! Variable Neighborhood Search (VNS).
//!
//! Local search over complete allocation plans. Each iteration shakes the
//! best plan by removing a random share of its moves, whose size grows
//! with the neighborhood index `k`, then repairs the uncovered cells with
//! flexible greedy assignment. An improving plan is compacted and becomes
//! the new best, and `k` drops back to its minimum; otherwise the best
//! plan and its pool are restored and `k` grows, wrapping at `k_max`.
//!
//! A repair that runs out of users ends the run with
//! [`VnsOutcome::exhausted`] set, which the solver answers by switching to
//! [GRASP](crate::grasp).
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.
//! - Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//!   Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

mod config;
mod runner;
mod shake;
mod types;

pub use config::VnsConfig;
pub use runner::VnsRunner;
pub use shake::perturb;
pub use types::VnsOutcome;
