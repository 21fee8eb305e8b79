//! Resource state and cost lookup.
//!
//! [`ResourceState`] owns everything a run mutates (the availability pool
//! and its running totals) next to everything it only reads (costs, task
//! demand, task capacities). [`CostIndex`] answers "where is the cheapest
//! free user for this destination?" against it.

mod cost_index;
mod state;

pub use cost_index::{CostIndex, Source};
pub use state::{ResourceState, Snapshot, TaskCapacity};
