//! Greedy Randomized Adaptive Search Procedure (GRASP) fallback.
//!
//! Used once an instance proves too tight for VNS repair: total demand
//! is close to (or above) the users available, so local repairs keep
//! running out of users. GRASP instead rebuilds the whole plan from the
//! untouched initial pool on every attempt, visiting destination cells in
//! a random order and drawing, per cell, the per-type user counts the
//! best-known plan used there.
//!
//! # References
//!
//! - Feo, T. A. & Resende, M. G. C. (1995). "Greedy randomized adaptive
//!   search procedures", *Journal of Global Optimization* 6(2), 109-133.

mod config;
mod runner;
mod types;

pub use config::GraspConfig;
pub use runner::{GraspOutcome, GraspRunner};
pub use types::Requirements;
