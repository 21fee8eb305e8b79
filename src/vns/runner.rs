//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the incumbent plan x and neighborhood size k = k_min
//! 2. While not stopped:
//!    a. **Shaking**: remove a random k-sized share of x's moves,
//!    returning their users to the pool
//!    b. **Repair**: re-cover every destination that lost coverage with
//!    flexible greedy assignment
//!    c. **Move or not**: if f(x') < f(x), compact x' and set x = x',
//!    k = k_min; otherwise restore x and its pool, k = k + 1
//!    d. If k > k_max, reset k = k_min
//! 3. Stop early if a repair runs out of users
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use super::config::VnsConfig;
use super::shake::perturb;
use super::types::VnsOutcome;
use crate::greedy::GreedyConstructor;
use crate::incumbent::Incumbent;
use crate::random::create_rng;
use crate::resources::ResourceState;
use crate::termination::Termination;
use tracing::{debug, info, trace};

/// Variable Neighborhood Search runner.
pub struct VnsRunner;

impl VnsRunner {
    /// Improves `initial` by shaking and greedy repair.
    ///
    /// `state` must match `initial` on entry. On return it matches the
    /// returned best, also when the run ended on resource exhaustion.
    pub fn run(
        state: &mut ResourceState,
        constructor: &GreedyConstructor,
        initial: Incumbent,
        config: &VnsConfig,
        stop: &Termination,
    ) -> VnsOutcome {
        let mut rng = create_rng(config.seed);
        let mut best = initial;
        let mut k = config.k_min;
        let mut iterations = 0usize;
        let mut improvements = 0usize;
        let mut exhausted = false;
        let mut cost_history = Vec::new();

        info!(
            event = "phase_start",
            phase = "VNS",
            moves = best.moves.len(),
            cost = best.cost,
        );

        loop {
            if stop.should_stop() {
                break;
            }
            if config.max_iterations > 0 && iterations >= config.max_iterations {
                break;
            }
            iterations += 1;

            let mut candidate = best.moves.clone();
            let touched = perturb(&mut candidate, state, k, config.min_perturbation, &mut rng);

            let mut repaired = Ok(());
            for &dest in &touched {
                repaired = constructor.assign_flexible(state, &mut candidate, dest);
                if repaired.is_err() {
                    break;
                }
            }
            if let Err(err) = repaired {
                debug!(event = "repair_failed", iteration = iterations, reason = %err);
                state.restore(&best.snapshot);
                exhausted = true;
                break;
            }

            let cost = candidate.objective(state);
            let accepted = best.is_improved_by(cost);
            if accepted {
                candidate.compact(state);
                let previous = best.cost;
                best = Incumbent::capture(candidate, state);
                improvements += 1;
                k = config.k_min;
                debug!(
                    event = "new_best",
                    phase = "VNS",
                    iteration = iterations,
                    cost = best.cost,
                    previous = previous,
                );
            } else {
                state.restore(&best.snapshot);
                k = if k >= config.k_max { config.k_min } else { k + 1 };
            }

            trace!(
                event = "step",
                iteration = iterations,
                touched = touched.len(),
                candidate = cost,
                accepted = accepted,
                k = k,
            );
            cost_history.push(best.cost);
        }

        info!(
            event = "phase_end",
            phase = "VNS",
            iterations = iterations,
            improvements = improvements,
            exhausted = exhausted,
            cost = best.cost,
        );

        VnsOutcome {
            best,
            iterations,
            improvements,
            exhausted,
            cost_history,
        }
    }
}
