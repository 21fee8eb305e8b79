//! GRASP execution loop.

use super::config::GraspConfig;
use super::types::Requirements;
use crate::error::{AllocError, Result};
use crate::incumbent::Incumbent;
use crate::moves::{Move, MoveList};
use crate::random::create_rng;
use crate::resources::{CostIndex, ResourceState};
use crate::termination::Termination;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, trace};

/// Result of a GRASP run.
#[derive(Debug, Clone)]
pub struct GraspOutcome {
    /// Best solution found, possibly the incumbent passed in.
    pub best: Incumbent,
    /// Construction attempts started.
    pub attempts: usize,
    /// Attempts that covered every requirement.
    pub completed: usize,
    /// Attempts that beat the best-known cost.
    pub improvements: usize,
    /// Best cost after each attempt.
    pub cost_history: Vec<f64>,
}

/// GRASP runner.
pub struct GraspRunner;

impl GraspRunner {
    /// Builds one plan drawing exactly the users in `requirements`.
    ///
    /// Cells with demand are visited in a random order; at each, every
    /// user type's requirement is drawn from its cheapest sources until it
    /// is met or the cell's demand is covered.
    ///
    /// # Errors
    ///
    /// [`AllocError::ResourceExhaustion`] when a requirement cannot be
    /// drawn. The partial plan is discarded; `state` is left as the attempt
    /// left it and should be reset before the next one.
    pub fn construct<R: Rng>(
        state: &mut ResourceState,
        index: &CostIndex,
        requirements: &Requirements,
        rng: &mut R,
    ) -> Result<MoveList> {
        let mut cells: Vec<usize> = (0..state.cells())
            .filter(|&cell| state.task_demand(cell) > 0)
            .collect();
        cells.shuffle(rng);

        let mut moves = MoveList::with_capacity(cells.len() * state.user_types());
        for &dest in &cells {
            let mut need = state.task_demand(dest);
            for i in 0..state.capacities().len() {
                let tc = state.capacities()[i];
                let mut wanted = requirements.get(dest, tc.user_type);

                while wanted > 0 && need > 0 {
                    let src = index.min_for_type(state, dest, tc.user_type).ok_or(
                        AllocError::ResourceExhaustion {
                            cell: dest,
                            unmet: need,
                        },
                    )?;
                    let users = wanted.min(state.available(src.cell, src.slot, tc.user_type));
                    let tasks = need.min(users.saturating_mul(tc.capacity));

                    state.take(src.cell, src.slot, tc.user_type, users);
                    let mv = Move::new(src.cell, dest, src.slot, tc.user_type, users, tasks);
                    moves.push(mv);
                    wanted -= users;
                    need -= tasks;
                }
            }
        }
        Ok(moves)
    }

    /// Repeats [`construct`](Self::construct) from the initial pool until
    /// stopped, keeping the cheapest complete plan.
    ///
    /// `incumbent` is the plan to beat. On return `state` matches the
    /// returned best.
    pub fn run(
        state: &mut ResourceState,
        index: &CostIndex,
        requirements: &Requirements,
        incumbent: Incumbent,
        config: &GraspConfig,
        stop: &Termination,
    ) -> GraspOutcome {
        let mut rng = create_rng(config.seed);
        let mut best = incumbent;
        let mut attempts = 0usize;
        let mut completed = 0usize;
        let mut improvements = 0usize;
        let mut cost_history = Vec::new();

        info!(
            event = "phase_start",
            phase = "GRASP",
            required_users = requirements.total(),
            incumbent = best.cost,
        );

        loop {
            if stop.should_stop() {
                break;
            }
            if config.max_attempts > 0 && attempts >= config.max_attempts {
                break;
            }
            attempts += 1;

            state.reset();
            match Self::construct(state, index, requirements, &mut rng) {
                Ok(mut moves) => {
                    completed += 1;
                    moves.compact(state);
                    let cost = moves.objective(state);
                    if best.is_improved_by(cost) {
                        debug!(
                            event = "new_best",
                            phase = "GRASP",
                            attempt = attempts,
                            cost = cost,
                            previous = best.cost,
                        );
                        best = Incumbent::capture(moves, state);
                        improvements += 1;
                    }
                }
                Err(err) => {
                    trace!(event = "attempt_failed", attempt = attempts, reason = %err);
                }
            }
            cost_history.push(best.cost);
        }

        state.restore(&best.snapshot);

        info!(
            event = "phase_end",
            phase = "GRASP",
            attempts = attempts,
            completed = completed,
            improvements = improvements,
            cost = best.cost,
        );

        GraspOutcome {
            best,
            attempts,
            completed,
            improvements,
            cost_history,
        }
    }
}
