//! Top-level allocation driver.

use super::config::SolverConfig;
use super::sink::SolutionSink;
use crate::error::{AllocError, Result};
use crate::grasp::{GraspConfig, GraspRunner, Requirements};
use crate::greedy::GreedyConstructor;
use crate::incumbent::Incumbent;
use crate::moves::MoveList;
use crate::resources::{CostIndex, ResourceState};
use crate::termination::Termination;
use crate::vns::{VnsConfig, VnsRunner};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Strategy that produced the final plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Greedy construction refined by VNS.
    Vns,
    /// GRASP fallback after resource exhaustion.
    Grasp,
}

/// Result of an allocation run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationResult {
    /// The best plan found.
    pub moves: MoveList,
    /// Its objective value.
    pub objective: f64,
    /// Wall-clock time of the run.
    pub elapsed_ms: u64,
    /// Strategy active when the run ended.
    pub strategy: Strategy,
    /// VNS iterations executed.
    pub vns_iterations: usize,
    /// GRASP attempts started.
    pub grasp_attempts: usize,
    /// Users drawn per user type by the best plan.
    pub users_by_type: Vec<u64>,
    /// Best objective after construction and after every later iteration.
    pub cost_history: Vec<f64>,
}

/// Runs greedy construction, VNS and the GRASP fallback in sequence.
pub struct AllocationSolver;

impl AllocationSolver {
    /// Solves with the configured limits.
    pub fn solve(state: &mut ResourceState, config: &SolverConfig) -> Result<AllocationResult> {
        Self::solve_with_cancel(state, config, None)
    }

    /// Solves with an optional cancellation token.
    ///
    /// The search always starts from the initial pool of `state`. The token
    /// and the time limit are checked once per iteration; an iteration in
    /// flight completes first. On return `state` holds the pool left by the
    /// returned plan.
    ///
    /// # Errors
    ///
    /// [`AllocError::Config`] if `config` is invalid or nothing would ever
    /// stop the search. Resource exhaustion is never returned: it switches
    /// the run to GRASP, and the best plan found so far is kept.
    pub fn solve_with_cancel(
        state: &mut ResourceState,
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AllocationResult> {
        config.validate().map_err(AllocError::Config)?;

        let mut stop = Termination::never();
        if let Some(flag) = cancel {
            stop = stop.with_cancel(flag);
        }
        if let Some(ms) = config.time_limit_ms {
            stop = stop.with_time_limit(Duration::from_millis(ms));
        }
        if !stop.is_bounded() && (config.vns.max_iterations == 0 || config.grasp.max_attempts == 0)
        {
            return Err(AllocError::Config(
                "no time limit, cancellation token or iteration limits: the search would never stop"
                    .into(),
            ));
        }

        let start = Instant::now();
        let constructor = GreedyConstructor::new(CostIndex::new(config.parallel));
        state.reset();

        info!(
            event = "phase_start",
            phase = "Solver",
            cells = state.cells(),
            time_slots = state.time_slots(),
            user_types = state.user_types(),
            demand = state.total_demand(),
            users = state.remaining(),
            parallel = constructor.index().is_parallel(),
        );

        let mut moves = MoveList::new();
        let built = constructor.construct(state, &mut moves);
        moves.compact(state);
        let mut best = Incumbent::capture(moves, state);
        let mut cost_history = vec![best.cost];

        let mut exhausted = match built {
            Ok(()) => false,
            Err(err) if err.is_exhaustion() => {
                warn!(
                    event = "strategy_switch",
                    from = "Greedy Construction",
                    to = "GRASP",
                    reason = %err,
                );
                true
            }
            Err(err) => return Err(err),
        };

        let mut vns_iterations = 0;
        if !exhausted {
            let vns_config = VnsConfig {
                seed: config.vns_seed(),
                ..config.vns.clone()
            };
            let outcome = VnsRunner::run(state, &constructor, best, &vns_config, &stop);
            vns_iterations = outcome.iterations;
            cost_history.extend(outcome.cost_history);
            best = outcome.best;
            if outcome.exhausted {
                warn!(
                    event = "strategy_switch",
                    from = "VNS",
                    to = "GRASP",
                    iteration = vns_iterations,
                );
                exhausted = true;
            }
        }

        let mut grasp_attempts = 0;
        if exhausted {
            let requirements =
                Requirements::from_moves(&best.moves, state.cells(), state.user_types());
            let grasp_config = GraspConfig {
                seed: config.grasp_seed(),
                ..config.grasp.clone()
            };
            let outcome = GraspRunner::run(
                state,
                constructor.index(),
                &requirements,
                best,
                &grasp_config,
                &stop,
            );
            grasp_attempts = outcome.attempts;
            cost_history.extend(outcome.cost_history);
            best = outcome.best;
        }

        let strategy = if exhausted {
            Strategy::Grasp
        } else {
            Strategy::Vns
        };
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let users_by_type = best.moves.users_by_type(state.user_types());

        info!(
            event = "phase_end",
            phase = "Solver",
            strategy = ?strategy,
            moves = best.moves.len(),
            objective = best.cost,
            users_by_type = ?users_by_type,
            users_left = state.remaining(),
            elapsed_ms = elapsed_ms,
        );

        Ok(AllocationResult {
            moves: best.moves,
            objective: best.cost,
            elapsed_ms,
            strategy,
            vns_iterations,
            grasp_attempts,
            users_by_type,
            cost_history,
        })
    }

    /// Solves and hands the best plan to `sink`, exactly once.
    pub fn solve_into<S: SolutionSink>(
        state: &mut ResourceState,
        config: &SolverConfig,
        label: &str,
        sink: &mut S,
    ) -> Result<AllocationResult> {
        let result = Self::solve(state, config)?;
        sink.emit(&result.moves, result.objective, result.elapsed_ms, label);
        Ok(result)
    }
}
