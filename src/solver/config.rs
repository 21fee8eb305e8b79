//! Solver configuration.

use crate::grasp::GraspConfig;
use crate::vns::VnsConfig;

/// Configuration for a full allocation run.
///
/// # Examples
///
/// ```
/// use u_workforce::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_time_limit_ms(2_000)
///     .with_seed(42);
/// assert_eq!(config.time_limit_ms, Some(2_000));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// VNS parameters.
    pub vns: VnsConfig,
    /// GRASP fallback parameters.
    pub grasp: GraspConfig,
    /// Wall-clock budget in milliseconds. `None` relies on cancellation or
    /// the iteration limits alone.
    pub time_limit_ms: Option<u64>,
    /// Seed for both strategies, unless they carry their own.
    pub seed: Option<u64>,
    /// Scan sources in parallel in the cost index (needs the `parallel`
    /// feature).
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            vns: VnsConfig::default(),
            grasp: GraspConfig::default(),
            time_limit_ms: Some(5_000),
            seed: None,
            parallel: true,
        }
    }
}

impl SolverConfig {
    /// Sets the VNS parameters.
    pub fn with_vns(mut self, vns: VnsConfig) -> Self {
        self.vns = vns;
        self
    }

    /// Sets the GRASP parameters.
    pub fn with_grasp(mut self, grasp: GraspConfig) -> Self {
        self.grasp = grasp;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Removes the wall-clock budget.
    pub fn without_time_limit(mut self) -> Self {
        self.time_limit_ms = None;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables the parallel cost index scan.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.vns.validate()?;
        self.grasp.validate()?;
        Ok(())
    }

    /// Seed for the VNS phase.
    pub(crate) fn vns_seed(&self) -> Option<u64> {
        self.vns.seed.or(self.seed)
    }

    /// Seed for the GRASP phase, distinct from the VNS one.
    pub(crate) fn grasp_seed(&self) -> Option<u64> {
        self.grasp.seed.or(self.seed.map(|s| s.wrapping_add(1)))
    }
}
