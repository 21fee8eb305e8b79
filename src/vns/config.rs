//! Variable Neighborhood Search configuration.

/// Configuration parameters for Variable Neighborhood Search.
///
/// The neighborhood size `k` runs over `k_min..=k_max`; a shake at size `k`
/// removes `(moves / 6) * k / 100` moves, never fewer than
/// `min_perturbation`.
///
/// # Examples
///
/// ```
/// use u_workforce::vns::VnsConfig;
///
/// let config = VnsConfig::default()
///     .with_neighborhoods(3, 12)
///     .with_max_iterations(1000);
/// assert_eq!(config.k_min, 3);
/// assert_eq!(config.k_max, 12);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VnsConfig {
    /// Smallest neighborhood size, used after every improvement.
    pub k_min: usize,
    /// Largest neighborhood size before wrapping back to `k_min`.
    pub k_max: usize,
    /// Minimum number of moves removed per shake.
    pub min_perturbation: usize,
    /// Maximum number of iterations. 0 = run until stopped externally.
    pub max_iterations: usize,
    /// Random seed (None draws a fresh one).
    pub seed: Option<u64>,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            k_min: 5,
            k_max: 25,
            min_perturbation: 1,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl VnsConfig {
    /// Sets the neighborhood size range.
    pub fn with_neighborhoods(mut self, k_min: usize, k_max: usize) -> Self {
        self.k_min = k_min;
        self.k_max = k_max;
        self
    }

    /// Sets the minimum number of moves removed per shake.
    pub fn with_min_perturbation(mut self, n: usize) -> Self {
        self.min_perturbation = n;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.k_min == 0 {
            return Err("k_min must be at least 1".into());
        }
        if self.k_min > self.k_max {
            return Err(format!(
                "k_min ({}) must not exceed k_max ({})",
                self.k_min, self.k_max
            ));
        }
        if self.k_max > 100 {
            return Err(format!("k_max must be at most 100, got {}", self.k_max));
        }
        Ok(())
    }
}
