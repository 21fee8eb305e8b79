//! GRASP configuration.

/// Configuration parameters for the GRASP fallback.
///
/// # Examples
///
/// ```
/// use u_workforce::grasp::GraspConfig;
///
/// let config = GraspConfig::default()
///     .with_max_attempts(200)
///     .with_seed(7);
/// assert_eq!(config.max_attempts, 200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspConfig {
    /// Maximum construction attempts. 0 = run until stopped externally.
    pub max_attempts: usize,
    /// Random seed (None draws a fresh one).
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            seed: None,
        }
    }
}

impl GraspConfig {
    /// Sets the maximum number of attempts.
    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grasp_config_defaults() {
        let config = GraspConfig::default();
        assert_eq!(config.max_attempts, 0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_grasp_config_builder() {
        let config = GraspConfig::default().with_max_attempts(10).with_seed(3);
        assert_eq!(config.max_attempts, 10);
        assert_eq!(config.seed, Some(3));
    }
}
