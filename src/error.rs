//! Error types for allocation runs.

use thiserror::Error;

/// Errors raised while building or searching an allocation plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    /// A construction step needed a user but none were left anywhere
    /// usable for the destination.
    ///
    /// Never fatal: the VNS driver reacts by switching to GRASP, and GRASP
    /// reacts by discarding the attempt and retrying from the snapshot.
    #[error("resource exhaustion: {unmet} tasks left uncovered at cell {cell}")]
    ResourceExhaustion {
        /// Destination cell being served when users ran out.
        cell: usize,
        /// Tasks still uncovered at that cell.
        unmet: u32,
    },

    /// The instance tables do not describe a consistent resource state.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// A configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AllocError {
    /// Whether this is the recoverable exhaustion condition.
    pub fn is_exhaustion(&self) -> bool {
        matches!(self, AllocError::ResourceExhaustion { .. })
    }
}

/// Result alias for allocation operations.
pub type Result<T> = std::result::Result<T, AllocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustion_display() {
        let err = AllocError::ResourceExhaustion { cell: 3, unmet: 7 };
        assert_eq!(
            err.to_string(),
            "resource exhaustion: 7 tasks left uncovered at cell 3"
        );
        assert!(err.is_exhaustion());
    }

    #[test]
    fn test_other_errors_not_exhaustion() {
        assert!(!AllocError::InvalidInstance("x".into()).is_exhaustion());
        assert!(!AllocError::Config("y".into()).is_exhaustion());
    }
}
