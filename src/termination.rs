//! Cooperative stop conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// When a search loop should stop.
///
/// Combines an external cancellation flag with a wall-clock deadline.
/// Loops poll [`should_stop`](Self::should_stop) once per outer
/// iteration, so an iteration already running always completes.
#[derive(Debug, Clone, Default)]
pub struct Termination {
    cancel: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl Termination {
    /// Never stops on its own; the loop's own limits apply.
    pub fn never() -> Self {
        Self::default()
    }

    /// Stops once `cancel` is set.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Stops `limit` after now.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.deadline = Some(Instant::now() + limit);
        self
    }

    /// Whether either condition has fired.
    pub fn should_stop(&self) -> bool {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Whether anything can ever stop a loop bounded only by this.
    pub fn is_bounded(&self) -> bool {
        self.cancel.is_some() || self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_does_not_stop() {
        let t = Termination::never();
        assert!(!t.should_stop());
        assert!(!t.is_bounded());
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let t = Termination::never().with_cancel(flag.clone());
        assert!(!t.should_stop());
        flag.store(true, Ordering::Relaxed);
        assert!(t.should_stop());
    }

    #[test]
    fn test_deadline() {
        let t = Termination::never().with_time_limit(Duration::ZERO);
        assert!(t.should_stop());
        let t = Termination::never().with_time_limit(Duration::from_secs(3600));
        assert!(!t.should_stop());
        assert!(t.is_bounded());
    }
}
