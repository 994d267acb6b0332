use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "is the view still active" flag.
///
/// Network calls are never cancelled; once the console is torn down their
/// results are dropped instead of being applied to state.
#[derive(Debug, Clone)]
pub struct Liveness {
    active: Arc<AtomicBool>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deactivate_is_shared_between_clones() {
        let liveness = Liveness::new();
        let observer = liveness.clone();

        assert!(observer.is_active());
        liveness.deactivate();
        assert!(!observer.is_active());
    }
}
