//! Shared cancel flag checked at round boundaries.

use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Flag shared between a caller and the context running its rounds.
///
/// Setting it never interrupts a round; the context checks it when a round
/// ends and before starting the next one.
#[derive(Clone, Default)]
pub struct CancelFlag {
    requested: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of the current run.
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Clears a pending request. Called before a new run starts.
    pub fn clear(&self) {
        self.requested.store(false, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

impl Debug for CancelFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelFlag")
            .field("requested", &self.is_requested())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_and_clear() {
        let flag = CancelFlag::new();
        assert!(!flag.is_requested());

        flag.request();
        assert!(flag.is_requested());

        flag.clear();
        assert!(!flag.is_requested());
    }

    #[test]
    fn clones_share_state() {
        let caller = CancelFlag::new();
        let worker = caller.clone();

        caller.request();
        assert!(worker.is_requested());
    }
}
