//! Shared run state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide run flag shared by the background loops.
pub struct AppState {
    running: AtomicBool,
}

pub type SharedState = Arc<AppState>;

/// Create the shared application state.
pub fn create_state() -> SharedState {
    Arc::new(AppState {
        running: AtomicBool::new(false),
    })
}

impl AppState {
    pub fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_start_stop() {
        let state = create_state();
        assert!(!state.is_running());

        state.start();
        assert!(state.is_running());

        state.stop();
        assert!(!state.is_running());
    }
}
