//! Guard against re-entrant submission of the same user action.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Open/closed flag for one user-facing action.
///
/// A front end acquires a [`InFlight`] guard before issuing a network call
/// and shows the action as disabled while the guard lives. Dropping the guard
/// re-opens the gate whether the call succeeded or failed.
#[derive(Debug, Clone, Default)]
pub struct ActionGate {
    busy: Arc<AtomicBool>,
}

/// RAII guard returned by [`ActionGate::try_begin`].
#[derive(Debug)]
pub struct InFlight {
    busy: Arc<AtomicBool>,
}

impl ActionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes the gate, or returns `None` if a call is already in flight.
    pub fn try_begin(&self) -> Option<InFlight> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
