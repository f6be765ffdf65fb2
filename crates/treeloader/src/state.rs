use tracing::{info, warn};
use treeloader_core::LoadState;
use treeloader_events::{EventBus, LoadEvent};
use treeloader_platform::Mutex;

/// Current [`LoadState`] of an attempt, published on every change.
#[derive(Debug)]
pub struct StateTracker {
    state: Mutex<LoadState>,
    events: EventBus,
}

impl StateTracker {
    pub fn new(events: EventBus) -> Self {
        Self {
            state: Mutex::new(LoadState::Idle),
            events,
        }
    }

    pub fn current(&self) -> LoadState {
        self.state.lock().clone()
    }

    /// Move to `next`. Illegal transitions are logged and ignored.
    pub fn advance(&self, next: LoadState) -> bool {
        let mut state = self.state.lock();
        if !state.can_transition_to(&next) {
            warn!(from = %*state, to = %next, "ignoring illegal state transition");
            return false;
        }
        info!(from = %*state, to = %next, "load state");
        let from = std::mem::replace(&mut *state, next.clone());
        drop(state);

        self.events.publish(LoadEvent::StateChanged { from, to: next });
        true
    }

    /// Start a fresh attempt.
    pub fn reset(&self) {
        *self.state.lock() = LoadState::Idle;
    }
}
