//! Single source of truth for [`AppState`].
//!
//! Each dispatch reduces a copy of the current state and publishes the result
//! as a new snapshot, so observers never see a half-applied transition.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

use crate::action::Action;
use crate::effect::Effect;
use crate::reducer::reduce;
use crate::state::AppState;

pub struct Store {
    state: Arc<AppState>,
    tx: watch::Sender<Arc<AppState>>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        let state = Arc::new(initial);
        let (tx, _) = watch::channel(Arc::clone(&state));
        Self { state, tx }
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.tx.subscribe()
    }

    pub fn dispatch(&mut self, action: Action, now: Instant) -> Vec<Effect> {
        let mut next = AppState::clone(&self.state);
        let effects = reduce(&mut next, action, now);
        self.state = Arc::new(next);
        self.tx.send_replace(Arc::clone(&self.state));
        effects
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}
