//! Drives the store: dispatches actions, runs their effects concurrently,
//! and feeds follow-up actions back in arrival order.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::action::Action;
use crate::effect_runner::EffectRunner;
use crate::ports::{ConfigApi, Notification, NotificationSink};
use crate::state::AppState;
use crate::store::Store;

/// Forwards notifications to the outer sink and into the store.
struct StateNotificationSink {
    inner: Arc<dyn NotificationSink>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl NotificationSink for StateNotificationSink {
    fn notify(&self, notification: &Notification) {
        self.inner.notify(notification);
        if self
            .action_tx
            .send(Action::Notify(notification.clone()))
            .is_err()
        {
            debug!("action channel closed, dropping notification");
        }
    }
}

pub struct Runtime {
    store: Store,
    runner: Arc<EffectRunner>,
    in_flight: JoinSet<()>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl Runtime {
    pub fn new(api: Arc<dyn ConfigApi>, notifications: Arc<dyn NotificationSink>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let sink = Arc::new(StateNotificationSink {
            inner: notifications,
            action_tx: action_tx.clone(),
        });
        Self {
            store: Store::default(),
            runner: Arc::new(EffectRunner::new(api, sink, action_tx)),
            in_flight: JoinSet::new(),
            action_rx,
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        self.store.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.store.subscribe()
    }

    /// Applies `action` and spawns its effects. Must be called from within a
    /// Tokio runtime.
    pub fn dispatch(&mut self, action: Action) {
        let effects = self.store.dispatch(action, Instant::now());
        for effect in effects {
            let runner = Arc::clone(&self.runner);
            self.in_flight.spawn(async move { runner.run(effect).await });
        }
    }

    pub fn has_pending_work(&self) -> bool {
        !self.in_flight.is_empty() || !self.action_rx.is_empty()
    }

    /// Runs until no effect is in flight and every follow-up action has been
    /// applied.
    pub async fn settle(&mut self) {
        loop {
            while let Ok(action) = self.action_rx.try_recv() {
                self.dispatch(action);
            }
            if self.in_flight.is_empty() {
                break;
            }
            tokio::select! {
                Some(action) = self.action_rx.recv() => self.dispatch(action),
                Some(joined) = self.in_flight.join_next() => {
                    if let Err(error) = joined {
                        warn!(error = %error, "effect task failed");
                    }
                }
            }
        }
    }
}
