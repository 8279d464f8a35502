pub mod databases;
pub mod mappings;
pub mod settings;

use std::sync::Arc;

use etl_console_app::action::Action;
use etl_console_app::ports::{ConfigApi, Notification, NotificationSink};
use etl_console_app::runtime::Runtime;
use etl_console_app::state::AppState;
use etl_console_infra::adapters::TracingNotificationSink;

use crate::console::ConsoleNotificationSink;

/// Sends each notification to the terminal and to the log.
struct CommandNotificationSink {
    console: ConsoleNotificationSink,
    log: TracingNotificationSink,
}

impl NotificationSink for CommandNotificationSink {
    fn notify(&self, notification: &Notification) {
        self.log.notify(notification);
        self.console.notify(notification);
    }
}

/// One CLI invocation's view of the store.
pub struct Session {
    runtime: Runtime,
}

impl Session {
    pub fn new(api: Arc<dyn ConfigApi>) -> Self {
        let sink = Arc::new(CommandNotificationSink {
            console: ConsoleNotificationSink,
            log: TracingNotificationSink,
        });
        Self {
            runtime: Runtime::new(api, sink),
        }
    }

    /// Dispatches without waiting for effects.
    pub fn dispatch(&mut self, action: Action) {
        self.runtime.dispatch(action);
    }

    /// Dispatches and waits until every resulting request has settled.
    pub async fn run(&mut self, action: Action) -> Arc<AppState> {
        self.runtime.dispatch(action);
        self.runtime.settle().await;
        self.runtime.state()
    }

    pub fn state(&self) -> Arc<AppState> {
        self.runtime.state()
    }
}
