use tracing::{info, warn};

use etl_console_app::ports::{Notification, NotificationKind, NotificationSink};

/// Writes every request notification to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: &Notification) {
        let id = notification.id;
        let message = notification.message.as_str();
        match notification.kind {
            NotificationKind::Pending => info!(notification_id = %id, "{message}"),
            NotificationKind::Success => {
                info!(notification_id = %id, outcome = "success", "{message}")
            }
            NotificationKind::Error => {
                warn!(notification_id = %id, outcome = "error", "{message}")
            }
        }
    }
}
