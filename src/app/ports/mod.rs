pub mod config_api;
pub mod notification_sink;

pub use config_api::{ApiError, ConfigApi};
pub use notification_sink::{Notification, NotificationId, NotificationKind, NotificationSink};

#[cfg(test)]
pub use config_api::MockConfigApi;
