pub mod http_config_api;
pub mod settings_store;
pub mod tracing_notification_sink;

pub use http_config_api::HttpConfigApi;
pub use settings_store::TomlSettingsStore;
pub use tracing_notification_sink::TracingNotificationSink;
