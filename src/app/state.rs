use crate::config_state::ConfigState;
use crate::mapping_state::MappingsState;
use crate::notification_state::NotificationState;

/// Root of the client-side state tree.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub mappings: MappingsState,
    pub config: ConfigState,
    pub notifications: NotificationState,
}
