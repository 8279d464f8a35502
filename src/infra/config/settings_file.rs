use serde::{Deserialize, Serialize};

use super::settings::Settings;

pub const CURRENT_VERSION: u32 = 1;

/// On-disk layout of `settings.toml`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsFile {
    pub version: u32,
    pub api: Settings,
}

impl SettingsFile {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            version: CURRENT_VERSION,
            api: settings.clone(),
        }
    }
}
