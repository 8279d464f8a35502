pub mod settings;
pub mod settings_file;

pub use settings::{Settings, SettingsError};
