use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::settings_file::{CURRENT_VERSION, SettingsFile};
use crate::config::{Settings, SettingsError};

const SETTINGS_FILE_NAME: &str = "settings.toml";

pub struct TomlSettingsStore {
    path: PathBuf,
}

impl TomlSettingsStore {
    /// Store at `~/.config/etl-console/settings.toml` (platform equivalent).
    pub fn new() -> Result<Self, SettingsError> {
        let config_dir = get_config_dir()?;
        Ok(Self::with_config_dir(&config_dir))
    }

    pub fn with_config_dir(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(SETTINGS_FILE_NAME),
        }
    }

    pub fn with_file(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file yields the defaults.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| SettingsError::Read(e.to_string()))?;

        let file: SettingsFile =
            toml::from_str(&content).map_err(|e| SettingsError::InvalidFormat(e.to_string()))?;

        if file.version != CURRENT_VERSION {
            return Err(SettingsError::VersionMismatch {
                found: file.version,
                expected: CURRENT_VERSION,
            });
        }

        Ok(file.api)
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            fs::create_dir_all(dir).map_err(|e| SettingsError::Write(e.to_string()))?;
        }

        let content = toml::to_string_pretty(&SettingsFile::from_settings(settings))
            .map_err(|e| SettingsError::Write(e.to_string()))?;
        let content_with_header = format!(
            "# etl-console settings\n# WARNING: Password is stored in plain text\n\n{content}"
        );

        fs::write(&self.path, content_with_header)
            .map_err(|e| SettingsError::Write(e.to_string()))?;
        set_file_permissions(&self.path)?;

        Ok(())
    }
}

fn get_config_dir() -> Result<PathBuf, SettingsError> {
    let config_base = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
    Ok(config_base.join("etl-console"))
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), SettingsError> {
    use std::os::unix::fs::PermissionsExt;
    let perms = fs::Permissions::from_mode(0o600);
    fs::set_permissions(path, perms).map_err(|e| SettingsError::Write(e.to_string()))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), SettingsError> {
    Ok(())
}
