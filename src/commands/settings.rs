use color_eyre::eyre::{Result, bail};

use etl_console_infra::adapters::TomlSettingsStore;
use etl_console_infra::config::Settings;

use crate::cli::SettingsCommand;
use crate::console::write_out;

pub fn run(
    store: &TomlSettingsStore,
    effective: &Settings,
    command: SettingsCommand,
) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            write_out(&render(store, effective))?;
            Ok(())
        }
        SettingsCommand::Init { force } => {
            if store.path().exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    store.path().display()
                );
            }
            store.save(&Settings::default())?;
            write_out(&format!("Wrote {}", store.path().display()))?;
            Ok(())
        }
    }
}

fn render(store: &TomlSettingsStore, settings: &Settings) -> String {
    let password = if settings.password.is_some() { "********" } else { "" };
    format!(
        "file: {}\nbase_url: {}\ntimeout_secs: {}\nusername: {}\npassword: {password}",
        store.path().display(),
        settings.base_url,
        settings.timeout_secs,
        settings.username.as_deref().unwrap_or_default(),
    )
}
