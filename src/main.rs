mod cli;
mod commands;
mod console;
mod error;

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use etl_console_infra::adapters::{HttpConfigApi, TomlSettingsStore};
use etl_console_infra::config::Settings;

use cli::{Args, Command};
use commands::Session;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    error::install_hooks()?;

    let args = Args::parse();
    init_tracing(args.verbose);

    let store = match &args.settings {
        Some(path) => TomlSettingsStore::with_file(path.clone()),
        None => TomlSettingsStore::new()?,
    };
    let settings = load_settings(&store, args.base_url.as_deref())?;
    debug!(base_url = %settings.base_url, timeout_secs = settings.timeout_secs, "settings loaded");

    match args.command {
        Command::Settings(command) => commands::settings::run(&store, &settings, command),
        Command::Mappings(command) => {
            let mut session = connect(&settings)?;
            commands::mappings::run(&mut session, command).await
        }
        Command::Databases(command) => {
            let mut session = connect(&settings)?;
            commands::databases::run(&mut session, command).await
        }
    }
}

/// File, then environment, then command-line flags.
fn load_settings(store: &TomlSettingsStore, base_url: Option<&str>) -> Result<Settings> {
    let mut settings = store
        .load()
        .wrap_err_with(|| format!("failed to load {}", store.path().display()))?;
    settings.apply_process_env()?;
    if let Some(base_url) = base_url {
        settings.base_url = base_url.to_string();
    }
    Ok(settings)
}

fn connect(settings: &Settings) -> Result<Session> {
    let api = HttpConfigApi::new(settings)?;
    Ok(Session::new(Arc::new(api)))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
