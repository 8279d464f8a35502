use std::sync::Arc;

use color_eyre::eyre::{Result, bail, eyre};

use etl_console_app::action::Action;
use etl_console_app::messages::{DELETE_DATABASE_DESCRIPTION, DELETE_DATABASE_TITLE};
use etl_console_app::state::AppState;
use etl_console_domain::{ConnectionTestOutcome, Database, DatabaseField, LocalId};

use super::Session;
use super::mappings::last_request_succeeded;
use crate::cli::DatabasesCommand;
use crate::console::{confirm, render_database_row, render_errors, write_out};

pub async fn run(session: &mut Session, command: DatabasesCommand) -> Result<()> {
    match command {
        DatabasesCommand::List => list(session).await,
        DatabasesCommand::Add {
            name,
            db_type,
            url,
            user,
            password,
            query,
        } => {
            // Type first: selecting it fills in the default URL.
            let mut assignments = vec![
                (DatabaseField::Name, name),
                (DatabaseField::Type, db_type),
                (DatabaseField::User, user),
                (DatabaseField::Password, password),
            ];
            assignments.extend(url.map(|v| (DatabaseField::Url, v)));
            assignments.extend(query.map(|v| (DatabaseField::Query, v)));
            add(session, assignments).await
        }
        DatabasesCommand::Update { name, fields } => {
            update(session, &name, fields.assignments).await
        }
        DatabasesCommand::Save { services } => save_services(session, services).await,
        DatabasesCommand::Delete { name, confirm } => delete(session, &name, confirm.yes).await,
        DatabasesCommand::Test { name } => test(session, &name).await,
    }
}

async fn list(session: &mut Session) -> Result<()> {
    let state = session.run(Action::FetchConfig).await;
    let mut lines = vec![format!("services: {}", state.config.services)];
    lines.extend(state.config.databases.iter().map(render_database_row));
    write_out(&lines.join("\n"))?;
    Ok(())
}

async fn add(session: &mut Session, assignments: Vec<(DatabaseField, String)>) -> Result<()> {
    session.run(Action::FetchConfig).await;
    session.dispatch(Action::AddDatabase);
    let local_id = session
        .state()
        .config
        .databases
        .last()
        .map(|d| d.local_id)
        .ok_or_else(|| eyre!("failed to add a database draft"))?;

    edit(session, local_id, assignments);
    let state = save(session, local_id).await?;
    if state.config.find(local_id).is_some_and(Database::is_confirmed) {
        write_out("Configuration saved")?;
        Ok(())
    } else {
        bail!("database was not saved")
    }
}

async fn update(
    session: &mut Session,
    name: &str,
    assignments: Vec<(DatabaseField, String)>,
) -> Result<()> {
    let local_id = load(session, name).await?.local_id;

    edit(session, local_id, assignments);
    let state = save(session, local_id).await?;
    if last_request_succeeded(&state) {
        write_out("Configuration saved")?;
        Ok(())
    } else {
        bail!("configuration was not saved")
    }
}

async fn save_services(session: &mut Session, services: Option<String>) -> Result<()> {
    session.run(Action::FetchConfig).await;
    if let Some(services) = services {
        session.dispatch(Action::UpdateServices(services));
    }

    let state = session.run(Action::SaveConfig).await;
    let invalid: Vec<String> = state
        .config
        .databases
        .iter()
        .filter_map(|d| {
            d.errors
                .as_ref()
                .map(|errors| format!("{}:\n{}", d.name, render_errors(errors)))
        })
        .collect();
    if !invalid.is_empty() {
        bail!("configuration is invalid:\n{}", invalid.join("\n"));
    }
    if !last_request_succeeded(&state) {
        bail!("configuration was not saved");
    }
    Ok(())
}

async fn delete(session: &mut Session, name: &str, assume_yes: bool) -> Result<()> {
    let local_id = load(session, name).await?.local_id;

    let state = session.run(Action::RequestDatabaseDelete(local_id)).await;
    if !state.config.deletion.is_pending() {
        bail!("database {name} cannot be deleted");
    }
    if !assume_yes && !confirm(DELETE_DATABASE_TITLE, DELETE_DATABASE_DESCRIPTION)? {
        session.run(Action::DenyDatabaseDelete).await;
        write_out("Cancelled")?;
        return Ok(());
    }

    let state = session.run(Action::ConfirmDatabaseDelete).await;
    if state.config.find(local_id).is_some() {
        bail!("database {name} was not deleted");
    }
    Ok(())
}

async fn test(session: &mut Session, name: &str) -> Result<()> {
    let local_id = load(session, name).await?.local_id;

    let state = session.run(Action::TestDatabase(local_id)).await;
    match state.config.find(local_id).and_then(|d| d.test_result) {
        Some(outcome @ ConnectionTestOutcome::Success) => {
            write_out(&format!("{name}: {outcome}"))?;
            Ok(())
        }
        Some(outcome) => bail!("{name}: {outcome}"),
        None => bail!("database {name} could not be tested"),
    }
}

async fn load(session: &mut Session, name: &str) -> Result<Database> {
    let state = session.run(Action::FetchConfig).await;
    state
        .config
        .find_by_name(name)
        .cloned()
        .ok_or_else(|| eyre!("database {name} not found"))
}

fn edit(session: &mut Session, local_id: LocalId, assignments: Vec<(DatabaseField, String)>) {
    for (field, value) in assignments {
        session.dispatch(Action::UpdateDatabaseField {
            local_id,
            field,
            value,
        });
    }
}

/// Saves the whole configuration and fails with the entity's field errors
/// if validation rejected it.
async fn save(session: &mut Session, local_id: LocalId) -> Result<Arc<AppState>> {
    let state = session.run(Action::SaveConfig).await;
    if let Some(errors) = state.config.find(local_id).and_then(|d| d.errors.as_ref()) {
        bail!("database is invalid:\n{}", render_errors(errors));
    }
    Ok(state)
}
