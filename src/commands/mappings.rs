use color_eyre::eyre::{Result, bail, eyre};

use etl_console_app::action::Action;
use etl_console_app::messages::{DELETE_MAPPING_DESCRIPTION, DELETE_MAPPING_TITLE};
use etl_console_app::ports::NotificationKind;
use etl_console_app::state::AppState;
use etl_console_app::test_result_view::{TestResultView, mapping_test_eligibility};
use etl_console_domain::{LocalId, Mapping, MappingField, MappingId};

use super::Session;
use crate::cli::MappingsCommand;
use crate::console::{confirm, render_errors, render_mapping_row, render_test_view, write_out};

pub async fn run(session: &mut Session, command: MappingsCommand) -> Result<()> {
    match command {
        MappingsCommand::List => list(session).await,
        MappingsCommand::Create {
            name,
            source,
            fields,
        } => {
            let mut assignments = Vec::new();
            assignments.extend(name.map(|v| (MappingField::Name, v)));
            assignments.extend(source.map(|v| (MappingField::Source, v)));
            assignments.extend(fields.assignments);
            create(session, assignments).await
        }
        MappingsCommand::Update { id, fields } => {
            update(session, MappingId::new(id), fields.assignments).await
        }
        MappingsCommand::Delete { id, confirm } => {
            delete(session, MappingId::new(id), confirm.yes).await
        }
        MappingsCommand::Test { id } => test(session, MappingId::new(id)).await,
    }
}

async fn list(session: &mut Session) -> Result<()> {
    let state = session.run(Action::FetchMappings).await;
    let rows: Vec<String> = state.mappings.items.iter().map(render_mapping_row).collect();
    write_out(&rows.join("\n"))?;
    Ok(())
}

async fn create(session: &mut Session, assignments: Vec<(MappingField, String)>) -> Result<()> {
    session.dispatch(Action::AddMapping);
    let local_id = session
        .state()
        .mappings
        .items
        .last()
        .map(|m| m.local_id)
        .ok_or_else(|| eyre!("failed to add a mapping draft"))?;

    let state = submit(session, local_id, assignments).await?;
    match state.mappings.find(local_id).and_then(|m| m.id) {
        Some(id) => {
            write_out(&format!("Created mapping {id}"))?;
            Ok(())
        }
        None => bail!("mapping was not created"),
    }
}

async fn update(
    session: &mut Session,
    id: MappingId,
    assignments: Vec<(MappingField, String)>,
) -> Result<()> {
    let local_id = load(session, id).await?.local_id;

    let state = submit(session, local_id, assignments).await?;
    if last_request_succeeded(&state) {
        write_out(&format!("Updated mapping {id}"))?;
        Ok(())
    } else {
        bail!("mapping {id} was not updated")
    }
}

async fn delete(session: &mut Session, id: MappingId, assume_yes: bool) -> Result<()> {
    let local_id = load(session, id).await?.local_id;

    let state = session.run(Action::RequestMappingDelete(local_id)).await;
    if !state.mappings.deletion.is_pending() {
        bail!("mapping {id} cannot be deleted");
    }
    if !assume_yes && !confirm(DELETE_MAPPING_TITLE, DELETE_MAPPING_DESCRIPTION)? {
        session.run(Action::DenyMappingDelete).await;
        write_out("Cancelled")?;
        return Ok(());
    }

    let state = session.run(Action::ConfirmMappingDelete).await;
    if state.mappings.find(local_id).is_some() {
        bail!("mapping {id} was not deleted");
    }
    Ok(())
}

async fn test(session: &mut Session, id: MappingId) -> Result<()> {
    let mapping = load(session, id).await?;
    let eligibility = mapping_test_eligibility(&mapping);
    if !eligibility.is_enabled() {
        bail!("{}", eligibility.hint());
    }

    let state = session.run(Action::TestMapping(mapping.local_id)).await;
    let view = state
        .mappings
        .find(mapping.local_id)
        .and_then(TestResultView::for_mapping)
        .ok_or_else(|| eyre!("mapping {id} could not be tested"))?;
    write_out(&render_test_view(&view))?;
    Ok(())
}

async fn load(session: &mut Session, id: MappingId) -> Result<Mapping> {
    let state = session.run(Action::FetchMappings).await;
    state
        .mappings
        .find_by_id(id)
        .cloned()
        .ok_or_else(|| eyre!("mapping {id} not found"))
}

/// Applies edits, submits, and fails with the field errors if validation
/// rejected the form.
async fn submit(
    session: &mut Session,
    local_id: LocalId,
    assignments: Vec<(MappingField, String)>,
) -> Result<std::sync::Arc<AppState>> {
    for (field, value) in assignments {
        session.dispatch(Action::UpdateMappingField {
            local_id,
            field,
            value,
        });
    }
    let state = session.run(Action::SubmitMapping(local_id)).await;
    if let Some(errors) = state.mappings.find(local_id).and_then(|m| m.errors.as_ref()) {
        bail!("mapping is invalid:\n{}", render_errors(errors));
    }
    Ok(state)
}

pub(super) fn last_request_succeeded(state: &AppState) -> bool {
    state
        .notifications
        .latest()
        .is_some_and(|n| n.kind == NotificationKind::Success)
}
