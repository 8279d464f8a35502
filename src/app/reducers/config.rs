//! Config sub-reducer: database connections, services and bulk save.

use etl_console_domain::{
    ConfigRecord, ConfigRequest, ConnectionTestOutcome, Database, DatabaseField, DbType,
    apply_field_outcome,
};

use crate::action::Action;
use crate::config_state::ConfigState;
use crate::effect::Effect;
use crate::messages::{DATABASE_TEST_FAILURE, DATABASE_TEST_SUCCESS, INVALID_CONFIGURATION};
use crate::ports::NotificationKind;
use crate::state::AppState;
use crate::validation::database_schema;

/// Handles configuration and database actions.
/// Returns Some(effects) if action was handled, None otherwise.
pub fn reduce_config(state: &mut AppState, action: &Action) -> Option<Vec<Effect>> {
    let config = &mut state.config;
    match action {
        Action::FetchConfig => {
            config.is_loading = true;
            Some(vec![Effect::FetchConfig])
        }
        Action::ConfigLoaded(record) => {
            config.services = record.services.clone().unwrap_or_default();
            config.databases = record
                .databases
                .iter()
                .cloned()
                .map(Database::from_record)
                .collect();
            config.is_loading = false;
            Some(vec![])
        }
        Action::ConfigLoadFailed | Action::ConfigSaveFailed => {
            config.is_loading = false;
            Some(vec![])
        }

        Action::AddDatabase => {
            config.databases.push(Database::draft());
            Some(vec![])
        }
        Action::UpdateServices(services) => {
            config.services = services.clone();
            Some(vec![])
        }
        Action::UpdateDatabaseField {
            local_id,
            field,
            value,
        } => {
            if let Some(database) = config.find_mut(*local_id) {
                edit_field(database, *field, value);
            }
            Some(vec![])
        }
        Action::ToggleDatabaseOpen(local_id) => {
            if let Some(database) = config.find_mut(*local_id) {
                database.is_open = !database.is_open;
            }
            Some(vec![])
        }

        Action::SaveConfig => Some(vec![Effect::ValidateDatabases {
            services: config.services.clone(),
            databases: config.databases.clone(),
        }]),
        Action::DatabasesValidated { services, results } => {
            let mut requests = Vec::with_capacity(results.len());
            let mut all_valid = true;
            for (local_id, result) in results {
                let errors = result.as_ref().err().cloned();
                all_valid &= errors.is_none();
                if let Some(database) = config.find_mut(*local_id) {
                    database.errors = errors;
                }
                if let Ok(request) = result {
                    requests.push(request.clone());
                }
            }
            if !all_valid {
                return Some(vec![Effect::Notify {
                    kind: NotificationKind::Error,
                    message: INVALID_CONFIGURATION.to_string(),
                }]);
            }
            config.is_loading = true;
            Some(vec![Effect::SaveConfig {
                request: ConfigRequest {
                    services: services.clone(),
                    databases: requests,
                },
            }])
        }
        Action::ConfigSaved(record) => {
            reconcile_saved(config, record);
            config.is_loading = false;
            Some(vec![])
        }

        Action::RequestDatabaseDelete(local_id) => {
            let Some(database) = config.find(*local_id) else {
                return Some(vec![]);
            };
            match database.persisted_name.clone() {
                Some(name) => config.deletion.request(*local_id, name),
                None => {
                    config.remove(*local_id);
                }
            }
            Some(vec![])
        }
        Action::ConfirmDatabaseDelete => {
            let Some(target) = config.deletion.confirm() else {
                return Some(vec![]);
            };
            config.is_loading = true;
            Some(vec![Effect::DeleteDatabase {
                local_id: target.local_id,
                name: target.key,
            }])
        }
        Action::DenyDatabaseDelete => {
            config.deletion.deny();
            Some(vec![])
        }
        Action::DatabaseDeleted(local_id) => {
            config.remove(*local_id);
            config.deletion.finish(*local_id);
            config.is_loading = false;
            Some(vec![])
        }
        Action::DatabaseDeleteFailed(local_id) => {
            config.deletion.finish(*local_id);
            config.is_loading = false;
            Some(vec![])
        }

        Action::TestDatabase(local_id) => {
            let effects = config
                .find(*local_id)
                .filter(|d| d.is_testable)
                .and_then(|d| d.persisted_name.clone())
                .map(|name| vec![Effect::TestDatabase { name }])
                .unwrap_or_default();
            Some(effects)
        }
        Action::DatabaseTested { name, connected } => {
            let Some(database) = config.find_by_name_mut(name) else {
                return Some(vec![]);
            };
            let outcome = ConnectionTestOutcome::from(*connected);
            database.test_result = Some(outcome);
            let (kind, message) = match outcome {
                ConnectionTestOutcome::Success => {
                    (NotificationKind::Success, DATABASE_TEST_SUCCESS)
                }
                ConnectionTestOutcome::Failure => (NotificationKind::Error, DATABASE_TEST_FAILURE),
            };
            Some(vec![Effect::Notify {
                kind,
                message: message.to_string(),
            }])
        }

        Action::ResetConfig => {
            *config = ConfigState::default();
            Some(vec![])
        }

        _ => None,
    }
}

/// Applies one edit and validates only that field. Changing the type swaps
/// in that type's default URL and drops any URL error.
fn edit_field(database: &mut Database, field: DatabaseField, value: &str) {
    if !database.is_field_editable(field) {
        return;
    }
    database.set_field(field, value);
    database.is_testable = false;
    database.test_result = None;

    if field == DatabaseField::Type
        && let Some(db_type) = DbType::from_label(value)
    {
        database.url = db_type.default_url().to_string();
        apply_field_outcome(&mut database.errors, DatabaseField::Url, Ok(()));
    }

    let outcome = database_schema(database).validate_field(field, database.field_value(field));
    apply_field_outcome(&mut database.errors, field, outcome);
}

/// Rebuilds the collection from the saved config. Entries matching a
/// previous entry by name keep its local id and expansion state; each
/// previous entry is matched at most once.
fn reconcile_saved(config: &mut ConfigState, record: &ConfigRecord) {
    let mut previous = std::mem::take(&mut config.databases);
    config.services = record.services.clone().unwrap_or_default();
    config.databases = record
        .databases
        .iter()
        .cloned()
        .map(|saved| {
            let mut database = Database::from_record(saved);
            if let Some(index) = previous.iter().position(|p| p.name == database.name) {
                let prior = previous.remove(index);
                database.local_id = prior.local_id;
                database.is_open = prior.is_open;
            }
            database
        })
        .collect();
}
