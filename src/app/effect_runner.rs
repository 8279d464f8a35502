//! Executes side effects returned by the reducer.
//!
//! Each effect runs to completion and reports back by sending follow-up
//! actions on `action_tx`. Notifications go straight to the sink.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use etl_console_domain::MappingId;

use crate::action::Action;
use crate::effect::Effect;
use crate::messages::{
    CONFIG_SAVE_FAILURE, CONFIG_SAVE_SUCCESS, DATABASE_DELETE_FAILURE, DATABASE_DELETE_SUCCESS,
    DATABASE_TEST_FAILURE, MAPPING_CREATE_FAILURE, MAPPING_CREATE_SUCCESS, MAPPING_DELETE_FAILURE,
    MAPPING_DELETE_SUCCESS, MAPPING_TEST_FAILURE, MAPPING_TEST_SUCCESS, MAPPING_UPDATE_FAILURE,
    MAPPING_UPDATE_SUCCESS,
};
use crate::ports::{ConfigApi, Notification, NotificationId, NotificationKind, NotificationSink};
use crate::request_status::{RequestMessages, failure_message, handle_request};
use crate::validation::{validate_databases, validate_mapping};

pub struct EffectRunner {
    api: Arc<dyn ConfigApi>,
    notifications: Arc<dyn NotificationSink>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl EffectRunner {
    pub fn new(
        api: Arc<dyn ConfigApi>,
        notifications: Arc<dyn NotificationSink>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            api,
            notifications,
            action_tx,
        }
    }

    pub async fn run(&self, effect: Effect) {
        for action in self.execute(effect).await {
            if self.action_tx.send(action).is_err() {
                debug!("action channel closed, dropping follow-up");
            }
        }
    }

    async fn execute(&self, effect: Effect) -> Vec<Action> {
        let sink = self.notifications.as_ref();
        match effect {
            Effect::FetchMappings => match self.api.list_mappings().await {
                Ok(records) => vec![Action::MappingsLoaded(records)],
                Err(error) => {
                    warn!(error = %error, "failed to fetch mappings");
                    vec![Action::MappingsLoadFailed]
                }
            },
            Effect::FetchSources => match self.api.get_config().await {
                Ok(config) => vec![Action::SourcesLoaded(config.database_names())],
                Err(error) => {
                    warn!(error = %error, "failed to fetch mapping sources");
                    vec![]
                }
            },
            Effect::ValidateMapping { mapping } => {
                let result = validate_mapping(&mapping).await;
                vec![Action::MappingValidated {
                    local_id: mapping.local_id,
                    is_open: mapping.is_open,
                    result,
                }]
            }
            Effect::CreateMapping {
                local_id,
                is_open,
                request,
            } => {
                let messages = RequestMessages::new(MAPPING_CREATE_SUCCESS, MAPPING_CREATE_FAILURE);
                let created =
                    handle_request(sink, messages, self.api.create_mapping(&request)).await;
                vec![match created {
                    Some(record) => Action::MappingCreated {
                        local_id,
                        is_open,
                        record,
                    },
                    None => Action::MappingCreateFailed(local_id),
                }]
            }
            Effect::UpdateMapping { id, request } => {
                let messages = RequestMessages::new(MAPPING_UPDATE_SUCCESS, MAPPING_UPDATE_FAILURE);
                handle_request(sink, messages, self.api.update_mapping(id, &request))
                    .await
                    .map(|record| Action::MappingUpdated(record.id.unwrap_or(id)))
                    .into_iter()
                    .collect()
            }
            Effect::DeleteMapping { local_id, id } => {
                let messages = RequestMessages::new(MAPPING_DELETE_SUCCESS, MAPPING_DELETE_FAILURE);
                let deleted = handle_request(sink, messages, self.api.delete_mapping(id)).await;
                vec![match deleted {
                    Some(()) => Action::MappingDeleted(local_id),
                    None => Action::MappingDeleteFailed(local_id),
                }]
            }
            Effect::TestMapping { id } => self.test_mapping(id).await,

            Effect::FetchConfig => match self.api.get_config().await {
                Ok(config) => vec![Action::ConfigLoaded(config)],
                Err(error) => {
                    warn!(error = %error, "failed to fetch configuration");
                    vec![Action::ConfigLoadFailed]
                }
            },
            Effect::ValidateDatabases {
                services,
                databases,
            } => {
                let results = validate_databases(&databases).await;
                vec![Action::DatabasesValidated { services, results }]
            }
            Effect::SaveConfig { request } => {
                let messages = RequestMessages::new(CONFIG_SAVE_SUCCESS, CONFIG_SAVE_FAILURE);
                let saved = handle_request(sink, messages, self.api.save_config(&request)).await;
                vec![match saved {
                    Some(record) => Action::ConfigSaved(record),
                    None => Action::ConfigSaveFailed,
                }]
            }
            Effect::DeleteDatabase { local_id, name } => {
                let messages =
                    RequestMessages::new(DATABASE_DELETE_SUCCESS, DATABASE_DELETE_FAILURE);
                let deleted = handle_request(sink, messages, self.api.delete_database(&name)).await;
                vec![match deleted {
                    Some(()) => Action::DatabaseDeleted(local_id),
                    None => Action::DatabaseDeleteFailed(local_id),
                }]
            }
            Effect::TestDatabase { name } => match self.api.test_database(&name).await {
                Ok(connected) => vec![Action::DatabaseTested { name, connected }],
                Err(error) => {
                    warn!(error = %error, database = %name, "database test request failed");
                    self.notify(
                        NotificationKind::Error,
                        failure_message(&error, DATABASE_TEST_FAILURE),
                    );
                    vec![]
                }
            },

            Effect::Notify { kind, message } => {
                self.notify(kind, message);
                vec![]
            }
        }
    }

    async fn test_mapping(&self, id: MappingId) -> Vec<Action> {
        let messages = RequestMessages::new(MAPPING_TEST_SUCCESS, MAPPING_TEST_FAILURE);
        handle_request(
            self.notifications.as_ref(),
            messages,
            self.api.test_mapping(id),
        )
        .await
        .map(|results| Action::MappingTested { id, results })
        .into_iter()
        .collect()
    }

    fn notify(&self, kind: NotificationKind, message: String) {
        self.notifications
            .notify(&Notification::new(NotificationId::next(), kind, message));
    }
}
