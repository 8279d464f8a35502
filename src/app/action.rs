//! Everything that can change [`AppState`](crate::state::AppState).
//!
//! User intents and the completions of remote commands share one enum so the
//! reducer sees a single ordered stream.

use etl_console_domain::{
    ConfigRecord, DatabaseField, DatabaseRequest, ErrorMap, LocalId, MappingField, MappingId,
    MappingRecord, MappingRequest, MappingTestResults,
};

use crate::ports::{Notification, NotificationId};

pub type MappingValidation = Result<MappingRequest, ErrorMap<MappingField>>;
pub type DatabaseValidation = Result<DatabaseRequest, ErrorMap<DatabaseField>>;

#[derive(Debug, Clone)]
pub enum Action {
    None,

    // Notifications
    Notify(Notification),
    DismissNotification(NotificationId),
    Tick,

    // Mappings
    FetchMappings,
    MappingsLoaded(Vec<MappingRecord>),
    MappingsLoadFailed,
    FetchSources,
    SourcesLoaded(Vec<String>),
    AddMapping,
    UpdateMappingField {
        local_id: LocalId,
        field: MappingField,
        value: String,
    },
    ToggleMappingOpen(LocalId),
    SubmitMapping(LocalId),
    /// `is_open` is the value captured at submit time.
    MappingValidated {
        local_id: LocalId,
        is_open: bool,
        result: MappingValidation,
    },
    MappingCreated {
        local_id: LocalId,
        is_open: bool,
        record: MappingRecord,
    },
    MappingCreateFailed(LocalId),
    MappingUpdated(MappingId),
    RequestMappingDelete(LocalId),
    ConfirmMappingDelete,
    DenyMappingDelete,
    MappingDeleted(LocalId),
    MappingDeleteFailed(LocalId),
    TestMapping(LocalId),
    MappingTested {
        id: MappingId,
        results: MappingTestResults,
    },
    ResetMappings,

    // Configuration / databases
    FetchConfig,
    ConfigLoaded(ConfigRecord),
    ConfigLoadFailed,
    AddDatabase,
    UpdateDatabaseField {
        local_id: LocalId,
        field: DatabaseField,
        value: String,
    },
    ToggleDatabaseOpen(LocalId),
    UpdateServices(String),
    SaveConfig,
    DatabasesValidated {
        services: String,
        results: Vec<(LocalId, DatabaseValidation)>,
    },
    ConfigSaved(ConfigRecord),
    ConfigSaveFailed,
    RequestDatabaseDelete(LocalId),
    ConfirmDatabaseDelete,
    DenyDatabaseDelete,
    DatabaseDeleted(LocalId),
    DatabaseDeleteFailed(LocalId),
    TestDatabase(LocalId),
    DatabaseTested {
        name: String,
        connected: bool,
    },
    ResetConfig,
}
