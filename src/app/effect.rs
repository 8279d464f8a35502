//! Side effects returned by the reducer, executed by EffectRunner.

use etl_console_domain::{ConfigRequest, Database, LocalId, Mapping, MappingId, MappingRequest};

use crate::ports::NotificationKind;

#[derive(Debug, Clone)]
pub enum Effect {
    FetchMappings,
    FetchSources,

    /// Whole-form validation of a snapshot taken at submit time.
    ValidateMapping {
        mapping: Box<Mapping>,
    },
    CreateMapping {
        local_id: LocalId,
        is_open: bool,
        request: MappingRequest,
    },
    UpdateMapping {
        id: MappingId,
        request: MappingRequest,
    },
    DeleteMapping {
        local_id: LocalId,
        id: MappingId,
    },
    TestMapping {
        id: MappingId,
    },

    FetchConfig,
    ValidateDatabases {
        services: String,
        databases: Vec<Database>,
    },
    SaveConfig {
        request: ConfigRequest,
    },
    DeleteDatabase {
        local_id: LocalId,
        name: String,
    },
    TestDatabase {
        name: String,
    },

    Notify {
        kind: NotificationKind,
        message: String,
    },
}
