pub mod config;
pub mod database;
pub mod error_map;
pub mod id;
pub mod mapping;
pub mod test_results;

pub use config::{ConfigRecord, ConfigRequest};
pub use database::{Database, DatabaseField, DatabaseRecord, DatabaseRequest, DbType};
pub use error_map::{EntityField, ErrorMap, apply_field_outcome};
pub use id::{LocalId, MappingId};
pub use mapping::{Mapping, MappingField, MappingRecord, MappingRequest};
pub use test_results::{ConnectionTestOutcome, MappingTestResults};
