//! Client-side state synchronization for ETL mappings and database
//! configuration: reducer, effects, validation and request orchestration.

pub mod action;
pub mod config_state;
pub mod deletion_state;
pub mod effect;
pub mod effect_runner;
pub mod mapping_state;
pub mod messages;
pub mod notification_state;
pub mod ports;
pub mod reducer;
pub mod reducers;
pub mod request_status;
pub mod runtime;
pub mod state;
pub mod store;
pub mod test_result_view;
pub mod validation;
