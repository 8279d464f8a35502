use async_trait::async_trait;

use etl_console_domain::{
    ConfigRecord, ConfigRequest, MappingId, MappingRecord, MappingRequest, MappingTestResults,
};

/// Remote ETL configuration service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigApi: Send + Sync {
    async fn list_mappings(&self) -> Result<Vec<MappingRecord>, ApiError>;

    async fn create_mapping(&self, request: &MappingRequest) -> Result<MappingRecord, ApiError>;

    async fn update_mapping(
        &self,
        id: MappingId,
        request: &MappingRequest,
    ) -> Result<MappingRecord, ApiError>;

    async fn delete_mapping(&self, id: MappingId) -> Result<(), ApiError>;

    async fn test_mapping(&self, id: MappingId) -> Result<MappingTestResults, ApiError>;

    async fn get_config(&self) -> Result<ConfigRecord, ApiError>;

    async fn save_config(&self, request: &ConfigRequest) -> Result<ConfigRecord, ApiError>;

    async fn delete_database(&self, name: &str) -> Result<(), ApiError>;

    async fn test_database(&self, name: &str) -> Result<bool, ApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP status, with the `message` of the server's error body
    /// when one was sent.
    #[error("server responded with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}
