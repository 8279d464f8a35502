use serde::{Deserialize, Serialize};

use super::database::{DatabaseRecord, DatabaseRequest};

/// `GET /configs` response: spring services text plus source databases.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRecord {
    pub services: Option<String>,
    pub databases: Vec<DatabaseRecord>,
}

impl ConfigRecord {
    pub fn database_names(&self) -> Vec<String> {
        self.databases.iter().map(|db| db.name.clone()).collect()
    }
}

/// `POST /configs` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRequest {
    pub services: String,
    pub databases: Vec<DatabaseRequest>,
}
