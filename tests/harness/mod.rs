pub mod fixtures;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use etl_console_app::ports::{ApiError, ConfigApi, Notification, NotificationSink};
use etl_console_app::runtime::Runtime;
use etl_console_domain::{
    ConfigRecord, ConfigRequest, DatabaseRecord, MappingId, MappingRecord, MappingRequest,
    MappingTestResults,
};

#[derive(Default)]
struct FakeState {
    mappings: Vec<MappingRecord>,
    next_id: i64,
    config: ConfigRecord,
    test_results: HashMap<i64, MappingTestResults>,
    reachable: HashMap<String, bool>,
    failures: HashMap<&'static str, ApiError>,
    calls: Vec<String>,
}

/// In-memory stand-in for the remote configuration service.
#[derive(Default)]
pub struct FakeConfigApi {
    state: Mutex<FakeState>,
}

impl FakeConfigApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.state.lock().unwrap().next_id = 1;
        api
    }

    pub fn with_mappings(self, mappings: Vec<MappingRecord>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_id = mappings
                .iter()
                .filter_map(|m| m.id.map(|id| id.value()))
                .max()
                .unwrap_or(0)
                + 1;
            state.mappings = mappings;
        }
        self
    }

    pub fn with_databases(self, databases: Vec<DatabaseRecord>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for db in &databases {
                state.reachable.insert(db.name.clone(), true);
            }
            state.config.databases = databases;
        }
        self
    }

    pub fn with_test_results(self, id: i64, results: MappingTestResults) -> Self {
        self.state.lock().unwrap().test_results.insert(id, results);
        self
    }

    /// Makes every call to `operation` fail with `error`.
    pub fn failing(self, operation: &'static str, error: ApiError) -> Self {
        self.state.lock().unwrap().failures.insert(operation, error);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn stored_databases(&self) -> Vec<String> {
        self.state.lock().unwrap().config.database_names()
    }

    fn record(&self, operation: &'static str, detail: String) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(detail);
        match state.failures.get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        message: Some(format!("{what} not found")),
    }
}

#[async_trait]
impl ConfigApi for FakeConfigApi {
    async fn list_mappings(&self) -> Result<Vec<MappingRecord>, ApiError> {
        self.record("list_mappings", "GET /mappings".into())?;
        Ok(self.state.lock().unwrap().mappings.clone())
    }

    async fn create_mapping(&self, request: &MappingRequest) -> Result<MappingRecord, ApiError> {
        self.record("create_mapping", "POST /mappings".into())?;
        let mut state = self.state.lock().unwrap();
        let record = MappingRecord {
            id: Some(MappingId::new(state.next_id)),
            ..request.clone().into()
        };
        state.next_id += 1;
        state.mappings.push(record.clone());
        Ok(record)
    }

    async fn update_mapping(
        &self,
        id: MappingId,
        request: &MappingRequest,
    ) -> Result<MappingRecord, ApiError> {
        self.record("update_mapping", format!("PUT /mappings/{id}"))?;
        let mut state = self.state.lock().unwrap();
        let stored = state
            .mappings
            .iter_mut()
            .find(|m| m.id == Some(id))
            .ok_or_else(|| not_found("Mapping"))?;
        *stored = MappingRecord {
            id: Some(id),
            ..request.clone().into()
        };
        Ok(stored.clone())
    }

    async fn delete_mapping(&self, id: MappingId) -> Result<(), ApiError> {
        self.record("delete_mapping", format!("DELETE /mappings/{id}"))?;
        let mut state = self.state.lock().unwrap();
        let before = state.mappings.len();
        state.mappings.retain(|m| m.id != Some(id));
        if state.mappings.len() == before {
            return Err(not_found("Mapping"));
        }
        Ok(())
    }

    async fn test_mapping(&self, id: MappingId) -> Result<MappingTestResults, ApiError> {
        self.record("test_mapping", format!("GET /mappings/{id}/test"))?;
        self.state
            .lock()
            .unwrap()
            .test_results
            .get(&id.value())
            .cloned()
            .ok_or_else(|| not_found("Mapping"))
    }

    async fn get_config(&self) -> Result<ConfigRecord, ApiError> {
        self.record("get_config", "GET /configs".into())?;
        Ok(self.state.lock().unwrap().config.clone())
    }

    async fn save_config(&self, request: &ConfigRequest) -> Result<ConfigRecord, ApiError> {
        self.record("save_config", "POST /configs".into())?;
        let mut state = self.state.lock().unwrap();
        state.config = ConfigRecord {
            services: Some(request.services.clone()),
            databases: request
                .databases
                .iter()
                .cloned()
                .map(|db| DatabaseRecord {
                    db_password: None,
                    ..db.into()
                })
                .collect(),
        };
        Ok(state.config.clone())
    }

    async fn delete_database(&self, name: &str) -> Result<(), ApiError> {
        self.record("delete_database", format!("DELETE /configs/{name}"))?;
        let mut state = self.state.lock().unwrap();
        let before = state.config.databases.len();
        state.config.databases.retain(|db| db.name != name);
        if state.config.databases.len() == before {
            return Err(not_found("Database"));
        }
        Ok(())
    }

    async fn test_database(&self, name: &str) -> Result<bool, ApiError> {
        self.record("test_database", format!("GET /configs/{name}/test"))?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .reachable
            .get(name)
            .copied()
            .unwrap_or(false))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: &Notification) {
        self.seen.lock().unwrap().push(notification.clone());
    }
}

pub struct TestContext {
    pub runtime: Runtime,
    pub api: Arc<FakeConfigApi>,
    pub sink: Arc<RecordingSink>,
}

pub fn context(api: FakeConfigApi) -> TestContext {
    let api = Arc::new(api);
    let sink = Arc::new(RecordingSink::default());
    let runtime = Runtime::new(Arc::clone(&api) as _, Arc::clone(&sink) as _);
    TestContext { runtime, api, sink }
}

impl TestContext {
    pub async fn run(&mut self, action: etl_console_app::action::Action) {
        self.runtime.dispatch(action);
        self.runtime.settle().await;
    }
}
