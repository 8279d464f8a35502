use etl_console_domain::{Database, LocalId};

use crate::deletion_state::DeletionState;

/// Bulk configuration: the services string and every database connection.
/// Deletion targets are keyed by the confirmed database name.
#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    pub services: String,
    pub databases: Vec<Database>,
    pub deletion: DeletionState<String>,
    pub is_loading: bool,
}

impl ConfigState {
    pub fn find(&self, local_id: LocalId) -> Option<&Database> {
        self.databases.iter().find(|d| d.local_id == local_id)
    }

    pub fn find_mut(&mut self, local_id: LocalId) -> Option<&mut Database> {
        self.databases.iter_mut().find(|d| d.local_id == local_id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Database> {
        self.databases
            .iter()
            .find(|d| d.persisted_name.as_deref() == Some(name))
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Database> {
        self.databases
            .iter_mut()
            .find(|d| d.persisted_name.as_deref() == Some(name))
    }

    pub fn remove(&mut self, local_id: LocalId) -> Option<Database> {
        let index = self.databases.iter().position(|d| d.local_id == local_id)?;
        Some(self.databases.remove(index))
    }
}
