use std::collections::HashSet;

use etl_console_domain::{LocalId, Mapping, MappingId};

use crate::deletion_state::DeletionState;

#[derive(Debug, Clone, Default)]
pub struct MappingsState {
    pub items: Vec<Mapping>,
    /// Source database names offered when editing a mapping.
    pub sources: Vec<String>,
    pub deletion: DeletionState<MappingId>,
    /// Drafts with a create request in flight.
    pub creating: HashSet<LocalId>,
    pub is_loading: bool,
}

impl MappingsState {
    pub fn find(&self, local_id: LocalId) -> Option<&Mapping> {
        self.items.iter().find(|m| m.local_id == local_id)
    }

    pub fn find_mut(&mut self, local_id: LocalId) -> Option<&mut Mapping> {
        self.items.iter_mut().find(|m| m.local_id == local_id)
    }

    pub fn find_by_id(&self, id: MappingId) -> Option<&Mapping> {
        self.items.iter().find(|m| m.id == Some(id))
    }

    pub fn find_by_id_mut(&mut self, id: MappingId) -> Option<&mut Mapping> {
        self.items.iter_mut().find(|m| m.id == Some(id))
    }

    pub fn remove(&mut self, local_id: LocalId) -> Option<Mapping> {
        let index = self.items.iter().position(|m| m.local_id == local_id)?;
        Some(self.items.remove(index))
    }
}
