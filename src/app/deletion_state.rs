//! Two-step delete confirmation shared by mappings and databases.

use etl_console_domain::LocalId;

/// Entity chosen for deletion, with the key the server knows it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionTarget<K> {
    pub local_id: LocalId,
    pub key: K,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeletionState<K> {
    #[default]
    Idle,
    /// Confirmation dialog is visible. `submitted` is set once the delete
    /// request has been issued and the dialog waits for its result.
    ConfirmPending {
        target: DeletionTarget<K>,
        submitted: bool,
    },
}

impl<K: Clone> DeletionState<K> {
    /// Opens the dialog for `target`, replacing any earlier pending target.
    pub fn request(&mut self, local_id: LocalId, key: K) {
        *self = Self::ConfirmPending {
            target: DeletionTarget { local_id, key },
            submitted: false,
        };
    }

    /// Marks the pending target as submitted and returns it. Returns `None`
    /// when idle or already submitted.
    pub fn confirm(&mut self) -> Option<DeletionTarget<K>> {
        match self {
            Self::ConfirmPending { target, submitted } if !*submitted => {
                *submitted = true;
                Some(target.clone())
            }
            _ => None,
        }
    }

    pub fn deny(&mut self) {
        *self = Self::Idle;
    }

    /// Closes the dialog once the delete for `local_id` has completed.
    /// A newer request for another entity stays open.
    pub fn finish(&mut self, local_id: LocalId) {
        if self.target().is_some_and(|t| t.local_id == local_id) {
            *self = Self::Idle;
        }
    }

    pub fn target(&self) -> Option<&DeletionTarget<K>> {
        match self {
            Self::Idle => None,
            Self::ConfirmPending { target, .. } => Some(target),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::ConfirmPending { .. })
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::ConfirmPending { submitted: true, .. })
    }
}
