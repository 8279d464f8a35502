//! Pure reducer: state transitions only, no I/O.
//!
//! # Purity Rules
//!
//! The reducer MUST NOT:
//! - Call `Instant::now()` (time is passed as `now` parameter)
//! - Perform I/O operations
//! - Spawn async tasks
//!
//! Actions naming an entity that is no longer in the collection are no-ops.

use std::time::Instant;

use crate::action::Action;
use crate::effect::Effect;
use crate::reducers::{reduce_config, reduce_mapping, reduce_notification};
use crate::state::AppState;

pub fn reduce(state: &mut AppState, action: Action, now: Instant) -> Vec<Effect> {
    if let Some(effects) = reduce_notification(state, &action, now) {
        return effects;
    }
    if let Some(effects) = reduce_mapping(state, &action) {
        return effects;
    }
    if let Some(effects) = reduce_config(state, &action) {
        return effects;
    }

    vec![]
}
