//! Notification sub-reducer.

use std::time::Instant;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

pub fn reduce_notification(
    state: &mut AppState,
    action: &Action,
    now: Instant,
) -> Option<Vec<Effect>> {
    match action {
        Action::Notify(notification) => {
            state.notifications.show_at(notification.clone(), now);
            Some(vec![])
        }
        Action::DismissNotification(id) => {
            state.notifications.dismiss(*id);
            Some(vec![])
        }
        Action::Tick => {
            state.notifications.clear_expired_at(now);
            Some(vec![])
        }
        _ => None,
    }
}
