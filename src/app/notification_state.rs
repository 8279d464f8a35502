use std::time::{Duration, Instant};

use crate::ports::{Notification, NotificationId, NotificationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNotification {
    pub notification: Notification,
    pub expires_at: Option<Instant>,
}

/// Visible notifications, oldest first. A notification with a known id
/// replaces the earlier one in place.
#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    entries: Vec<ActiveNotification>,
}

impl NotificationState {
    pub const CLOSE_DELAY: Duration = Duration::from_secs(5);

    pub fn show_at(&mut self, notification: Notification, now: Instant) {
        let expires_at = match notification.kind {
            NotificationKind::Pending => None,
            NotificationKind::Success | NotificationKind::Error => Some(now + Self::CLOSE_DELAY),
        };
        let entry = ActiveNotification {
            notification,
            expires_at,
        };
        match self
            .entries
            .iter_mut()
            .find(|e| e.notification.id == entry.notification.id)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn dismiss(&mut self, id: NotificationId) {
        self.entries.retain(|e| e.notification.id != id);
    }

    pub fn clear_expired_at(&mut self, now: Instant) {
        self.entries
            .retain(|e| e.expires_at.is_none_or(|expires| expires > now));
    }

    pub fn entries(&self) -> &[ActiveNotification] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.last().map(|e| &e.notification)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
