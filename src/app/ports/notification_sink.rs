use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one notification so later updates replace it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

static NEXT_NOTIFICATION_ID: AtomicU64 = AtomicU64::new(1);

impl NotificationId {
    pub fn next() -> Self {
        Self(NEXT_NOTIFICATION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(id: NotificationId, kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            message: message.into(),
        }
    }
}

/// Receives request lifecycle notifications. Rendering is up to the implementor.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification);
}
