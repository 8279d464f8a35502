//! Wraps remote commands with pending, success and failure notifications.

use std::future::Future;

use tracing::warn;

use crate::messages::{GENERIC_FAILURE, GENERIC_PROCESSING};
use crate::ports::{ApiError, Notification, NotificationId, NotificationKind, NotificationSink};

/// Texts shown when a command settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestMessages {
    pub success: &'static str,
    pub failure: &'static str,
}

impl RequestMessages {
    pub const fn new(success: &'static str, failure: &'static str) -> Self {
        Self { success, failure }
    }
}

/// Message for a failed command: the server's own message when it sent one,
/// else the caller's text, else a generic fallback.
pub fn failure_message(error: &ApiError, fallback: &str) -> String {
    error
        .server_message()
        .or_else(|| (!fallback.trim().is_empty()).then_some(fallback))
        .unwrap_or(GENERIC_FAILURE)
        .to_string()
}

/// Runs `command`, showing a pending notification that is replaced by the
/// outcome. Failures are reported and swallowed.
pub async fn handle_request<T, Fut>(
    sink: &dyn NotificationSink,
    messages: RequestMessages,
    command: Fut,
) -> Option<T>
where
    Fut: Future<Output = Result<T, ApiError>>,
{
    let id = NotificationId::next();
    sink.notify(&Notification::new(
        id,
        NotificationKind::Pending,
        GENERIC_PROCESSING,
    ));

    match command.await {
        Ok(value) => {
            sink.notify(&Notification::new(
                id,
                NotificationKind::Success,
                messages.success,
            ));
            Some(value)
        }
        Err(error) => {
            warn!(error = %error, "remote command failed");
            sink.notify(&Notification::new(
                id,
                NotificationKind::Error,
                failure_message(&error, messages.failure),
            ));
            None
        }
    }
}
