//! Notification dedup: suppresses repeats of the last delivered message.
//!
//! Success and failure messages are tracked independently, so a recovered
//! API followed by the same verdict as before stays silent, while a new
//! failure after a success is always reported.
//!
//! State is held in memory only and resets with the process.

/// Which rolling slot a message is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Status,
    Failure,
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageKind::Status => write!(f, "status"),
            MessageKind::Failure => write!(f, "failure"),
        }
    }
}

/// Last successfully delivered text per message kind.
#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    last_success_message: Option<String>,
    last_error_message: Option<String>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when `text` differs from the last delivered message of this kind.
    pub fn is_new(&self, kind: MessageKind, text: &str) -> bool {
        self.last(kind) != Some(text)
    }

    /// Remember `text` as delivered. Call only after the sink confirmed delivery.
    pub fn mark_delivered(&mut self, kind: MessageKind, text: String) {
        *self.slot(kind) = Some(text);
    }

    pub fn last(&self, kind: MessageKind) -> Option<&str> {
        match kind {
            MessageKind::Status => self.last_success_message.as_deref(),
            MessageKind::Failure => self.last_error_message.as_deref(),
        }
    }

    fn slot(&mut self, kind: MessageKind) -> &mut Option<String> {
        match kind {
            MessageKind::Status => &mut self.last_success_message,
            MessageKind::Failure => &mut self.last_error_message,
        }
    }
}
