//! Notifications emitted by a [`Session`](crate::Session) for whatever view
//! is presenting it.

use crate::message::Message;
use crate::session::SessionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A short user-visible message, shown out of band from the log (a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The log was mutated; the view should present the latest entry.
    LogChanged {
        len: usize,
        latest: Option<Message>,
    },
    StatusChanged(SessionStatus),
    Notice(Notice),
}
