//! Transient user-facing notifications.
//!
//! Components never surface raw errors; every adapter failure is caught at the
//! component boundary and turned into one of these. Delivery (a toast, a chat
//! reply) is up to the front end.

use crate::entities::EntityKind;
use crate::errors::Error;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Converts a failed `action` on a `kind` record into an error notification.
    #[must_use]
    pub fn from_error(kind: EntityKind, action: &str, error: &Error) -> Self {
        let description = match error {
            Error::Validation { field, message } => format!("Check the {field} field: {message}."),
            Error::NotFound { .. } => format!("The {kind} no longer exists."),
            Error::Transport(_) => "The server could not be reached. Please try again.".to_string(),
            other => other.to_string(),
        };
        Self::error(format!("Could not {action} {kind}"), description)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.level {
            Level::Success => "✅",
            Level::Error => "❌",
        };
        write!(f, "{icon} **{}** {}", self.title, self.description)
    }
}
