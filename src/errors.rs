//! Unified error types for the jewelry desk.
//!
//! Adapter failures fall into three user-facing buckets: validation of a draft,
//! a record that is no longer there, and a failed backend call. Everything else
//! here is start-up plumbing (configuration, environment, Discord).

use crate::entities::EntityKind;
use poise::serenity_prelude as serenity;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or value could not be loaded.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A required field is missing or malformed.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable reason
        message: String,
    },

    /// The referenced record no longer exists.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Kind of record that was looked up
        kind: EntityKind,
        /// Identifier that was looked up
        id: String,
    },

    /// The backend call failed.
    #[error("Backend error: {0}")]
    Transport(#[from] sea_orm::DbErr),

    /// A required environment variable is missing or not UTF-8.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Writing a reply into a string buffer failed.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// The Discord gateway or HTTP API failed.
    #[error("Discord error: {0}")]
    Discord(Box<serenity::Error>),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] on `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::NotFound`].
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serenity::Error> for Error {
    fn from(value: serenity::Error) -> Self {
        Self::Discord(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
