//! Generic form state.
//!
//! A `FormView<K>` owns a draft of one record's fields. Creating starts from
//! the kind's default draft; editing seeds the draft from the record. Edits
//! are local until [`FormView::submit`], which checks required fields before
//! any backend call and keeps the draft on every failure so the user can fix
//! it and resubmit.

use crate::core::kind::RecordKind;
use crate::errors::Error;
use crate::views::notify::Notification;
use sea_orm::DatabaseConnection;
use tracing::{debug, warn};

/// Result of a submit attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome<R> {
    /// The backend stored the record.
    Saved {
        record: R,
        notification: Notification,
    },
    /// A required field is missing or malformed.
    Invalid {
        field: &'static str,
        notification: Notification,
    },
    /// The backend call failed; the draft is unchanged.
    Failed { notification: Notification },
}

impl<R> SubmitOutcome<R> {
    #[must_use]
    pub const fn notification(&self) -> &Notification {
        match self {
            Self::Saved { notification, .. }
            | Self::Invalid { notification, .. }
            | Self::Failed { notification } => notification,
        }
    }

    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

#[derive(Debug)]
pub struct FormView<K: RecordKind> {
    draft: K::Draft,
    editing: Option<K::Record>,
}

impl<K: RecordKind> FormView<K> {
    /// Blank form for a new record.
    #[must_use]
    pub fn create() -> Self {
        Self {
            draft: K::Draft::default(),
            editing: None,
        }
    }

    /// Form seeded from `record`.
    #[must_use]
    pub fn edit(record: K::Record) -> Self {
        Self {
            draft: K::draft_from(&record),
            editing: Some(record),
        }
    }

    #[must_use]
    pub const fn draft(&self) -> &K::Draft {
        &self.draft
    }

    /// Applies a local field edit.
    pub fn update(&mut self, edit: impl FnOnce(&mut K::Draft)) {
        edit(&mut self.draft);
    }

    #[must_use]
    pub const fn editing(&self) -> Option<&K::Record> {
        self.editing.as_ref()
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Validates the draft and creates or updates the record.
    pub async fn submit(&mut self, db: &DatabaseConnection) -> SubmitOutcome<K::Record> {
        let action = if self.is_editing() { "update" } else { "create" };

        let input = match K::parse_draft(&self.draft) {
            Ok(input) => input,
            Err(e) => {
                debug!("Blocked {action} of {}: {e}", K::KIND);
                return Self::rejected(action, &e);
            }
        };

        let result = match &self.editing {
            Some(record) => K::update(db, K::id(record), input).await,
            None => K::create(db, input).await,
        };

        match result {
            Ok(record) => {
                let past = if self.is_editing() { "updated" } else { "created" };
                let notification = Notification::success(
                    format!("{} {past}", K::KIND),
                    format!("{} was {past} successfully.", K::label(&record)),
                );
                self.editing = Some(record.clone());
                SubmitOutcome::Saved {
                    record,
                    notification,
                }
            }
            Err(e) => {
                warn!("Failed to {action} {}: {e}", K::KIND);
                Self::rejected(action, &e)
            }
        }
    }

    fn rejected(action: &str, error: &Error) -> SubmitOutcome<K::Record> {
        let notification = Notification::from_error(K::KIND, action, error);
        match error {
            Error::Validation { field, .. } => SubmitOutcome::Invalid {
                field: *field,
                notification,
            },
            _ => SubmitOutcome::Failed { notification },
        }
    }
}
