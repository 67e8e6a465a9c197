//! The `RecordKind` abstraction.
//!
//! Each record kind the desk manages (envelopes, employees) is represented by a
//! zero-sized marker type implementing [`RecordKind`]. The trait names the
//! kind's stored record, its form draft, its validated input, and its status
//! enumeration, and forwards the four adapter operations to the kind's core
//! module. `ListView<K>` and `FormView<K>` are written once against it.

use crate::entities::EntityKind;
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use std::fmt;
use std::future::Future;

/// A kind of record with a list screen and a form.
pub trait RecordKind: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Tag used in errors and notifications.
    const KIND: EntityKind;
    /// Whether the list offers a confirm-then-delete action.
    const DELETABLE: bool;

    /// Stored record as returned by the backend.
    type Record: Clone + fmt::Debug + PartialEq + Send + Sync;
    /// Raw, unsaved form inputs.
    type Draft: Clone + fmt::Debug + Default + PartialEq + Send + Sync;
    /// Parsed, typed values ready for the adapter.
    type Input: Clone + fmt::Debug + Send + Sync;
    /// Status enumeration used by the exact-match status filter.
    type Status: Copy + fmt::Debug + fmt::Display + Eq + Send + Sync;

    fn id(record: &Self::Record) -> &str;
    fn status(record: &Self::Record) -> Self::Status;
    /// Value matched by the category filter.
    fn category(record: &Self::Record) -> &str;
    /// Short human label, e.g. the client or the employee's full name.
    fn label(record: &Self::Record) -> String;
    /// Case-insensitive substring match; `needle` is already lowercased.
    fn matches_text(record: &Self::Record, needle: &str) -> bool;

    /// Seeds a draft from an existing record for editing.
    fn draft_from(record: &Self::Record) -> Self::Draft;
    /// Required-field check and parsing of a draft.
    fn parse_draft(draft: &Self::Draft) -> Result<Self::Input>;

    /// All records, newest first.
    fn list(db: &DatabaseConnection) -> impl Future<Output = Result<Vec<Self::Record>>> + Send;
    fn create(
        db: &DatabaseConnection,
        input: Self::Input,
    ) -> impl Future<Output = Result<Self::Record>> + Send;
    fn update(
        db: &DatabaseConnection,
        id: &str,
        input: Self::Input,
    ) -> impl Future<Output = Result<Self::Record>> + Send;
    fn delete(db: &DatabaseConnection, id: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Marker for envelope (job ticket) records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Envelopes;

/// Marker for employee records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Employees;
