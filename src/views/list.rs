//! Generic list screen state.
//!
//! A `ListView<K>` holds the records fetched for one kind, the user's filter,
//! and a pending delete confirmation. Mutations elsewhere hand their
//! authoritative record back through [`ListView::merge`], so the list stays
//! current without a re-fetch.

use crate::core::{filter::Filter, kind::RecordKind};
use crate::errors::Result;
use crate::views::notify::Notification;
use sea_orm::DatabaseConnection;
use tracing::{debug, info, warn};

/// Lifecycle of the fetched set.
#[derive(Clone, Debug, PartialEq)]
pub enum ListState<R> {
    Loading,
    /// At least one record, or an empty set after a failed fetch.
    Loaded(Vec<R>),
    /// The backend answered with zero records.
    Empty,
}

pub struct ListView<K: RecordKind> {
    state: ListState<K::Record>,
    filter: Filter<K>,
    pending_delete: Option<String>,
}

impl<K: RecordKind> Default for ListView<K> {
    fn default() -> Self {
        Self {
            state: ListState::Loading,
            filter: Filter::default(),
            pending_delete: None,
        }
    }
}

impl<K: RecordKind> ListView<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &ListState<K::Record> {
        &self.state
    }

    /// Every fetched record, unfiltered.
    #[must_use]
    pub fn records(&self) -> &[K::Record] {
        match &self.state {
            ListState::Loaded(records) => records.as_slice(),
            ListState::Loading | ListState::Empty => &[],
        }
    }

    /// Records passing the current filter.
    #[must_use]
    pub fn visible(&self) -> Vec<&K::Record> {
        self.filter.apply(self.records())
    }

    #[must_use]
    pub const fn filter(&self) -> &Filter<K> {
        &self.filter
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search = text.into();
    }

    pub fn set_status(&mut self, status: Option<K::Status>) {
        self.filter.status = status;
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.filter.category = category;
    }

    pub fn clear_filters(&mut self) {
        self.filter = Filter::default();
    }

    /// Drops the fetched set until the next [`ListView::apply_fetch`].
    pub fn mark_loading(&mut self) {
        self.state = ListState::Loading;
        self.pending_delete = None;
    }

    /// Enters `Loading` and fetches every record.
    pub async fn load(&mut self, db: &DatabaseConnection) -> Option<Notification> {
        self.mark_loading();
        let result = K::list(db).await;
        self.apply_fetch(result)
    }

    /// Applies the outcome of a `list()` call.
    ///
    /// A failure leaves the list loaded but empty and returns an error
    /// notification.
    pub fn apply_fetch(&mut self, result: Result<Vec<K::Record>>) -> Option<Notification> {
        match result {
            Ok(records) if records.is_empty() => {
                debug!("No {} records", K::KIND);
                self.state = ListState::Empty;
                None
            }
            Ok(records) => {
                debug!("Loaded {} {} records", records.len(), K::KIND);
                self.state = ListState::Loaded(records);
                None
            }
            Err(e) => {
                warn!("Failed to load {} records: {e}", K::KIND);
                self.state = ListState::Loaded(Vec::new());
                Some(Notification::from_error(K::KIND, "load", &e))
            }
        }
    }

    /// Replaces the record with the same id, or inserts it first (newest).
    pub fn merge(&mut self, record: K::Record) {
        match &mut self.state {
            ListState::Loaded(records) => {
                if let Some(slot) = records.iter_mut().find(|r| K::id(r) == K::id(&record)) {
                    *slot = record;
                } else {
                    records.insert(0, record);
                }
            }
            ListState::Loading | ListState::Empty => {
                self.state = ListState::Loaded(vec![record]);
            }
        }
    }

    /// Drops a record from the fetched set. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let ListState::Loaded(records) = &mut self.state else {
            return false;
        };
        let before = records.len();
        records.retain(|r| K::id(r) != id);
        let removed = records.len() != before;
        if records.is_empty() {
            self.state = ListState::Empty;
        }
        removed
    }

    /// First step of confirm-then-delete. Returns `false` if this kind cannot
    /// be deleted or `id` is not in the list.
    pub fn request_delete(&mut self, id: &str) -> bool {
        if !K::DELETABLE || !self.records().iter().any(|r| K::id(r) == id) {
            return false;
        }
        self.pending_delete = Some(id.to_string());
        true
    }

    #[must_use]
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second step of confirm-then-delete.
    ///
    /// Calls the adapter and removes the record in place. A record that had
    /// already vanished is removed as well, with an error notification.
    /// Returns `None` when no delete was pending.
    pub async fn confirm_delete(&mut self, db: &DatabaseConnection) -> Option<Notification> {
        let id = self.pending_delete.take()?;
        let label = self
            .records()
            .iter()
            .find(|r| K::id(r) == id)
            .map_or_else(|| id.clone(), K::label);

        match K::delete(db, &id).await {
            Ok(()) => {
                self.remove(&id);
                info!("Deleted {} {id}", K::KIND);
                Some(Notification::success(
                    format!("{} deleted", K::KIND),
                    format!("{label} was removed."),
                ))
            }
            Err(e) => {
                if e.is_not_found() {
                    self.remove(&id);
                }
                warn!("Failed to delete {} {id}: {e}", K::KIND);
                Some(Notification::from_error(K::KIND, "delete", &e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::kind::{Employees, Envelopes};
    use crate::entities::EmployeeStatus;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    #[tokio::test]
    async fn test_load_empty_then_loaded() -> Result<()> {
        let db = setup_test_db().await?;
        let mut list = ListView::<Employees>::new();
        assert_eq!(list.state(), &ListState::Loading);

        assert!(list.load(&db).await.is_none());
        assert_eq!(list.state(), &ListState::Empty);

        create_test_employee(&db, "María", "González", EmployeeStatus::Active).await?;
        list.load(&db).await;
        assert_eq!(list.records().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_load_degrades_to_loaded_empty() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let mut list = ListView::<Envelopes>::new();

        let notification = list.load(&db).await.unwrap();
        assert!(notification.is_error());
        assert_eq!(list.state(), &ListState::Loaded(Vec::new()));
        assert!(list.visible().is_empty());
    }

    #[tokio::test]
    async fn test_filters_apply_to_fetched_set() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_employee(&db, "María", "González", EmployeeStatus::Active).await?;
        create_test_employee(&db, "Carlos", "González", EmployeeStatus::Inactive).await?;
        create_test_employee(&db, "Ana", "Rodríguez", EmployeeStatus::Active).await?;

        let mut list = ListView::<Employees>::new();
        list.load(&db).await;

        list.set_search("");
        assert_eq!(list.visible().len(), 3);

        list.set_search("gonzález");
        list.set_status(Some(EmployeeStatus::Active));
        let visible = list.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].full_name(), "María González");

        list.clear_filters();
        assert_eq!(list.visible().len(), 3);

        Ok(())
    }

    #[test]
    fn test_merge_replaces_or_prepends() {
        let mut list = ListView::<Employees>::new();
        let maria = sample_employee_model("María", "González", EmployeeStatus::Active);
        let ana = sample_employee_model("Ana", "Rodríguez", EmployeeStatus::Active);

        list.merge(maria.clone());
        list.merge(ana.clone());
        assert_eq!(list.records()[0].id, ana.id);

        let mut inactive = maria.clone();
        inactive.status = EmployeeStatus::Inactive;
        list.merge(inactive);
        assert_eq!(list.records().len(), 2);
        assert_eq!(list.records()[1].status, EmployeeStatus::Inactive);
    }

    #[tokio::test]
    async fn test_confirm_then_delete() -> Result<()> {
        let db = setup_test_db().await?;
        let carlos =
            create_test_employee(&db, "Carlos", "Martínez", EmployeeStatus::Active).await?;

        let mut list = ListView::<Employees>::new();
        list.load(&db).await;

        // Nothing pending: confirm is a no-op
        assert!(list.confirm_delete(&db).await.is_none());

        assert!(list.request_delete(&carlos.id));
        list.cancel_delete();
        assert!(list.confirm_delete(&db).await.is_none());
        assert_eq!(list.records().len(), 1);

        assert!(list.request_delete(&carlos.id));
        let notification = list.confirm_delete(&db).await.unwrap();
        assert!(!notification.is_error());
        assert_eq!(list.state(), &ListState::Empty);
        assert!(crate::core::employee::list_employees(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_of_vanished_record() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_employee(&db, "Ana", "Rodríguez", EmployeeStatus::Active).await?;

        let mut list = ListView::<Employees>::new();
        list.load(&db).await;
        crate::core::employee::delete_employee(&db, &ana.id).await?;

        assert!(list.request_delete(&ana.id));
        let notification = list.confirm_delete(&db).await.unwrap();
        assert!(notification.is_error());
        assert!(list.records().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_envelopes_are_not_deletable() -> Result<()> {
        let db = setup_test_db().await?;
        let envelope = create_test_envelope(&db, "Juan Pérez").await?;

        let mut list = ListView::<Envelopes>::new();
        list.load(&db).await;
        assert!(!list.request_delete(&envelope.id));
        assert!(list.pending_delete().is_none());

        Ok(())
    }
}
