//! Envelope business logic - the store adapter for job tickets.
//!
//! Provides functions for listing, creating, updating and deleting envelopes,
//! plus the form draft type and its parsing rules. All adapter functions are
//! async, validate their input, and return the authoritative stored record.

use crate::{
    core::{
        kind::{Envelopes, RecordKind},
        new_record_id, optional_text, parse_optional_amount, parse_required_amount,
        require_amount, require_text, today,
    },
    entities::{EntityKind, Envelope, EnvelopeStatus, ServiceType, envelope},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseConnection, QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

/// Validated field values for creating or replacing an envelope.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EnvelopeInput {
    pub client: String,
    #[serde(default)]
    pub service_type: ServiceType,
    pub repair_type: Option<String>,
    pub engraving_description: Option<String>,
    #[serde(default)]
    pub status: EnvelopeStatus,
    pub total_price: f64,
    #[serde(default)]
    pub deposit: f64,
    pub intake_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub deliverer: Option<String>,
    pub notes: Option<String>,
}

impl EnvelopeInput {
    /// Trims text, drops blank optionals, and checks the required fields and amounts.
    ///
    /// A deposit larger than the total price is accepted and logged.
    pub fn validated(self) -> Result<Self> {
        let client = require_text("client", &self.client)?;
        let total_price = require_amount("total_price", self.total_price)?;
        let deposit = require_amount("deposit", self.deposit)?;

        if deposit > total_price {
            warn!("Envelope for '{client}' has deposit {deposit:.2} above total {total_price:.2}");
        }

        Ok(Self {
            client,
            service_type: self.service_type,
            repair_type: optional_text(self.repair_type.as_deref()),
            engraving_description: optional_text(self.engraving_description.as_deref()),
            status: self.status,
            total_price,
            deposit,
            intake_date: self.intake_date,
            due_date: self.due_date,
            deliverer: optional_text(self.deliverer.as_deref()),
            notes: optional_text(self.notes.as_deref()),
        })
    }
}

/// Retrieves every envelope, newest first.
pub async fn list_envelopes<C>(db: &C) -> Result<Vec<envelope::Model>>
where
    C: ConnectionTrait,
{
    let envelopes = Envelope::find()
        .order_by_desc(envelope::Column::CreatedAt)
        .order_by_asc(envelope::Column::Id)
        .all(db)
        .await?;
    debug!("Fetched {} envelopes", envelopes.len());
    Ok(envelopes)
}

/// Finds an envelope by its identifier.
pub async fn get_envelope_by_id<C>(db: &C, envelope_id: &str) -> Result<Option<envelope::Model>>
where
    C: ConnectionTrait,
{
    Envelope::find_by_id(envelope_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new envelope.
///
/// # Errors
/// Returns an error if:
/// - The client is empty or whitespace-only
/// - The total price or deposit is negative or not finite
/// - The database insert fails
#[instrument(skip(db, input), fields(client = %input.client))]
pub async fn create_envelope<C>(db: &C, input: EnvelopeInput) -> Result<envelope::Model>
where
    C: ConnectionTrait,
{
    let input = input.validated()?;
    let now = chrono::Utc::now();

    let envelope = envelope::ActiveModel {
        id: Set(new_record_id()),
        client: Set(input.client),
        service_type: Set(input.service_type),
        repair_type: Set(input.repair_type),
        engraving_description: Set(input.engraving_description),
        status: Set(input.status),
        total_price: Set(input.total_price),
        deposit: Set(input.deposit),
        intake_date: Set(input.intake_date),
        due_date: Set(input.due_date),
        deliverer: Set(input.deliverer),
        notes: Set(input.notes),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = envelope.insert(db).await?;
    info!("Created envelope {}", created.id);
    Ok(created)
}

/// Replaces every editable field of an existing envelope.
///
/// # Errors
/// Returns [`Error::NotFound`] if no envelope has `envelope_id`, a validation
/// error for bad input, or a transport error if the update fails.
#[instrument(skip(db, input))]
pub async fn update_envelope<C>(
    db: &C,
    envelope_id: &str,
    input: EnvelopeInput,
) -> Result<envelope::Model>
where
    C: ConnectionTrait,
{
    let input = input.validated()?;

    let mut envelope: envelope::ActiveModel = get_envelope_by_id(db, envelope_id)
        .await?
        .ok_or_else(|| Error::not_found(EntityKind::Envelope, envelope_id))?
        .into();

    envelope.client = Set(input.client);
    envelope.service_type = Set(input.service_type);
    envelope.repair_type = Set(input.repair_type);
    envelope.engraving_description = Set(input.engraving_description);
    envelope.status = Set(input.status);
    envelope.total_price = Set(input.total_price);
    envelope.deposit = Set(input.deposit);
    envelope.intake_date = Set(input.intake_date);
    envelope.due_date = Set(input.due_date);
    envelope.deliverer = Set(input.deliverer);
    envelope.notes = Set(input.notes);
    envelope.updated_at = Set(chrono::Utc::now());

    let updated = envelope.update(db).await?;
    info!("Updated envelope {}", updated.id);
    Ok(updated)
}

/// Permanently deletes an envelope.
///
/// # Errors
/// Returns [`Error::NotFound`] if nothing was deleted.
#[instrument(skip(db))]
pub async fn delete_envelope<C>(db: &C, envelope_id: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Envelope::delete_by_id(envelope_id.to_string())
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found(EntityKind::Envelope, envelope_id));
    }
    info!("Deleted envelope {envelope_id}");
    Ok(())
}

/// Unsaved envelope form inputs, kept as typed text until submission.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnvelopeDraft {
    pub client: String,
    pub service_type: ServiceType,
    pub repair_type: String,
    pub engraving_description: String,
    pub status: EnvelopeStatus,
    pub total_price: String,
    pub deposit: String,
    /// Defaults to today on submission when unset.
    pub intake_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub deliverer: String,
    pub notes: String,
}

impl EnvelopeDraft {
    /// Checks required fields and parses the amounts.
    ///
    /// The deposit falls back to zero when blank or unparseable; the engraving
    /// description is dropped for repair jobs.
    pub fn to_input(&self) -> Result<EnvelopeInput> {
        if self.client.trim().is_empty() {
            return Err(Error::validation("client", "cannot be empty"));
        }
        let total_price = parse_required_amount("total_price", &self.total_price)?;

        let engraving_description = match self.service_type {
            ServiceType::Engraving => Some(self.engraving_description.clone()),
            ServiceType::Repair => None,
        };

        Ok(EnvelopeInput {
            client: self.client.clone(),
            service_type: self.service_type,
            repair_type: Some(self.repair_type.clone()),
            engraving_description,
            status: self.status,
            total_price,
            deposit: parse_optional_amount(&self.deposit),
            intake_date: self.intake_date.unwrap_or_else(today),
            due_date: self.due_date,
            deliverer: Some(self.deliverer.clone()),
            notes: Some(self.notes.clone()),
        })
    }
}

impl From<&envelope::Model> for EnvelopeDraft {
    fn from(model: &envelope::Model) -> Self {
        Self {
            client: model.client.clone(),
            service_type: model.service_type,
            repair_type: model.repair_type.clone().unwrap_or_default(),
            engraving_description: model.engraving_description.clone().unwrap_or_default(),
            status: model.status,
            total_price: model.total_price.to_string(),
            deposit: model.deposit.to_string(),
            intake_date: Some(model.intake_date),
            due_date: model.due_date,
            deliverer: model.deliverer.clone().unwrap_or_default(),
            notes: model.notes.clone().unwrap_or_default(),
        }
    }
}

impl RecordKind for Envelopes {
    const KIND: EntityKind = EntityKind::Envelope;
    const DELETABLE: bool = false;

    type Record = envelope::Model;
    type Draft = EnvelopeDraft;
    type Input = EnvelopeInput;
    type Status = EnvelopeStatus;

    fn id(record: &Self::Record) -> &str {
        &record.id
    }

    fn status(record: &Self::Record) -> Self::Status {
        record.status
    }

    fn category(record: &Self::Record) -> &str {
        record.service_type.key()
    }

    fn label(record: &Self::Record) -> String {
        record.client.clone()
    }

    fn matches_text(record: &Self::Record, needle: &str) -> bool {
        record.id.to_lowercase().contains(needle)
            || record.client.to_lowercase().contains(needle)
            || record
                .repair_type
                .as_deref()
                .is_some_and(|r| r.to_lowercase().contains(needle))
    }

    fn draft_from(record: &Self::Record) -> Self::Draft {
        EnvelopeDraft::from(record)
    }

    fn parse_draft(draft: &Self::Draft) -> Result<Self::Input> {
        draft.to_input()
    }

    async fn list(db: &DatabaseConnection) -> Result<Vec<Self::Record>> {
        list_envelopes(db).await
    }

    async fn create(db: &DatabaseConnection, input: Self::Input) -> Result<Self::Record> {
        create_envelope(db, input).await
    }

    async fn update(
        db: &DatabaseConnection,
        id: &str,
        input: Self::Input,
    ) -> Result<Self::Record> {
        update_envelope(db, id, input).await
    }

    async fn delete(db: &DatabaseConnection, id: &str) -> Result<()> {
        delete_envelope(db, id).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_envelope_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Blank client
        let mut input = sample_envelope_input("   ");
        let result = create_envelope(&db, input.clone()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { field: "client", .. }
        ));

        // Negative price
        input.client = "Ana Rodríguez".to_string();
        input.total_price = -10.0;
        let result = create_envelope(&db, input.clone()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { field: "total_price", .. }
        ));

        // NaN deposit
        input.total_price = 10.0;
        input.deposit = f64::NAN;
        let result = create_envelope(&db, input).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { field: "deposit", .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_envelope_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let mut input = sample_envelope_input("  María González ");
        input.repair_type = Some("Soldadura".to_string());
        input.notes = Some("   ".to_string());
        let envelope = create_envelope(&db, input).await?;

        assert_eq!(envelope.client, "María González");
        assert_eq!(envelope.repair_type.as_deref(), Some("Soldadura"));
        assert_eq!(envelope.notes, None);
        assert_eq!(envelope.status, EnvelopeStatus::Pending);
        assert!(!envelope.id.is_empty());

        let found = get_envelope_by_id(&db, &envelope.id).await?.unwrap();
        assert_eq!(found, envelope);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_envelopes_newest_first() -> Result<()> {
        let db = setup_test_db().await?;

        let older = insert_envelope_at(&db, "Older", "2024-01-05T10:00:00Z").await?;
        let newer = insert_envelope_at(&db, "Newer", "2024-01-18T10:00:00Z").await?;

        let envelopes = list_envelopes(&db).await?;
        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[0].id, newer.id);
        assert_eq!(envelopes[1].id, older.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_then_list_merges_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let original = create_test_envelope(&db, "Juan Pérez").await?;

        let mut draft = EnvelopeDraft::from(&original);
        draft.status = EnvelopeStatus::Completed;
        draft.deposit = "80".to_string();
        let updated = update_envelope(&db, &original.id, draft.to_input()?).await?;

        let envelopes = list_envelopes(&db).await?;
        let matching: Vec<_> = envelopes.iter().filter(|e| e.id == original.id).collect();
        assert_eq!(matching.len(), 1);
        let stored = matching[0];
        assert_eq!(stored, &updated);
        assert_eq!(stored.status, EnvelopeStatus::Completed);
        assert_eq!(stored.deposit, 80.0);
        // Untouched fields carried over
        assert_eq!(stored.client, original.client);
        assert_eq!(stored.total_price, original.total_price);
        assert_eq!(stored.intake_date, original.intake_date);
        assert_eq!(stored.created_at, original.created_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_envelope_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_envelope(&db, "missing", sample_envelope_input("Ana")).await;
        assert!(result.unwrap_err().is_not_found());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let envelope = create_test_envelope(&db, "Carlos Martínez").await?;

        delete_envelope(&db, &envelope.id).await?;
        assert!(list_envelopes(&db).await?.is_empty());

        let second = delete_envelope(&db, &envelope.id).await;
        assert!(matches!(
            second.unwrap_err(),
            Error::NotFound { kind: EntityKind::Envelope, .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_deposit_above_total_is_accepted() -> Result<()> {
        let db = setup_test_db().await?;

        let mut input = sample_envelope_input("Ana Rodríguez");
        input.total_price = 50.0;
        input.deposit = 60.0;
        let envelope = create_envelope(&db, input).await?;

        assert!(envelope.is_overpaid());
        assert_eq!(envelope.balance_due(), -10.0);

        Ok(())
    }

    #[test]
    fn test_balance_due() {
        let mut envelope = sample_envelope_model("María González");
        envelope.total_price = 150.0;
        envelope.deposit = 50.0;
        assert_eq!(envelope.balance_due(), 100.0);

        envelope.total_price = 120.0;
        envelope.deposit = 120.0;
        assert_eq!(envelope.balance_due(), 0.0);
        assert!(!envelope.is_overpaid());
    }

    #[test]
    fn test_draft_requires_client_and_total() {
        let mut draft = EnvelopeDraft::default();
        assert!(matches!(
            draft.to_input(),
            Err(Error::Validation { field: "client", .. })
        ));

        draft.client = "Juan Pérez".to_string();
        assert!(matches!(
            draft.to_input(),
            Err(Error::Validation { field: "total_price", .. })
        ));

        draft.total_price = "80".to_string();
        draft.deposit = "not a number".to_string();
        let input = draft.to_input().unwrap();
        assert_eq!(input.total_price, 80.0);
        assert_eq!(input.deposit, 0.0);
        assert_eq!(input.intake_date, today());
    }

    #[test]
    fn test_draft_drops_engraving_text_for_repairs() {
        let draft = EnvelopeDraft {
            client: "Juan Pérez".to_string(),
            total_price: "80".to_string(),
            engraving_description: "J & A".to_string(),
            ..EnvelopeDraft::default()
        };
        assert_eq!(draft.to_input().unwrap().engraving_description, None);

        let engraving = EnvelopeDraft {
            service_type: ServiceType::Engraving,
            ..draft
        };
        assert_eq!(
            engraving.to_input().unwrap().engraving_description.as_deref(),
            Some("J & A")
        );
    }

    #[test]
    fn test_text_match_covers_id_client_and_repair_type() {
        let mut envelope = sample_envelope_model("Ana Rodríguez");
        envelope.id = "ABC-003".to_string();
        envelope.repair_type = Some("Pulido".to_string());

        assert!(Envelopes::matches_text(&envelope, "abc"));
        assert!(Envelopes::matches_text(&envelope, "rodríguez"));
        assert!(Envelopes::matches_text(&envelope, "puli"));
        assert!(!Envelopes::matches_text(&envelope, "soldadura"));
    }
}
