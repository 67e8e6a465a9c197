//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database and building records with
//! sensible defaults.

use crate::{
    core::{
        employee::{self, EmployeeInput},
        envelope::{self, EnvelopeInput},
    },
    entities::{self, EmployeeStatus, EnvelopeStatus, ServiceType},
    errors::Result,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel};

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Envelope input with sensible defaults.
///
/// # Defaults
/// * repair job, pending, no repair subtype
/// * `total_price`: 100.0, `deposit`: 0.0
/// * `intake_date`: 2024-01-15
pub fn sample_envelope_input(client: &str) -> EnvelopeInput {
    EnvelopeInput {
        client: client.to_string(),
        service_type: ServiceType::Repair,
        repair_type: None,
        engraving_description: None,
        status: EnvelopeStatus::Pending,
        total_price: 100.0,
        deposit: 0.0,
        intake_date: date(2024, 1, 15),
        due_date: Some(date(2024, 1, 25)),
        deliverer: None,
        notes: None,
    }
}

/// Employee input with sensible defaults (a senior jeweler).
pub fn sample_employee_input(first: &str, last: &str, status: EmployeeStatus) -> EmployeeInput {
    EmployeeInput {
        first_name: first.to_string(),
        last_name: last.to_string(),
        position: "Joyero Senior".to_string(),
        phone: "+1 234-567-8901".to_string(),
        email: format!("{}@joyeriakarina.com", first.to_lowercase()),
        address: Some("Av. Principal 123, Ciudad".to_string()),
        hire_date: date(2020, 3, 15),
        monthly_salary: 2500.0,
        specialty: None,
        status,
    }
}

/// In-memory envelope model that never touches a database.
pub fn sample_envelope_model(client: &str) -> entities::EnvelopeModel {
    let input = sample_envelope_input(client);
    let now = Utc::now();
    entities::EnvelopeModel {
        id: crate::core::new_record_id(),
        client: input.client,
        service_type: input.service_type,
        repair_type: input.repair_type,
        engraving_description: input.engraving_description,
        status: input.status,
        total_price: input.total_price,
        deposit: input.deposit,
        intake_date: input.intake_date,
        due_date: input.due_date,
        deliverer: input.deliverer,
        notes: input.notes,
        created_at: now,
        updated_at: now,
    }
}

/// In-memory employee model that never touches a database.
pub fn sample_employee_model(
    first: &str,
    last: &str,
    status: EmployeeStatus,
) -> entities::EmployeeModel {
    let input = sample_employee_input(first, last, status);
    let now = Utc::now();
    entities::EmployeeModel {
        id: crate::core::new_record_id(),
        first_name: input.first_name,
        last_name: input.last_name,
        position: input.position,
        phone: input.phone,
        email: input.email,
        address: input.address,
        hire_date: input.hire_date,
        monthly_salary: input.monthly_salary,
        specialty: input.specialty,
        status: input.status,
        created_at: now,
        updated_at: now,
    }
}

/// Creates an envelope through the adapter with default fields.
pub async fn create_test_envelope(
    db: &DatabaseConnection,
    client: &str,
) -> Result<entities::EnvelopeModel> {
    envelope::create_envelope(db, sample_envelope_input(client)).await
}

/// Creates an employee through the adapter with default fields.
pub async fn create_test_employee(
    db: &DatabaseConnection,
    first: &str,
    last: &str,
    status: EmployeeStatus,
) -> Result<entities::EmployeeModel> {
    employee::create_employee(db, sample_employee_input(first, last, status)).await
}

/// Inserts an envelope with an explicit creation timestamp (RFC 3339).
pub async fn insert_envelope_at(
    db: &DatabaseConnection,
    client: &str,
    created_at: &str,
) -> Result<entities::EnvelopeModel> {
    let mut model = sample_envelope_model(client);
    let stamp = DateTime::parse_from_rfc3339(created_at)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default();
    model.created_at = stamp;
    model.updated_at = stamp;

    let active: entities::envelope::ActiveModel = model.into_active_model();
    let active = active.reset_all();
    Ok(active.insert(db).await?)
}
