//! Employee business logic - the store adapter for staff records.
//!
//! Same shape as the envelope adapter: list, lookup, create, update and a
//! hard delete, each returning the authoritative stored record.

use crate::{
    core::{
        kind::{Employees, RecordKind},
        new_record_id, optional_text, parse_required_amount, require_amount, require_text,
        today,
    },
    entities::{Employee, EmployeeStatus, EntityKind, employee},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseConnection, QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// Validated field values for creating or replacing an employee.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub phone: String,
    pub email: String,
    pub address: Option<String>,
    pub hire_date: NaiveDate,
    pub monthly_salary: f64,
    pub specialty: Option<String>,
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl EmployeeInput {
    /// Trims text, drops blank optionals, and checks required fields.
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            first_name: require_text("first_name", &self.first_name)?,
            last_name: require_text("last_name", &self.last_name)?,
            position: require_text("position", &self.position)?,
            phone: require_text("phone", &self.phone)?,
            email: require_text("email", &self.email)?,
            address: optional_text(self.address.as_deref()),
            hire_date: self.hire_date,
            monthly_salary: require_amount("monthly_salary", self.monthly_salary)?,
            specialty: optional_text(self.specialty.as_deref()),
            status: self.status,
        })
    }
}

/// Retrieves every employee, newest first.
pub async fn list_employees<C>(db: &C) -> Result<Vec<employee::Model>>
where
    C: ConnectionTrait,
{
    let employees = Employee::find()
        .order_by_desc(employee::Column::CreatedAt)
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await?;
    debug!("Fetched {} employees", employees.len());
    Ok(employees)
}

/// Finds an employee by identifier.
pub async fn get_employee_by_id<C>(db: &C, employee_id: &str) -> Result<Option<employee::Model>>
where
    C: ConnectionTrait,
{
    Employee::find_by_id(employee_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a new employee.
///
/// # Errors
/// Returns a validation error for blank required fields or an invalid salary,
/// or a transport error if the insert fails.
#[instrument(skip(db, input), fields(name = %input.first_name))]
pub async fn create_employee<C>(db: &C, input: EmployeeInput) -> Result<employee::Model>
where
    C: ConnectionTrait,
{
    let input = input.validated()?;
    let now = chrono::Utc::now();

    let employee = employee::ActiveModel {
        id: Set(new_record_id()),
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        position: Set(input.position),
        phone: Set(input.phone),
        email: Set(input.email),
        address: Set(input.address),
        hire_date: Set(input.hire_date),
        monthly_salary: Set(input.monthly_salary),
        specialty: Set(input.specialty),
        status: Set(input.status),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = employee.insert(db).await?;
    info!("Created employee {} ({})", created.id, created.full_name());
    Ok(created)
}

/// Replaces every editable field of an existing employee.
///
/// # Errors
/// Returns [`Error::NotFound`] if no employee has `employee_id`.
#[instrument(skip(db, input))]
pub async fn update_employee<C>(
    db: &C,
    employee_id: &str,
    input: EmployeeInput,
) -> Result<employee::Model>
where
    C: ConnectionTrait,
{
    let input = input.validated()?;

    let mut employee: employee::ActiveModel = get_employee_by_id(db, employee_id)
        .await?
        .ok_or_else(|| Error::not_found(EntityKind::Employee, employee_id))?
        .into();

    employee.first_name = Set(input.first_name);
    employee.last_name = Set(input.last_name);
    employee.position = Set(input.position);
    employee.phone = Set(input.phone);
    employee.email = Set(input.email);
    employee.address = Set(input.address);
    employee.hire_date = Set(input.hire_date);
    employee.monthly_salary = Set(input.monthly_salary);
    employee.specialty = Set(input.specialty);
    employee.status = Set(input.status);
    employee.updated_at = Set(chrono::Utc::now());

    let updated = employee.update(db).await?;
    info!("Updated employee {}", updated.id);
    Ok(updated)
}

/// Permanently deletes an employee.
///
/// # Errors
/// Returns [`Error::NotFound`] if nothing was deleted.
#[instrument(skip(db))]
pub async fn delete_employee<C>(db: &C, employee_id: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Employee::delete_by_id(employee_id.to_string())
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found(EntityKind::Employee, employee_id));
    }
    info!("Deleted employee {employee_id}");
    Ok(())
}

/// Unsaved employee form inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Defaults to today on submission when unset.
    pub hire_date: Option<NaiveDate>,
    pub monthly_salary: String,
    pub specialty: String,
    pub status: EmployeeStatus,
}

impl EmployeeDraft {
    /// Checks required fields in form order and parses the salary.
    pub fn to_input(&self) -> Result<EmployeeInput> {
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("position", &self.position),
        ] {
            if value.trim().is_empty() {
                return Err(Error::validation(field, "cannot be empty"));
            }
        }
        let monthly_salary = parse_required_amount("monthly_salary", &self.monthly_salary)?;

        Ok(EmployeeInput {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            position: self.position.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: Some(self.address.clone()),
            hire_date: self.hire_date.unwrap_or_else(today),
            monthly_salary,
            specialty: Some(self.specialty.clone()),
            status: self.status,
        })
    }
}

impl From<&employee::Model> for EmployeeDraft {
    fn from(model: &employee::Model) -> Self {
        Self {
            first_name: model.first_name.clone(),
            last_name: model.last_name.clone(),
            position: model.position.clone(),
            phone: model.phone.clone(),
            email: model.email.clone(),
            address: model.address.clone().unwrap_or_default(),
            hire_date: Some(model.hire_date),
            monthly_salary: model.monthly_salary.to_string(),
            specialty: model.specialty.clone().unwrap_or_default(),
            status: model.status,
        }
    }
}

impl RecordKind for Employees {
    const KIND: EntityKind = EntityKind::Employee;
    const DELETABLE: bool = true;

    type Record = employee::Model;
    type Draft = EmployeeDraft;
    type Input = EmployeeInput;
    type Status = EmployeeStatus;

    fn id(record: &Self::Record) -> &str {
        &record.id
    }

    fn status(record: &Self::Record) -> Self::Status {
        record.status
    }

    fn category(record: &Self::Record) -> &str {
        &record.position
    }

    fn label(record: &Self::Record) -> String {
        record.full_name()
    }

    fn matches_text(record: &Self::Record, needle: &str) -> bool {
        record.id.to_lowercase().contains(needle)
            || record.first_name.to_lowercase().contains(needle)
            || record.last_name.to_lowercase().contains(needle)
            || record.full_name().to_lowercase().contains(needle)
            || record.position.to_lowercase().contains(needle)
    }

    fn draft_from(record: &Self::Record) -> Self::Draft {
        EmployeeDraft::from(record)
    }

    fn parse_draft(draft: &Self::Draft) -> Result<Self::Input> {
        draft.to_input()
    }

    async fn list(db: &DatabaseConnection) -> Result<Vec<Self::Record>> {
        list_employees(db).await
    }

    async fn create(db: &DatabaseConnection, input: Self::Input) -> Result<Self::Record> {
        create_employee(db, input).await
    }

    async fn update(
        db: &DatabaseConnection,
        id: &str,
        input: Self::Input,
    ) -> Result<Self::Record> {
        update_employee(db, id, input).await
    }

    async fn delete(db: &DatabaseConnection, id: &str) -> Result<()> {
        delete_employee(db, id).await
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
    async fn test_create_employee_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut input = sample_employee_input("", "González", EmployeeStatus::Active);
        let result = create_employee(&db, input.clone()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { field: "first_name", .. }
        ));

        input.first_name = "María".to_string();
        input.monthly_salary = -1.0;
        let result = create_employee(&db, input).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { field: "monthly_salary", .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_get_employee() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_test_employee(&db, "María", "González", EmployeeStatus::Active).await?;
        assert_eq!(created.full_name(), "María González");
        assert!(created.is_specialist());

        let found = get_employee_by_id(&db, &created.id).await?;
        assert_eq!(found, Some(created));
        assert_eq!(get_employee_by_id(&db, "nope").await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_then_list_merges_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let original =
            create_test_employee(&db, "Carlos", "Martínez", EmployeeStatus::Active).await?;

        let mut draft = EmployeeDraft::from(&original);
        draft.status = EmployeeStatus::Inactive;
        draft.phone = "+1 234-567-0000".to_string();
        update_employee(&db, &original.id, draft.to_input()?).await?;

        let employees = list_employees(&db).await?;
        let matching: Vec<_> = employees.iter().filter(|e| e.id == original.id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].status, EmployeeStatus::Inactive);
        assert_eq!(matching[0].phone, "+1 234-567-0000");
        assert_eq!(matching[0].email, original.email);
        assert_eq!(matching[0].monthly_salary, original.monthly_salary);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_then_list_and_second_delete() -> Result<()> {
        let db = setup_test_db().await?;
        let keep = create_test_employee(&db, "Ana", "Rodríguez", EmployeeStatus::Active).await?;
        let gone = create_test_employee(&db, "Carlos", "Martínez", EmployeeStatus::Active).await?;

        delete_employee(&db, &gone.id).await?;
        let employees = list_employees(&db).await?;
        assert!(employees.iter().all(|e| e.id != gone.id));
        assert!(employees.iter().any(|e| e.id == keep.id));

        let second = delete_employee(&db, &gone.id).await;
        assert!(second.unwrap_err().is_not_found());

        Ok(())
    }

    #[test]
    fn test_draft_required_fields() {
        let mut draft = EmployeeDraft::default();
        assert!(matches!(
            draft.to_input(),
            Err(Error::Validation { field: "first_name", .. })
        ));

        draft.first_name = "María".into();
        draft.last_name = "González".into();
        draft.phone = "+1 234-567-8901".into();
        draft.email = "maria@joyeriakarina.com".into();
        draft.position = "Joyero Senior".into();
        assert!(matches!(
            draft.to_input(),
            Err(Error::Validation { field: "monthly_salary", .. })
        ));

        draft.monthly_salary = "2500.00".into();
        let input = draft.to_input().unwrap();
        assert_eq!(input.monthly_salary, 2500.0);
        assert_eq!(input.status, EmployeeStatus::Active);
    }

    #[test]
    fn test_text_match_is_case_insensitive() {
        let employee = sample_employee_model("María", "González", EmployeeStatus::Active);
        assert!(Employees::matches_text(&employee, "gonzález"));
        assert!(Employees::matches_text(&employee, "maría gon"));
        assert!(Employees::matches_text(&employee, "joyero"));
        assert!(!Employees::matches_text(&employee, "martínez"));
    }
}
