//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::{Employee, Envelope};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://jewelry_desk.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling
/// back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {database_url}");
    let db = Database::connect(&database_url).await?;
    info!("Database connection established");
    Ok(db)
}

/// Creates the `envelopes` and `employees` tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut envelope_table = schema.create_table_from_entity(Envelope);
    let mut employee_table = schema.create_table_from_entity(Employee);

    envelope_table.if_not_exists();
    employee_table.if_not_exists();

    db.execute(builder.build(&envelope_table)).await?;
    db.execute(builder.build(&employee_table)).await?;

    debug!("Tables ensured: envelopes, employees");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EmployeeModel, EnvelopeModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<EnvelopeModel> = Envelope::find().limit(1).all(&db).await?;
        let _: Vec<EmployeeModel> = Employee::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
