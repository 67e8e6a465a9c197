//! First-run sample data.
//!
//! When a table is empty, the records listed under `[seed]` in config.toml are
//! inserted through the regular adapter functions inside one transaction, so a
//! bad entry leaves the database untouched.

use crate::{
    config::shop::Seed,
    core::{employee, envelope},
    entities::{Employee, Envelope},
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait};
use tracing::{debug, info};

/// How many records of each kind were inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub envelopes: usize,
    pub employees: usize,
}

/// Inserts the configured sample records into empty tables.
///
/// Tables that already hold records are left alone.
pub async fn seed_sample_records(db: &DatabaseConnection, seed: &Seed) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();
    let txn = db.begin().await?;

    if Envelope::find().count(&txn).await? == 0 {
        for input in &seed.envelopes {
            envelope::create_envelope(&txn, input.clone()).await?;
            summary.envelopes += 1;
        }
    } else {
        debug!("Envelopes table already populated, skipping envelope seed");
    }

    if Employee::find().count(&txn).await? == 0 {
        for input in &seed.employees {
            employee::create_employee(&txn, input.clone()).await?;
            summary.employees += 1;
        }
    } else {
        debug!("Employees table already populated, skipping employee seed");
    }

    txn.commit().await?;
    info!(
        "Seeded {} envelopes and {} employees",
        summary.envelopes, summary.employees
    );
    Ok(summary)
}
