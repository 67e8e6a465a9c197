//! Summary statistics and formatting helpers.
//!
//! Counts are computed over the full fetched set, not the filtered view, so the
//! summary cards above a list stay stable while the user types a search. All
//! functions are framework-agnostic and return plain data for the bot layer.

use crate::{
    core::{employee::list_employees, envelope::list_envelopes},
    entities::{EmployeeModel, EmployeeStatus, EnvelopeModel, EnvelopeStatus},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Envelope counts per status plus money still owed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvelopeStats {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub delivered: usize,
    /// Sum of balances on jobs not yet delivered
    pub outstanding: f64,
}

impl EnvelopeStats {
    #[must_use]
    pub fn from_records(envelopes: &[EnvelopeModel]) -> Self {
        envelopes.iter().fold(Self::default(), |mut stats, env| {
            match env.status {
                EnvelopeStatus::Pending => stats.pending += 1,
                EnvelopeStatus::InProgress => stats.in_progress += 1,
                EnvelopeStatus::Completed => stats.completed += 1,
                EnvelopeStatus::Delivered => stats.delivered += 1,
            }
            if env.status != EnvelopeStatus::Delivered {
                stats.outstanding += env.balance_due();
            }
            stats
        })
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed + self.delivered
    }
}

/// Staff headcount summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmployeeStats {
    pub active: usize,
    pub total: usize,
    /// Jewelers and engravers
    pub specialists: usize,
}

impl EmployeeStats {
    #[must_use]
    pub fn from_records(employees: &[EmployeeModel]) -> Self {
        Self {
            active: employees
                .iter()
                .filter(|e| e.status == EmployeeStatus::Active)
                .count(),
            total: employees.len(),
            specialists: employees.iter().filter(|e| e.is_specialist()).count(),
        }
    }
}

/// Fetches all envelopes and summarises them.
pub async fn envelope_stats(db: &DatabaseConnection) -> Result<EnvelopeStats> {
    Ok(EnvelopeStats::from_records(&list_envelopes(db).await?))
}

/// Fetches all employees and summarises them.
pub async fn employee_stats(db: &DatabaseConnection) -> Result<EmployeeStats> {
    Ok(EmployeeStats::from_records(&list_employees(db).await?))
}

/// Share of the total price already paid, as a percentage.
///
/// A job with no price counts as fully paid.
#[must_use]
pub fn paid_percent(envelope: &EnvelopeModel) -> f64 {
    if envelope.total_price <= 0.0 {
        return 100.0;
    }
    (envelope.deposit / envelope.total_price) * 100.0
}

/// Generates a progress bar string such as `[████████░░] 80.0%`.
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // clamped_progress ∈ [0, 100] and length is small, so the cast cannot overflow.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!(
        "[{}{}] {progress_percent:.1}%",
        "█".repeat(filled),
        "░".repeat(empty)
    )
}

/// Formats a money amount like `$1500.00` or `-$10.00`.
#[must_use]
pub fn format_money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${amount:.2}")
    }
}
