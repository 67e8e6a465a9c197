//! Envelope entity - A repair or engraving job ticket ("sobre").
//!
//! Each envelope records who brought the piece in, what work is to be done,
//! what it costs, how much was paid up front, and where the job stands.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work requested on the piece.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Repair work (soldering, polishing, stone setting, ...)
    #[default]
    #[sea_orm(string_value = "repair")]
    #[serde(alias = "reparacion", alias = "reparación")]
    Repair,
    /// Engraving work
    #[sea_orm(string_value = "engraving")]
    #[serde(alias = "grabado")]
    Engraving,
}

impl ServiceType {
    /// Stable lowercase key, as stored in the backend.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Repair => "repair",
            Self::Engraving => "engraving",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Repair => "Repair",
            Self::Engraving => "Engraving",
        })
    }
}

/// Where a job stands.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    #[serde(alias = "pendiente")]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    #[serde(alias = "en_proceso")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    #[serde(alias = "completado")]
    Completed,
    #[sea_orm(string_value = "delivered")]
    #[serde(alias = "entregado")]
    Delivered,
}

impl fmt::Display for EnvelopeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Delivered => "Delivered",
        })
    }
}

/// Envelope database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "envelopes")]
pub struct Model {
    /// Opaque identifier (UUID v4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Client name or reference, free text
    pub client: String,
    pub service_type: ServiceType,
    /// Repair subtype (e.g. "Soldadura", "Pulido")
    pub repair_type: Option<String>,
    /// What to engrave, for engraving jobs
    pub engraving_description: Option<String>,
    pub status: EnvelopeStatus,
    /// Total price of the job
    pub total_price: f64,
    /// Amount paid up front
    pub deposit: f64,
    /// Day the piece was received
    pub intake_date: Date,
    /// Promised delivery day
    pub due_date: Option<Date>,
    /// Person who will hand the finished piece over
    pub deliverer: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// Outstanding balance: total price minus deposit.
    ///
    /// Not clamped; an overpaid envelope yields a negative balance.
    #[must_use]
    pub fn balance_due(&self) -> f64 {
        self.total_price - self.deposit
    }

    /// Whether the deposit exceeds the total price.
    #[must_use]
    pub fn is_overpaid(&self) -> bool {
        self.deposit > self.total_price
    }
}

/// Envelopes have no relationships; the client is free text.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
