//! Entity module - SeaORM entity definitions, one table per record kind.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod employee;
pub mod envelope;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use employee::{
    Column as EmployeeColumn, EmployeeStatus, Entity as Employee, Model as EmployeeModel,
};
pub use envelope::{
    Column as EnvelopeColumn, Entity as Envelope, EnvelopeStatus, Model as EnvelopeModel,
    ServiceType,
};

/// The record kinds the desk manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Envelope,
    Employee,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Envelope => "Envelope",
            Self::Employee => "Employee",
        })
    }
}
