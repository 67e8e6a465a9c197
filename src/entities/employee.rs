//! Employee entity - A member of the shop's staff.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Employment status.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    #[serde(alias = "activo")]
    Active,
    #[sea_orm(string_value = "inactive")]
    #[serde(alias = "inactivo")]
    Inactive,
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        })
    }
}

/// Employee database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Opaque identifier (UUID v4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Job title (e.g. "Joyero Senior", "Grabador")
    pub position: String,
    pub phone: String,
    pub email: String,
    pub address: Option<String>,
    pub hire_date: Date,
    pub monthly_salary: f64,
    /// Area of expertise, free text
    pub specialty: Option<String>,
    pub status: EmployeeStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// "First Last"
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Bench staff: jewelers and engravers.
    #[must_use]
    pub fn is_specialist(&self) -> bool {
        self.position.contains("Joyero") || self.position.contains("Grabador")
    }
}

/// Employees have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
