//! Shop configuration loading from config.toml
//!
//! The configuration names the shop, lists the choices offered by the forms
//! (repair types, positions, known clients) and optionally carries sample
//! records used to seed an empty database on first run.

use crate::core::{employee::EmployeeInput, envelope::EnvelopeInput};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub shop: ShopInfo,
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub seed: Seed,
}

/// Header information shown in replies.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopInfo {
    pub name: String,
    #[serde(default)]
    pub subtitle: Option<String>,
}

impl Default for ShopInfo {
    fn default() -> Self {
        Self {
            name: "Jewelry Desk".to_string(),
            subtitle: None,
        }
    }
}

/// Choice lists offered by the forms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    /// Repair subtypes (e.g. "Soldadura", "Pulido")
    #[serde(default)]
    pub repair_types: Vec<String>,
    /// Job titles for employees
    #[serde(default)]
    pub positions: Vec<String>,
    /// Known client names, used for suggestions only
    #[serde(default)]
    pub clients: Vec<String>,
}

/// Sample records inserted when the tables are empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub envelopes: Vec<EnvelopeInput>,
    #[serde(default)]
    pub employees: Vec<EmployeeInput>,
}

/// Loads the shop configuration from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or is not valid TOML
/// for [`ShopConfig`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ShopConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!(
            "Failed to read config file {}: {e}",
            path.as_ref().display()
        ),
    })?;

    parse_config(&contents)
}

/// Parses a configuration document.
pub fn parse_config(contents: &str) -> Result<ShopConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the configuration from `SHOP_CONFIG`, or `./config.toml` when unset.
pub fn load_default_config() -> Result<ShopConfig> {
    let path = std::env::var("SHOP_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path)
}
