//! Discord interaction handlers
//!
//! Handlers for interactions that are not commands themselves.

/// Autocomplete handlers for clients, catalog values and record ids
pub mod autocomplete;
