//! Autocomplete handlers for Discord slash command parameters.
//!
//! Catalog values (clients, repair types, positions) come from config.toml;
//! record ids are suggested by label so nobody has to type a UUID.

use crate::{
    bot::Context,
    core::{
        employee, envelope,
        kind::{Employees, Envelopes, RecordKind},
    },
};
use poise::serenity_prelude as serenity;
use tracing::warn;

/// Discord autocomplete limit
const MAX_CHOICES: usize = 25;
/// Discord limit on a choice's display name
const MAX_NAME_LEN: usize = 100;

fn matching(values: &[String], partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = values
        .iter()
        .filter(|v| v.to_lowercase().contains(&partial_lower))
        .take(MAX_CHOICES)
        .cloned()
        .collect();

    // Sort alphabetically for consistent UX
    matching.sort();
    matching
}

fn truncate(name: String) -> String {
    if name.chars().count() <= MAX_NAME_LEN {
        return name;
    }
    let mut cut: String = name.chars().take(MAX_NAME_LEN - 1).collect();
    cut.push('…');
    cut
}

/// Suggests known client names.
pub async fn autocomplete_client(ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(&ctx.data().config.catalog.clients, partial)
}

/// Suggests repair types from the catalog.
pub async fn autocomplete_repair_type(ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(&ctx.data().config.catalog.repair_types, partial)
}

/// Suggests staff positions from the catalog.
pub async fn autocomplete_position(ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(&ctx.data().config.catalog.positions, partial)
}

/// Suggests envelopes matching the typed text, newest first.
pub async fn autocomplete_envelope_id(
    ctx: Context<'_>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let envelopes = match envelope::list_envelopes(&ctx.data().database).await {
        Ok(envelopes) => envelopes,
        Err(e) => {
            warn!("Envelope autocomplete failed: {e}");
            return Vec::new();
        }
    };

    let needle = partial.to_lowercase();
    envelopes
        .iter()
        .filter(|env| Envelopes::matches_text(env, &needle))
        .take(MAX_CHOICES)
        .map(|env| {
            let name = format!(
                "{} · {} · {}",
                env.client,
                env.service_type,
                env.intake_date.format("%Y-%m-%d")
            );
            serenity::AutocompleteChoice::new(truncate(name), env.id.clone())
        })
        .collect()
}

/// Suggests employees matching the typed text.
pub async fn autocomplete_employee_id(
    ctx: Context<'_>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let employees = match employee::list_employees(&ctx.data().database).await {
        Ok(employees) => employees,
        Err(e) => {
            warn!("Employee autocomplete failed: {e}");
            return Vec::new();
        }
    };

    let needle = partial.to_lowercase();
    employees
        .iter()
        .filter(|emp| Employees::matches_text(emp, &needle))
        .take(MAX_CHOICES)
        .map(|emp| {
            let name = format!("{} · {}", emp.full_name(), emp.position);
            serenity::AutocompleteChoice::new(truncate(name), emp.id.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_is_case_insensitive_and_sorted() {
        let values = vec![
            "Soldadura".to_string(),
            "Pulido".to_string(),
            "Grabado".to_string(),
        ];
        assert_eq!(matching(&values, "DO"), vec!["Grabado", "Pulido", "Soldadura"]);
        assert_eq!(matching(&values, "sol"), vec!["Soldadura"]);
        assert!(matching(&values, "xyz").is_empty());
    }

    #[test]
    fn test_truncate_long_names() {
        let long = "é".repeat(150);
        let cut = truncate(long);
        assert_eq!(cut.chars().count(), MAX_NAME_LEN);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate("short".to_string()), "short");
    }
}
