//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Employee management commands
pub mod employee;

/// Envelope management commands
pub mod envelope;

/// General utility commands
pub mod general;

// Export commands
pub use employee::employee;
pub use envelope::envelope;
pub use general::*;

use crate::errors::{Error, Result};
use chrono::NaiveDate;

/// Accent color for every embed
pub(crate) const EMBED_COLOR: u32 = 0x00B8_860B;

/// Lines shown in one list reply before truncating
pub(crate) const MAX_LIST_LINES: usize = 20;

/// First block of a record id, enough to tell records apart in a list.
pub(crate) fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

/// Parses an optional date option typed as `YYYY-MM-DD` or `DD/MM/YYYY`.
pub(crate) fn parse_date(field: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map(Some)
        .map_err(|_| Error::validation(field, format!("'{raw}' is not a date like 2024-01-25")))
}

/// Parses a date option on an edit command.
///
/// `None` leaves the field alone; a blank value or `-` clears it.
pub(crate) fn parse_date_change(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<Option<NaiveDate>>> {
    match raw.map(str::trim) {
        None => Ok(None),
        Some("" | "-") => Ok(Some(None)),
        Some(value) => parse_date(field, Some(value)).map(Some),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 25);
        assert_eq!(parse_date("due_date", Some("2024-01-25")).unwrap(), expected);
        assert_eq!(parse_date("due_date", Some(" 25/01/2024 ")).unwrap(), expected);
        assert_eq!(parse_date("due_date", Some("")).unwrap(), None);
        assert_eq!(parse_date("due_date", None).unwrap(), None);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("hire_date", Some("next tuesday")).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation {
                field: "hire_date",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_date_change() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 25);
        assert_eq!(parse_date_change("due_date", None).unwrap(), None);
        assert_eq!(parse_date_change("due_date", Some("-")).unwrap(), Some(None));
        assert_eq!(parse_date_change("due_date", Some("  ")).unwrap(), Some(None));
        assert_eq!(
            parse_date_change("due_date", Some("2024-01-25")).unwrap(),
            Some(expected)
        );
        assert!(parse_date_change("due_date", Some("soon")).is_err());
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("3f2b8c1e-77aa-4c1d-9f00-123456789abc"), "3f2b8c1e");
        assert_eq!(short_id("legacy"), "legacy");
    }
}
