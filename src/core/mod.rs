//! Core business logic - framework-agnostic record operations.
//!
//! The per-kind modules are the store adapter: every backend call goes through
//! them and every input is validated there. [`kind::RecordKind`] lets the
//! generic list and form views drive either kind.

/// Employee adapter, input and draft types
pub mod employee;
/// Envelope adapter, input and draft types
pub mod envelope;
/// Search, status and category predicates over fetched records
pub mod filter;
/// The `RecordKind` abstraction shared by list and form views
pub mod kind;
/// Summary counts shown above the lists
pub mod report;
/// First-run sample data
pub mod seed;

use crate::errors::{Error, Result};

/// Trims `value` and fails if nothing is left.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Trims `value`; blank becomes `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Money amounts must be finite and non-negative.
pub(crate) fn require_amount(field: &'static str, amount: f64) -> Result<f64> {
    if !amount.is_finite() {
        return Err(Error::validation(field, "must be a valid number"));
    }
    if amount < 0.0 {
        return Err(Error::validation(field, format!("cannot be negative ({amount})")));
    }
    Ok(amount)
}

/// Parses a raw form amount such as `"150"`, `"150.00"` or `"$1,500.50"`.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A required amount field: blank or unparseable input is a validation error.
pub(crate) fn parse_required_amount(field: &'static str, raw: &str) -> Result<f64> {
    if raw.trim().is_empty() {
        return Err(Error::validation(field, "cannot be empty"));
    }
    parse_amount(raw).ok_or_else(|| Error::validation(field, format!("'{raw}' is not a number")))
}

/// An optional amount field: blank or unparseable input counts as zero.
pub(crate) fn parse_optional_amount(raw: &str) -> f64 {
    parse_amount(raw).unwrap_or(0.0)
}

/// Today's date in local time, the default for intake and hire dates.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Fresh opaque record identifier.
pub(crate) fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_amount_accepts_common_inputs() {
        assert_eq!(parse_amount("150"), Some(150.0));
        assert_eq!(parse_amount(" 150.50 "), Some(150.5));
        assert_eq!(parse_amount("$1,500.25"), Some(1500.25));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_optional_amount_falls_back_to_zero() {
        assert_eq!(parse_optional_amount(""), 0.0);
        assert_eq!(parse_optional_amount("ten"), 0.0);
        assert_eq!(parse_optional_amount("10"), 10.0);
    }

    #[test]
    fn test_required_amount_rejects_blank_and_garbage() {
        assert!(parse_required_amount("total_price", "  ").unwrap_err().is_validation());
        assert!(parse_required_amount("total_price", "x1").unwrap_err().is_validation());
        assert_eq!(parse_required_amount("total_price", "99.9").unwrap(), 99.9);
    }

    #[test]
    fn test_require_text_trims() {
        assert_eq!(require_text("client", "  Ana ").unwrap(), "Ana");
        assert!(require_text("client", "   ").is_err());
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(Some(" x ")), Some("x".to_string()));
    }

    #[test]
    fn test_require_amount_rejects_negative_and_nan() {
        assert!(require_amount("deposit", -1.0).is_err());
        assert!(require_amount("deposit", f64::NAN).is_err());
        assert!(require_amount("deposit", f64::INFINITY).is_err());
        assert_eq!(require_amount("deposit", 0.0).unwrap(), 0.0);
    }
}
